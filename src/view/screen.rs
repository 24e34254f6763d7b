use crate::types::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    SignedOut,
    SignedIn { username: String },
}

/// Which top-level screen a session should see.
pub fn screen_for(session: &Session) -> Screen {
    match (&session.access_token, &session.current_user) {
        (Some(_), Some(user)) => Screen::SignedIn {
            username: user.username.clone(),
        },
        _ => Screen::SignedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrentUser;

    #[test]
    fn needs_both_token_and_user() {
        let user = CurrentUser {
            id: 1,
            username: "ayse".to_string(),
            email: None,
            created_at: None,
            is_active: true,
        };
        let mut session = Session {
            access_token: Some("T1".to_string()),
            refresh_token: None,
            current_user: Some(user),
        };
        assert_eq!(
            screen_for(&session),
            Screen::SignedIn {
                username: "ayse".to_string()
            }
        );

        session.access_token = None;
        assert_eq!(screen_for(&session), Screen::SignedOut);
        assert_eq!(screen_for(&Session::default()), Screen::SignedOut);
    }
}
