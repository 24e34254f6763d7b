use crate::rehber::ApiError;
use crate::state::AppState;
use crate::view::text::render_screen;
use crate::view::Screen;
use anyhow::Context;

/// Takes the password from the flag, or prompts for it without echo.
fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    let password =
        rpassword::prompt_password("Password: ").context("failed to read password")?;
    anyhow::ensure!(!password.is_empty(), "password is required");
    Ok(password)
}

pub(super) async fn health(state: &AppState) -> anyhow::Result<String> {
    let res = state.api.health().await?;
    Ok(match res.service {
        Some(service) => format!("{service}: {}", res.status),
        None => res.status,
    })
}

pub(super) async fn login(
    state: &AppState,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<String> {
    let password = password_or_prompt(password)?;
    let user = state.api.login(username, &password).await?;
    Ok(format!("Welcome, {}!", user.username))
}

pub(super) async fn register(
    state: &AppState,
    username: &str,
    email: Option<&str>,
    password: Option<String>,
) -> anyhow::Result<String> {
    let password = password_or_prompt(password)?;
    let res = state.api.register(username, email, &password).await?;
    Ok(format!(
        "{} Account `{}` created. Run `rehber login` to sign in.",
        res.message.unwrap_or_default(),
        res.user.username
    )
    .trim_start()
    .to_string())
}

pub(super) async fn logout(state: &AppState) -> anyhow::Result<String> {
    state.api.logout().await;
    Ok(render_screen(&Screen::SignedOut))
}

pub(super) async fn whoami(state: &AppState) -> anyhow::Result<String> {
    if state.screen().await == Screen::SignedOut {
        return Ok(render_screen(&Screen::SignedOut));
    }
    match state.api.profile().await {
        Ok(profile) => {
            let mut lines = vec![render_screen(&state.screen().await)];
            if let Some(email) = profile.user.email.filter(|e| !e.is_empty()) {
                lines.push(format!("Email: {email}"));
            }
            lines.push(format!("Contacts: {}", profile.stats.total));
            Ok(lines.join("\n"))
        }
        // The refresh flow has already cleared the session.
        Err(err @ ApiError::Rejected { status: 401, .. }) => {
            tracing::debug!(error = %err, "profile rejected");
            Ok(render_screen(&state.screen().await))
        }
        Err(err) => Err(err.into()),
    }
}
