use super::secret_manager::{
    SecretError, SecretManager, KEYRING_USER_ACCESS_TOKEN, KEYRING_USER_REFRESH_TOKEN,
};
use crate::settings::{SettingsStore, KEY_CURRENT_USER};
use crate::types::{CurrentUser, Session};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    SignedIn,
    SignedOut,
}

impl AuthStatus {
    fn of(session: &Session) -> Self {
        if session.is_signed_in() {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }
}

/// Where a session is kept between runs.
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Result<Session, SecretError>;
    fn save(&self, session: &Session) -> Result<(), SecretError>;
    fn clear(&self);
}

/// Keeps nothing; every run starts signed out.
#[derive(Debug, Default)]
pub struct NoPersistence;

impl SessionPersistence for NoPersistence {
    fn load(&self) -> Result<Session, SecretError> {
        Ok(Session::default())
    }

    fn save(&self, _session: &Session) -> Result<(), SecretError> {
        Ok(())
    }

    fn clear(&self) {}
}

/// Tokens in the OS keyring, the user record in the settings file.
#[derive(Debug, Clone)]
pub struct KeyringPersistence {
    access: SecretManager,
    refresh: SecretManager,
    settings: SettingsStore,
}

impl KeyringPersistence {
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            access: SecretManager::new(KEYRING_USER_ACCESS_TOKEN),
            refresh: SecretManager::new(KEYRING_USER_REFRESH_TOKEN),
            settings,
        }
    }

    pub fn is_available(&self) -> bool {
        self.access.is_available()
    }

    fn store_token(secret: &SecretManager, value: Option<&str>) -> Result<(), SecretError> {
        match value {
            Some(value) => secret.set(value),
            None => {
                secret.delete();
                Ok(())
            }
        }
    }
}

impl SessionPersistence for KeyringPersistence {
    fn load(&self) -> Result<Session, SecretError> {
        Ok(Session {
            access_token: self.access.get()?,
            refresh_token: self.refresh.get()?,
            current_user: self.settings.get_json::<CurrentUser>(KEY_CURRENT_USER),
        })
    }

    fn save(&self, session: &Session) -> Result<(), SecretError> {
        Self::store_token(&self.access, session.access_token.as_deref())?;
        Self::store_token(&self.refresh, session.refresh_token.as_deref())?;
        let written = match &session.current_user {
            Some(user) => self.settings.set_json(KEY_CURRENT_USER, user),
            None => self.settings.remove(KEY_CURRENT_USER),
        };
        written.map_err(|e| SecretError::Write(e.to_string()))
    }

    fn clear(&self) {
        self.access.delete();
        self.refresh.delete();
        if let Err(e) = self.settings.remove(KEY_CURRENT_USER) {
            tracing::warn!(error = %e, "failed to forget current user");
        }
    }
}

/// Sole owner of the [`Session`]. Every other component reads credentials
/// through it and changes them only through its methods.
pub struct SessionStore {
    session: Mutex<Session>,
    persistence: Arc<dyn SessionPersistence>,
    status: watch::Sender<AuthStatus>,
}

impl SessionStore {
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self::with_session(Session::default(), persistence)
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(NoPersistence))
    }

    pub fn with_session(session: Session, persistence: Arc<dyn SessionPersistence>) -> Self {
        let (status, _) = watch::channel(AuthStatus::of(&session));
        Self {
            session: Mutex::new(session),
            persistence,
            status,
        }
    }

    /// Restores whatever the persistence layer kept from a previous run.
    pub fn restore(persistence: Arc<dyn SessionPersistence>) -> Self {
        let session = match persistence.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not restore saved session");
                Session::default()
            }
        };
        tracing::debug!(signed_in = session.is_signed_in(), "session restored");
        Self::with_session(session, persistence)
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.lock().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.session.lock().await.refresh_token.clone()
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.session.lock().await.current_user.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.lock().await.is_signed_in()
    }

    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    pub async fn establish(&self, access_token: String, refresh_token: String, user: CurrentUser) {
        let session = Session {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            current_user: Some(user),
        };
        self.replace(session).await;
    }

    /// Stores a refreshed access token. The refresh token and user stay as they are.
    pub async fn set_access_token(&self, access_token: String) {
        let mut guard = self.session.lock().await;
        guard.access_token = Some(access_token);
        self.persist(&guard);
        self.publish(&guard);
    }

    /// Persistence runs under the session lock so the stored copy never
    /// lags behind a concurrent logout.
    pub async fn logout(&self) {
        let mut guard = self.session.lock().await;
        *guard = Session::default();
        self.persistence.clear();
        self.status.send_replace(AuthStatus::SignedOut);
        drop(guard);
        tracing::info!("session cleared");
    }

    async fn replace(&self, session: Session) {
        let mut guard = self.session.lock().await;
        *guard = session;
        self.persist(&guard);
        // A new session always notifies, even when the status stays signed in.
        self.status.send_replace(AuthStatus::of(&guard));
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.persistence.save(session) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    fn publish(&self, session: &Session) {
        let next = AuthStatus::of(session);
        self.status.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
