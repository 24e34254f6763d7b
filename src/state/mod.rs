mod app_state;
mod secret_manager;
mod session_store;

pub use app_state::{AppState, StartupError};
pub use secret_manager::{SecretError, SecretManager};
pub use session_store::{
    AuthStatus, KeyringPersistence, NoPersistence, SessionPersistence, SessionStore,
};
