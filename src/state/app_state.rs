use super::{KeyringPersistence, NoPersistence, SessionPersistence, SessionStore};
use crate::client::ApiClient;
use crate::config::Config;
use crate::contacts::{clamp_page_size, ContactsController, SortField, DEFAULT_PAGE_SIZE};
use crate::rehber::RehberApi;
use crate::settings::{SettingsError, SettingsStore, KEY_PAGE_SIZE, KEY_SORT_BY};
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};
use crate::view::{screen_for, Screen};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("could not build http client: {0}")]
    Transport(#[from] TransportError),
}

/// Everything a command needs, wired once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsStore,
    pub session: Arc<SessionStore>,
    pub api: RehberApi,
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let data_dir = config.data_dir();
        let settings = SettingsStore::open(&data_dir)?;

        let persistence: Arc<dyn SessionPersistence> = if config.no_keyring {
            Arc::new(NoPersistence)
        } else {
            let keyring = KeyringPersistence::new(settings.clone());
            if keyring.is_available() {
                Arc::new(keyring)
            } else {
                tracing::warn!("OS keychain/secret service is unavailable, session will not be kept");
                Arc::new(NoPersistence)
            }
        };
        let session = Arc::new(SessionStore::restore(persistence));

        let transport = ReqwestTransport::new(
            &config.api_url,
            config.http.request_timeout(),
            config.http.connect_timeout(),
        )?;
        tracing::debug!(api_url = %config.api_url, data_dir = %data_dir.display(), "app state ready");

        Ok(Self::assemble(settings, session, Arc::new(transport), data_dir))
    }

    pub fn assemble(
        settings: SettingsStore,
        session: Arc<SessionStore>,
        transport: Arc<dyn HttpTransport>,
        data_dir: PathBuf,
    ) -> Self {
        let client = Arc::new(ApiClient::new(transport, session.clone()));
        Self {
            settings,
            session,
            api: RehberApi::new(client),
            data_dir,
        }
    }

    pub fn page_size(&self) -> u32 {
        let stored = self.settings.get_u64(KEY_PAGE_SIZE, u64::from(DEFAULT_PAGE_SIZE));
        clamp_page_size(u32::try_from(stored).unwrap_or(u32::MAX))
    }

    pub fn default_sort(&self) -> SortField {
        self.settings
            .get_string(KEY_SORT_BY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn contacts_controller(&self) -> ContactsController {
        ContactsController::new(self.api.clone()).with_page_size(self.page_size())
    }

    pub async fn screen(&self) -> Screen {
        screen_for(&self.session.snapshot().await)
    }
}
