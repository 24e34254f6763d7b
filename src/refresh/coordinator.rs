use super::policy::REFRESH_PATH;
use crate::state::SessionStore;
use crate::transport::{ApiRequest, HttpTransport, TransportError};
use crate::types::RefreshResponse;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("refresh token is not a valid header value")]
    InvalidToken,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("refresh rejected with status {0}")]
    Rejected(u16),
    #[error("malformed refresh response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("refresh response carried an empty access token")]
    EmptyToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The session now holds this access token.
    Refreshed(String),
    /// The session has been cleared.
    Failed,
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed(_))
    }
}

/// Runs the refresh handshake against `/token/refresh`.
///
/// Handshakes are serialised behind `gate`. A caller that was rejected with a
/// token which has since been replaced picks up the replacement instead of
/// starting another handshake, so concurrent 401s cost one refresh.
pub struct RefreshCoordinator {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    gate: Mutex<()>,
}

impl RefreshCoordinator {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        Self {
            transport,
            session,
            gate: Mutex::new(()),
        }
    }

    /// Forces a handshake with the current refresh token.
    pub async fn refresh(&self) -> bool {
        let current = self.session.access_token().await;
        self.refresh_after(current.as_deref()).await.is_refreshed()
    }

    /// Obtains an access token newer than `rejected`, refreshing only if no
    /// other caller already did.
    pub async fn refresh_after(&self, rejected: Option<&str>) -> RefreshOutcome {
        let _gate = self.gate.lock().await;

        let session = self.session.snapshot().await;
        let Some(refresh_token) = session.refresh_token else {
            tracing::debug!("no refresh token left, skipping handshake");
            return RefreshOutcome::Failed;
        };
        if let Some(current) = session.access_token {
            if Some(current.as_str()) != rejected {
                tracing::debug!("access token already rotated by a concurrent refresh");
                return RefreshOutcome::Refreshed(current);
            }
        }

        match self.handshake(&refresh_token).await {
            Ok(access_token) => {
                self.session.set_access_token(access_token.clone()).await;
                tracing::info!("access token refreshed");
                RefreshOutcome::Refreshed(access_token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, signing out");
                self.session.logout().await;
                RefreshOutcome::Failed
            }
        }
    }

    async fn handshake(&self, refresh_token: &str) -> Result<String, RefreshError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {refresh_token}"))
            .map_err(|_| RefreshError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);

        let request = ApiRequest {
            path: REFRESH_PATH.to_string(),
            method: Method::POST,
            headers,
            body: None,
        };

        let res = self.transport.send(&request).await?;
        if !res.is_success() {
            return Err(RefreshError::Rejected(res.status.as_u16()));
        }

        let parsed: RefreshResponse = res.json()?;
        let token = parsed.access_token.trim();
        if token.is_empty() {
            return Err(RefreshError::EmptyToken);
        }
        Ok(token.to_string())
    }
}
