//! In-process stand-in for the Rehber backend, used by the unit tests.

use crate::refresh::REFRESH_PATH;
use crate::state::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use crate::types::{CurrentUser, Session};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

const PUBLIC_PATHS: [&str; 3] = ["/giris", "/kayit", "/health"];

pub(crate) fn user() -> CurrentUser {
    CurrentUser {
        id: 1,
        username: "ayse".to_string(),
        email: Some("ayse@example.com".to_string()),
        created_at: Some("2025-01-02T10:00:00".to_string()),
        is_active: true,
    }
}

pub(crate) fn signed_in_store(access_token: &str, refresh_token: &str) -> SessionStore {
    SessionStore::with_session(
        Session {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
            current_user: Some(user()),
        },
        Arc::new(crate::state::NoPersistence),
    )
}

fn path_only(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

struct Gate {
    path: String,
    remaining: usize,
    barrier: Arc<Barrier>,
}

struct BackendState {
    valid_access: Option<String>,
    issue_access: String,
    valid_refresh: String,
    routes: HashMap<String, (StatusCode, String)>,
    failing: HashSet<String>,
    requests: Vec<ApiRequest>,
    gate: Option<Gate>,
}

/// Accepts one access token at a time. Presenting `valid_refresh` to
/// `/token/refresh` makes `issue_access` the accepted token.
pub(crate) struct FakeBackend {
    state: Mutex<BackendState>,
}

impl FakeBackend {
    pub(crate) fn new(issue_access: &str, valid_refresh: &str) -> Self {
        Self {
            state: Mutex::new(BackendState {
                valid_access: None,
                issue_access: issue_access.to_string(),
                valid_refresh: valid_refresh.to_string(),
                routes: HashMap::new(),
                failing: HashSet::new(),
                requests: Vec::new(),
                gate: None,
            }),
        }
    }

    pub(crate) fn accept_access(&self, token: &str) {
        self.state.lock().unwrap().valid_access = Some(token.to_string());
    }

    pub(crate) fn respond(&self, path: &str, status: StatusCode, body: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), (status, body.into()));
    }

    pub(crate) fn fail(&self, path: &str) {
        self.state.lock().unwrap().failing.insert(path.to_string());
    }

    /// Holds the first `count` requests to `path` until all of them have arrived.
    pub(crate) fn hold_until_all_arrive(&self, path: &str, count: usize) {
        self.state.lock().unwrap().gate = Some(Gate {
            path: path.to_string(),
            remaining: count,
            barrier: Arc::new(Barrier::new(count)),
        });
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| path_only(&r.path) == path)
            .collect()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    fn route(state: &BackendState, path: &str) -> ApiResponse {
        state
            .routes
            .get(path)
            .or_else(|| state.routes.get(path_only(path)))
            .map(|(status, body)| ApiResponse::new(*status, body.clone()))
            .unwrap_or_else(|| ApiResponse::new(StatusCode::NOT_FOUND, r#"{"error":"Bulunamadı"}"#))
    }

    fn answer(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        let path = request.path.as_str();

        if state.failing.contains(path) || state.failing.contains(path_only(path)) {
            return Err(TransportError::Network("connection refused".to_string()));
        }

        if path_only(path) == REFRESH_PATH {
            if state.routes.contains_key(REFRESH_PATH) {
                return Ok(Self::route(&state, path));
            }
            if request.bearer() == Some(state.valid_refresh.as_str()) {
                let issued = state.issue_access.clone();
                state.valid_access = Some(issued.clone());
                return Ok(ApiResponse::new(
                    StatusCode::OK,
                    format!(r#"{{"access_token":"{issued}"}}"#),
                ));
            }
            return Ok(ApiResponse::new(
                StatusCode::UNAUTHORIZED,
                r#"{"error":"Yetkisiz erişim"}"#,
            ));
        }

        if PUBLIC_PATHS.contains(&path_only(path)) {
            return Ok(Self::route(&state, path));
        }

        let authorized = matches!(
            (request.bearer(), state.valid_access.as_deref()),
            (Some(presented), Some(valid)) if presented == valid
        );
        if !authorized {
            return Ok(ApiResponse::new(
                StatusCode::UNAUTHORIZED,
                r#"{"error":"Yetkisiz erişim","message":"Giriş yapmanız gerekiyor"}"#,
            ));
        }
        Ok(Self::route(&state, path))
    }
}

#[async_trait]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let barrier = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            match state.gate.as_mut() {
                Some(gate) if gate.remaining > 0 && path_only(&request.path) == gate.path => {
                    gate.remaining -= 1;
                    Some(gate.barrier.clone())
                }
                _ => None,
            }
        };
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        self.answer(request)
    }
}
