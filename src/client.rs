use crate::refresh::{
    should_refresh, RefreshCoordinator, RefreshOutcome, RetryBudget, MAX_AUTH_RETRIES,
};
use crate::state::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Per-call options. Everything is optional; the method defaults to GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: Some(Method::POST),
            body,
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Some(Method::PUT),
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Some(Method::DELETE),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

fn build_request(path: &str, options: &RequestOptions, access_token: Option<&str>) -> ApiRequest {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = access_token {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(AUTHORIZATION, value);
        }
    }

    // Caller-supplied headers win on conflict.
    for name in options.headers.keys() {
        headers.remove(name);
    }
    for (name, value) in options.headers.iter() {
        headers.append(name.clone(), value.clone());
    }

    ApiRequest {
        path: path.to_string(),
        method: options.method.clone().unwrap_or(Method::GET),
        headers,
        body: options.body.clone(),
    }
}

/// Authenticated access to the Rehber API.
///
/// Every call carries the current access token. A 401 is answered with one
/// token refresh and one re-issue of the same request; whatever comes back
/// from the re-issue is returned as is.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    refresher: RefreshCoordinator,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        let refresher = RefreshCoordinator::new(transport.clone(), session.clone());
        Self {
            transport,
            session,
            refresher,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        let mut budget = RetryBudget::new(MAX_AUTH_RETRIES);
        let mut access_token = self.session.access_token().await;

        loop {
            let request = build_request(path, &options, access_token.as_deref());
            let response = self.transport.send(&request).await?;
            tracing::debug!(
                method = %request.method,
                path,
                status = response.status.as_u16(),
                "request completed"
            );

            let has_refresh_token = self.session.refresh_token().await.is_some();
            if !should_refresh(response.status, has_refresh_token, path) || !budget.try_consume() {
                return Ok(response);
            }

            match self.refresher.refresh_after(access_token.as_deref()).await {
                RefreshOutcome::Refreshed(token) => {
                    tracing::debug!(path, "retrying with refreshed access token");
                    access_token = Some(token);
                }
                RefreshOutcome::Failed => return Ok(response),
            }
        }
    }
}
