use crate::client::{ApiClient, RequestOptions};
use crate::contacts::{build_contacts_query, ContactFilters};
use crate::transport::{ApiResponse, TransportError};
use crate::types::{
  Contact, ContactDraft, ContactEnvelope, ContactListResponse, ContactStats, CurrentUser,
  EmailExportResponse, FavoriteToggleResponse, HealthResponse, LoginRequest, LoginResponse,
  MapMarkersResponse, MessageResponse, OpaqueResult, ProfileResponse, RegisterRequest,
  RegisterResponse, TagsResponse,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

const RECENT_CONTACTS_PATH: &str = "/kisiler?limit=5&sirala=created_at&sira_yonu=desc";

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Transport(#[from] TransportError),
  #[error("{message} (HTTP {status})")]
  Rejected { status: u16, message: String },
  #[error("unexpected response body: {0}")]
  Malformed(#[from] serde_json::Error),
}

impl ApiError {
  pub fn is_unauthorized(&self) -> bool {
    matches!(self, Self::Rejected { status: 401, .. })
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Rejected { status, .. } => Some(*status),
      _ => None,
    }
  }
}

fn generic_message(status: StatusCode) -> String {
  match status {
    StatusCode::UNAUTHORIZED => "Unauthorized".to_string(),
    StatusCode::NOT_FOUND => "Not found".to_string(),
    StatusCode::TOO_MANY_REQUESTS => "Too many requests".to_string(),
    s if s.is_server_error() => "Server error".to_string(),
    s => format!("Request failed with status {}", s.as_u16()),
  }
}

fn expect_success(res: ApiResponse) -> Result<ApiResponse, ApiError> {
  if res.is_success() {
    return Ok(res);
  }
  let message = res
    .error_message()
    .unwrap_or_else(|| generic_message(res.status));
  Err(ApiError::Rejected {
    status: res.status.as_u16(),
    message,
  })
}

fn parse<T: DeserializeOwned>(res: ApiResponse) -> Result<T, ApiError> {
  let res = expect_success(res)?;
  Ok(res.json()?)
}

/// Typed calls for every backend endpoint the dashboard uses.
#[derive(Clone)]
pub struct RehberApi {
  client: Arc<ApiClient>,
}

impl RehberApi {
  pub fn new(client: Arc<ApiClient>) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &Arc<ApiClient> {
    &self.client
  }

  async fn call<T: DeserializeOwned>(
    &self,
    path: &str,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    let res = self.client.request(path, options).await?;
    parse(res)
  }

  pub async fn health(&self) -> Result<HealthResponse, ApiError> {
    self.call("/health", RequestOptions::get()).await
  }

  /// Signs in and replaces whatever session was held before.
  pub async fn login(&self, username: &str, password: &str) -> Result<CurrentUser, ApiError> {
    let body = serde_json::to_value(LoginRequest {
      username: username.trim(),
      password,
    })?;
    let res: LoginResponse = self.call("/giris", RequestOptions::post(Some(body))).await?;
    let user = res.user.clone();
    self
      .client
      .session()
      .establish(res.access_token, res.refresh_token, res.user)
      .await;
    tracing::info!(user_id = user.id, "signed in");
    Ok(user)
  }

  pub async fn register(
    &self,
    username: &str,
    email: Option<&str>,
    password: &str,
  ) -> Result<RegisterResponse, ApiError> {
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let body = serde_json::to_value(RegisterRequest {
      username: username.trim(),
      email,
      password,
    })?;
    self.call("/kayit", RequestOptions::post(Some(body))).await
  }

  /// The backend keeps no server-side session, so this only forgets local credentials.
  pub async fn logout(&self) {
    self.client.session().logout().await;
  }

  pub async fn profile(&self) -> Result<ProfileResponse, ApiError> {
    self.call("/profil", RequestOptions::get()).await
  }

  pub async fn list_contacts(
    &self,
    filters: &ContactFilters,
    page: u32,
    limit: u32,
  ) -> Result<ContactListResponse, ApiError> {
    let path = build_contacts_query(filters, page, limit);
    self.call(&path, RequestOptions::get()).await
  }

  pub async fn recent_contacts(&self) -> Result<ContactListResponse, ApiError> {
    self.call(RECENT_CONTACTS_PATH, RequestOptions::get()).await
  }

  pub async fn contact(&self, id: i64) -> Result<Contact, ApiError> {
    let res: ContactEnvelope = self.call(&format!("/kisi/{id}"), RequestOptions::get()).await?;
    Ok(res.contact)
  }

  pub async fn find_contact(&self, name: &str) -> Result<Contact, ApiError> {
    let path = format!("/kisi/ara?isim={}", urlencoding::encode(name.trim()));
    let res: ContactEnvelope = self.call(&path, RequestOptions::get()).await?;
    Ok(res.contact)
  }

  pub async fn create_contact(&self, draft: &ContactDraft) -> Result<ContactEnvelope, ApiError> {
    let body = serde_json::to_value(draft)?;
    self.call("/kisi", RequestOptions::post(Some(body))).await
  }

  pub async fn update_contact(
    &self,
    id: i64,
    draft: &ContactDraft,
  ) -> Result<ContactEnvelope, ApiError> {
    let body = serde_json::to_value(draft)?;
    self
      .call(&format!("/kisi/{id}"), RequestOptions::put(body))
      .await
  }

  pub async fn delete_contact(&self, id: i64) -> Result<MessageResponse, ApiError> {
    self
      .call(&format!("/kisi/{id}"), RequestOptions::delete())
      .await
  }

  pub async fn toggle_favorite(&self, id: i64) -> Result<FavoriteToggleResponse, ApiError> {
    self
      .call(&format!("/kisi/{id}/favori"), RequestOptions::post(None))
      .await
  }

  pub async fn tags(&self) -> Result<Vec<String>, ApiError> {
    let res: TagsResponse = self
      .call("/kisiler/etiketler", RequestOptions::get())
      .await?;
    Ok(res.tags)
  }

  pub async fn stats(&self) -> Result<ContactStats, ApiError> {
    self
      .call("/kisiler/istatistikler", RequestOptions::get())
      .await
  }

  pub async fn map_markers(&self) -> Result<MapMarkersResponse, ApiError> {
    self.call("/kisiler/harita", RequestOptions::get()).await
  }

  pub async fn export_emails(&self) -> Result<EmailExportResponse, ApiError> {
    self.call("/emails/export", RequestOptions::get()).await
  }

  pub async fn enrich_contact(&self, id: i64) -> Result<OpaqueResult, ApiError> {
    self
      .call(&format!("/kisi/{id}/enrich"), RequestOptions::post(None))
      .await
  }

  pub async fn enrich_email(&self, email: &str) -> Result<OpaqueResult, ApiError> {
    let body = json!({ "email": email.trim() });
    self
      .call("/enrich/email", RequestOptions::post(Some(body)))
      .await
  }

  pub async fn enrich_phone(&self, phone: &str) -> Result<OpaqueResult, ApiError> {
    let body = json!({ "phone": phone.trim() });
    self
      .call("/enrich/phone", RequestOptions::post(Some(body)))
      .await
  }

  pub async fn proximity(
    &self,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
  ) -> Result<OpaqueResult, ApiError> {
    let path = format!("/kisiler/proximity?lat={latitude}&lng={longitude}&radius={radius_km}");
    self.call(&path, RequestOptions::get()).await
  }
}
