use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    #[serde(rename = "kullanici_adi")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Credentials and identity of the signed-in user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some() && self.current_user.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.current_user.is_none()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |token: &Option<String>| token.as_ref().map(|_| "REDACTED");
        f.debug_struct("Session")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .field("current_user", &self.current_user)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub id: i64,
    #[serde(rename = "isim")]
    pub first_name: String,
    #[serde(rename = "soyisim", default)]
    pub last_name: Option<String>,
    #[serde(rename = "tam_isim", default)]
    pub full_name: String,
    #[serde(rename = "eposta", default)]
    pub email: Option<String>,
    #[serde(rename = "telefon", default)]
    pub phone: Option<String>,
    #[serde(rename = "adres", default)]
    pub address: Option<String>,
    #[serde(rename = "enlem", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "boylam", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "favori", default)]
    pub favorite: bool,
    #[serde(rename = "etiketler", default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(rename = "kullanici_id", default)]
    pub owner_id: Option<i64>,
    #[serde(rename = "isim")]
    pub first_name: String,
    #[serde(rename = "soyisim", default)]
    pub last_name: Option<String>,
    #[serde(rename = "tam_isim", default)]
    pub full_name: String,
    #[serde(rename = "eposta", default)]
    pub email: Option<String>,
    #[serde(rename = "telefon", default)]
    pub phone: Option<String>,
    #[serde(rename = "telefon_2", default)]
    pub phone_2: Option<String>,
    #[serde(rename = "adres", default)]
    pub address: Option<String>,
    #[serde(rename = "enlem", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "boylam", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "sehir", default)]
    pub city: Option<String>,
    #[serde(rename = "ulke", default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email_valid: Option<bool>,
    #[serde(default)]
    pub email_type: Option<String>,
    #[serde(default)]
    pub phone_country: Option<String>,
    #[serde(default)]
    pub phone_carrier: Option<String>,
    #[serde(default)]
    pub phone_type: Option<String>,
    #[serde(default)]
    pub social_profiles: Option<Value>,
    #[serde(rename = "notlar", default)]
    pub notes: Option<String>,
    #[serde(rename = "etiketler", default)]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "favori", default)]
    pub favorite: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub enriched_at: Option<String>,
}

/// Request body for creating or updating a contact. Absent values are sent
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDraft {
    #[serde(rename = "isim")]
    pub first_name: String,
    #[serde(rename = "soyisim")]
    pub last_name: Option<String>,
    #[serde(rename = "eposta")]
    pub email: Option<String>,
    #[serde(rename = "telefon")]
    pub phone: Option<String>,
    #[serde(rename = "telefon_2")]
    pub phone_2: Option<String>,
    #[serde(rename = "adres")]
    pub address: Option<String>,
    #[serde(rename = "sehir")]
    pub city: Option<String>,
    #[serde(rename = "ulke")]
    pub country: Option<String>,
    #[serde(rename = "etiketler")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "notlar")]
    pub notes: Option<String>,
    #[serde(rename = "favori")]
    pub favorite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(rename = "mevcut_sayfa", default)]
    pub current_page: u32,
    #[serde(rename = "toplam_sayfa", default)]
    pub total_pages: u32,
    #[serde(rename = "toplam_kayit", default)]
    pub total_records: u64,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactListResponse {
    #[serde(rename = "kisiler", default)]
    pub contacts: Vec<ContactSummary>,
    #[serde(rename = "sayfalama", default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactEnvelope {
    #[serde(rename = "kisi")]
    pub contact: Contact,
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    #[serde(rename = "toplam_kisi", default)]
    pub total: u64,
    #[serde(rename = "favori_kisi", default)]
    pub favorites: u64,
    #[serde(rename = "konumlu_kisi", default)]
    pub with_location: u64,
    #[serde(rename = "epostali_kisi", default)]
    pub with_email: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: i64,
    #[serde(rename = "tam_isim", default)]
    pub full_name: String,
    #[serde(rename = "adres", default)]
    pub address: Option<String>,
    #[serde(rename = "enlem")]
    pub latitude: f64,
    #[serde(rename = "boylam")]
    pub longitude: f64,
    #[serde(rename = "etiketler", default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapMarkersResponse {
    #[serde(default)]
    pub markers: Vec<MapMarker>,
    #[serde(rename = "toplam", default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(rename = "etiketler", default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailExportResponse {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(rename = "toplam", default)]
    pub total: u64,
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "kullanici_adi")]
    pub username: &'a str,
    #[serde(rename = "sifre")]
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    #[serde(rename = "kullanici_adi")]
    pub username: &'a str,
    pub email: Option<&'a str>,
    #[serde(rename = "sifre")]
    pub password: &'a str,
}

#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "kullanici")]
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
    #[serde(rename = "kullanici")]
    pub user: CurrentUser,
}

#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(rename = "kullanici")]
    pub user: CurrentUser,
    #[serde(rename = "istatistikler", default)]
    pub stats: ContactStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteToggleResponse {
    #[serde(rename = "favori")]
    pub favorite: bool,
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
}

/// Result of an enrichment or location lookup. The payload is produced by
/// third-party providers and passed through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpaqueResult {
    #[serde(rename = "mesaj", default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_list_response_tolerates_null_tags_and_missing_pagination() {
        let json = r#"{"kisiler":[{"id":3,"isim":"Ada","soyisim":null,"tam_isim":"Ada","etiketler":null,"favori":true}]}"#;
        let parsed: ContactListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.contacts.len(), 1);
        assert!(parsed.contacts[0].favorite);
        assert_eq!(parsed.contacts[0].tags, None);
        assert!(parsed.pagination.is_none());
    }

    #[test]
    fn contact_draft_serializes_absent_fields_as_null() {
        let draft = ContactDraft {
            first_name: "Ada".to_string(),
            last_name: None,
            email: Some("ada@example.com".to_string()),
            phone: None,
            phone_2: None,
            address: None,
            city: None,
            country: Some("Türkiye".to_string()),
            tags: None,
            notes: None,
            favorite: false,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["isim"], "Ada");
        assert!(value["soyisim"].is_null());
        assert!(value["etiketler"].is_null());
        assert_eq!(value["ulke"], "Türkiye");
        assert_eq!(value["favori"], false);
    }

    #[test]
    fn session_debug_hides_tokens() {
        let session = Session {
            access_token: Some("T1".to_string()),
            refresh_token: Some("R1".to_string()),
            current_user: None,
        };
        let printed = format!("{session:?}");
        assert!(!printed.contains("T1"));
        assert!(!printed.contains("R1"));
        assert!(printed.contains("REDACTED"));
    }
}
