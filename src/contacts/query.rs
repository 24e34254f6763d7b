use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Contacts shown per page unless the user picked another size.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// The backend silently caps larger limits at this value.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Phone,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Name => "isim",
            Self::Email => "eposta",
            Self::Phone => "telefon",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field `{0}` (expected isim, eposta, telefon, created_at or updated_at)")]
pub struct ParseSortError(pub String);

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "isim" | "name" => Ok(Self::Name),
            "eposta" | "email" => Ok(Self::Email),
            "telefon" | "phone" => Ok(Self::Phone),
            "created_at" | "created" => Ok(Self::CreatedAt),
            "updated_at" | "updated" => Ok(Self::UpdatedAt),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// What the user narrowed the contact list down to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilters {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub favorites_only: bool,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl ContactFilters {
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            ..Self::default()
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn clamp_page_size(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Builds the `/kisiler` path for one page of contacts.
pub fn build_contacts_query(filters: &ContactFilters, page: u32, limit: u32) -> String {
    let mut params = vec![
        format!("sayfa={}", page.max(1)),
        format!("limit={}", clamp_page_size(limit)),
        format!("sirala={}", filters.sort.as_param()),
    ];
    if filters.direction == SortDirection::Descending {
        params.push("sira_yonu=desc".to_string());
    }
    if let Some(search) = non_blank(&filters.search) {
        params.push(format!("arama={}", urlencoding::encode(search)));
    }
    if let Some(tag) = non_blank(&filters.tag) {
        params.push(format!("etiket={}", urlencoding::encode(tag)));
    }
    if filters.favorites_only {
        params.push("favori=true".to_string());
    }
    format!("/kisiler?{}", params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_pages_by_name() {
        let path = build_contacts_query(&ContactFilters::default(), 1, DEFAULT_PAGE_SIZE);
        assert_eq!(path, "/kisiler?sayfa=1&limit=12&sirala=isim");
    }

    #[test]
    fn every_filter_is_encoded() {
        let filters = ContactFilters {
            search: Some("  Ayşe Yılmaz ".to_string()),
            tag: Some("iş&aile".to_string()),
            favorites_only: true,
            sort: SortField::CreatedAt,
            direction: SortDirection::Descending,
        };
        let path = build_contacts_query(&filters, 3, 500);
        assert_eq!(
            path,
            "/kisiler?sayfa=3&limit=100&sirala=created_at&sira_yonu=desc\
             &arama=Ay%C5%9Fe%20Y%C4%B1lmaz&etiket=i%C5%9F%26aile&favori=true"
        );
    }

    #[test]
    fn blank_search_and_page_zero_are_normalised() {
        let filters = ContactFilters {
            search: Some("   ".to_string()),
            ..ContactFilters::default()
        };
        assert_eq!(
            build_contacts_query(&filters, 0, 0),
            "/kisiler?sayfa=1&limit=1&sirala=isim"
        );
    }

    #[test]
    fn sort_field_parses_wire_and_english_names() {
        assert_eq!("eposta".parse::<SortField>().unwrap(), SortField::Email);
        assert_eq!("Phone".parse::<SortField>().unwrap(), SortField::Phone);
        assert_eq!("updated_at".parse::<SortField>().unwrap(), SortField::UpdatedAt);
        assert_eq!(
            "age".parse::<SortField>().unwrap_err(),
            ParseSortError("age".to_string())
        );
    }
}
