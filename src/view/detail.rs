use crate::types::Contact;
use chrono::{DateTime, Local, NaiveDateTime};

const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// `dd.mm.yyyy hh:mm`, `-` when absent. Values that do not parse are shown as sent.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }
    // The backend sends naive ISO timestamps, with or without fractional seconds.
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DATE_FORMAT).to_string();
        }
    }
    raw.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: impl Into<String>) -> DetailRow {
    DetailRow {
        label,
        value: value.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetailView {
    pub id: i64,
    pub title: String,
    pub rows: Vec<DetailRow>,
}

pub fn contact_detail(contact: &Contact) -> ContactDetailView {
    let filled = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    let mut rows = vec![row("Name", contact.first_name.clone())];

    if let Some(v) = filled(&contact.last_name) {
        rows.push(row("Surname", v));
    }
    if let Some(v) = filled(&contact.email) {
        rows.push(row("Email", v));
    }
    if let Some(v) = filled(&contact.phone) {
        rows.push(row("Phone", v));
    }
    if let Some(v) = filled(&contact.phone_2) {
        rows.push(row("Phone 2", v));
    }
    if let Some(v) = filled(&contact.address) {
        rows.push(row("Address", v));
    }
    let location: Vec<String> = [filled(&contact.city), filled(&contact.country)]
        .into_iter()
        .flatten()
        .collect();
    if !location.is_empty() {
        rows.push(row("Location", location.join(", ")));
    }
    if let Some(tags) = contact.tags.as_ref().filter(|t| !t.is_empty()) {
        rows.push(row("Tags", tags.join(", ")));
    }
    if let Some(v) = filled(&contact.notes) {
        rows.push(row("Notes", v));
    }

    rows.push(row("Favorite", if contact.favorite { "★ Yes" } else { "No" }));
    rows.push(row("Added", format_timestamp(contact.created_at.as_deref())));
    rows.push(row("Updated", format_timestamp(contact.updated_at.as_deref())));

    let title = if contact.full_name.trim().is_empty() {
        contact.first_name.clone()
    } else {
        contact.full_name.clone()
    };

    ContactDetailView {
        id: contact.id,
        title,
        rows,
    }
}
