use crate::types::{Contact, ContactDraft};
use thiserror::Error;

pub const DEFAULT_COUNTRY: &str = "Türkiye";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("name is required")]
    MissingName,
}

/// Raw text of the add/edit contact form, before any cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_2: String,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Comma separated.
    pub tags: String,
    pub notes: String,
    pub favorite: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            phone_2: String::new(),
            address: String::new(),
            city: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            tags: String::new(),
            notes: String::new(),
            favorite: false,
        }
    }
}

fn cleaned(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl ContactForm {
    /// Pre-fills the form for editing an existing contact.
    pub fn from_contact(contact: &Contact) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            first_name: contact.first_name.clone(),
            last_name: text(&contact.last_name),
            email: text(&contact.email),
            phone: text(&contact.phone),
            phone_2: text(&contact.phone_2),
            address: text(&contact.address),
            city: text(&contact.city),
            country: contact
                .country
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            tags: contact.tags.as_deref().unwrap_or_default().join(", "),
            notes: text(&contact.notes),
            favorite: contact.favorite,
        }
    }

    pub fn to_draft(&self) -> Result<ContactDraft, FormError> {
        let first_name = cleaned(&self.first_name).ok_or(FormError::MissingName)?;
        let tags = split_tags(&self.tags);
        Ok(ContactDraft {
            first_name,
            last_name: cleaned(&self.last_name),
            email: cleaned(&self.email),
            phone: cleaned(&self.phone),
            phone_2: cleaned(&self.phone_2),
            address: cleaned(&self.address),
            city: cleaned(&self.city),
            country: cleaned(&self.country),
            tags: (!tags.is_empty()).then_some(tags),
            notes: cleaned(&self.notes),
            favorite: self.favorite,
        })
    }
}
