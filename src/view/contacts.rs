use crate::types::ContactSummary;

pub const EMPTY_CONTACTS_MESSAGE: &str = "No contacts yet, or nothing matched your search";
pub const ADDRESS_PREVIEW_CHARS: usize = 40;

/// Upper-cased first letters of name and surname.
pub fn initials(first_name: &str, last_name: Option<&str>) -> String {
    let mut out: String = first_name.chars().take(1).flat_map(char::to_uppercase).collect();
    if let Some(last) = last_name {
        out.extend(last.chars().take(1).flat_map(char::to_uppercase));
    }
    out
}

pub fn address_preview(address: &str) -> String {
    if address.chars().count() <= ADDRESS_PREVIEW_CHARS {
        return address.to_string();
    }
    let head: String = address.chars().take(ADDRESS_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactCard {
    pub id: i64,
    pub initials: String,
    pub full_name: String,
    pub favorite: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tags: Vec<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

pub fn contact_card(contact: &ContactSummary) -> ContactCard {
    let full_name = if contact.full_name.trim().is_empty() {
        match contact.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", contact.first_name),
            _ => contact.first_name.clone(),
        }
    } else {
        contact.full_name.clone()
    };

    ContactCard {
        id: contact.id,
        initials: initials(
            &contact.first_name,
            contact.last_name.as_deref().filter(|s| !s.is_empty()),
        ),
        full_name,
        favorite: contact.favorite,
        email: present(&contact.email),
        phone: present(&contact.phone),
        address: present(&contact.address).map(|a| address_preview(&a)),
        tags: contact.tags.clone().unwrap_or_default(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageButton {
    Previous { target: u32, disabled: bool },
    Page { number: u32, active: bool },
    Gap,
    Next { target: u32, disabled: bool },
}

/// Buttons for a pager over `total_pages`. Empty when there is nothing to page.
///
/// The first and last pages and those within two of `current` get a button;
/// pages exactly three away collapse into a gap.
pub fn pagination_buttons(current: u32, total_pages: u32) -> Vec<PageButton> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let mut buttons = vec![PageButton::Previous {
        target: current.saturating_sub(1).max(1),
        disabled: current == 1,
    }];
    let lo = current.saturating_sub(3).max(1);
    let hi = current.saturating_add(3).min(total_pages);
    let mut pages: Vec<u32> = std::iter::once(1)
        .chain(lo..=hi)
        .chain(std::iter::once(total_pages))
        .collect();
    pages.dedup();
    for page in pages {
        let distance = page.abs_diff(current);
        if page == 1 || page == total_pages || distance <= 2 {
            buttons.push(PageButton::Page {
                number: page,
                active: page == current,
            });
        } else if distance == 3 {
            buttons.push(PageButton::Gap);
        }
    }
    buttons.push(PageButton::Next {
        target: current.saturating_add(1).min(total_pages),
        disabled: current == total_pages,
    });
    buttons
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactListView {
    Empty {
        message: &'static str,
    },
    Cards {
        cards: Vec<ContactCard>,
        pagination: Vec<PageButton>,
        total_records: u64,
    },
    Error {
        message: String,
        can_retry: bool,
    },
}

impl ContactListView {
    pub fn cards(&self) -> &[ContactCard] {
        match self {
            Self::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn pagination(&self) -> &[PageButton] {
        match self {
            Self::Cards { pagination, .. } => pagination,
            _ => &[],
        }
    }
}

pub fn contact_list_view(
    items: &[ContactSummary],
    current_page: u32,
    total_pages: u32,
    total_records: u64,
) -> ContactListView {
    if items.is_empty() {
        return ContactListView::Empty {
            message: EMPTY_CONTACTS_MESSAGE,
        };
    }
    ContactListView::Cards {
        cards: items.iter().map(contact_card).collect(),
        pagination: pagination_buttons(current_page, total_pages),
        total_records,
    }
}
