//! State to view-model transformations. Nothing here touches the network.

mod contacts;
mod dashboard;
mod detail;
mod screen;
pub mod text;

pub use contacts::{
    address_preview, contact_card, contact_list_view, initials, pagination_buttons, ContactCard,
    ContactListView, PageButton, EMPTY_CONTACTS_MESSAGE,
};
pub use dashboard::{
    dashboard, fit_bounds, map_view, DashboardView, MapBounds, MapPin, MapView, RecentContacts,
    DEFAULT_MAP_CENTER,
};
pub use detail::{contact_detail, format_timestamp, ContactDetailView, DetailRow};
pub use screen::{screen_for, Screen};
