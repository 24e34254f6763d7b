mod controller;
mod form;
mod query;

pub use controller::{ContactListState, ContactsController};
pub use form::{split_tags, ContactForm, FormError, DEFAULT_COUNTRY};
pub use query::{
    build_contacts_query, clamp_page_size, ContactFilters, ParseSortError, SortDirection,
    SortField, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
