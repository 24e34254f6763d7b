use super::query::{clamp_page_size, ContactFilters, DEFAULT_PAGE_SIZE};
use crate::rehber::{ApiError, RehberApi};
use crate::state::AuthStatus;
use crate::types::ContactSummary;
use crate::view::{contact_list_view, ContactListView};
use tokio::sync::watch;

/// The page of contacts currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactListState {
    pub items: Vec<ContactSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub filters: ContactFilters,
}

/// Holds the contact list and reloads it in response to user actions.
///
/// Only a completed fetch changes the held state. A failed fetch renders an
/// error and leaves the previous page in place for the next render.
pub struct ContactsController {
    api: RehberApi,
    page_size: u32,
    state: Option<ContactListState>,
    last_attempt: Option<(ContactFilters, u32)>,
    auth: watch::Receiver<AuthStatus>,
}

impl ContactsController {
    pub fn new(api: RehberApi) -> Self {
        let auth = api.client().session().subscribe();
        Self {
            api,
            page_size: DEFAULT_PAGE_SIZE,
            state: None,
            last_attempt: None,
            auth,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn state(&mut self) -> Option<&ContactListState> {
        self.observe_session();
        self.state.as_ref()
    }

    /// Drops the cached page whenever the session has ended or been
    /// replaced since the last look, even if it is signed in again.
    fn observe_session(&mut self) {
        if !matches!(self.auth.has_changed(), Ok(true)) {
            return;
        }
        let status = *self.auth.borrow_and_update();
        if self.state.is_some() || self.last_attempt.is_some() {
            tracing::debug!(?status, "session changed, dropping cached contacts");
        }
        self.state = None;
        self.last_attempt = None;
    }

    pub async fn load_contacts(&mut self, filters: ContactFilters, page: u32) -> ContactListView {
        let page = page.max(1);
        self.last_attempt = Some((filters.clone(), page));

        let result = self.api.list_contacts(&filters, page, self.page_size).await;
        self.observe_session();

        match result {
            Ok(res) => {
                let pagination = res.pagination.unwrap_or_default();
                let state = ContactListState {
                    total_records: pagination.total_records.max(res.contacts.len() as u64),
                    total_pages: pagination.total_pages.max(1),
                    items: res.contacts,
                    page,
                    filters,
                };
                tracing::debug!(
                    page,
                    items = state.items.len(),
                    total_pages = state.total_pages,
                    "contacts loaded"
                );
                self.state = Some(state);
                self.render()
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "loading contacts failed");
                Self::error_view(&err)
            }
        }
    }

    /// Reloads with the filters currently applied.
    pub async fn go_to_page(&mut self, page: u32) -> ContactListView {
        let filters = self.applied_filters();
        self.load_contacts(filters, page).await
    }

    /// New filters always start from the first page.
    pub async fn apply_filters(&mut self, filters: ContactFilters) -> ContactListView {
        self.load_contacts(filters, 1).await
    }

    /// Repeats the last attempted load, successful or not.
    pub async fn retry(&mut self) -> ContactListView {
        let (filters, page) = self
            .last_attempt
            .clone()
            .unwrap_or_else(|| (self.applied_filters(), 1));
        self.load_contacts(filters, page).await
    }

    pub fn render(&mut self) -> ContactListView {
        self.observe_session();
        match &self.state {
            Some(s) => contact_list_view(&s.items, s.page, s.total_pages, s.total_records),
            None => contact_list_view(&[], 1, 1, 0),
        }
    }

    fn applied_filters(&self) -> ContactFilters {
        self.state
            .as_ref()
            .map(|s| s.filters.clone())
            .or_else(|| self.last_attempt.as_ref().map(|(f, _)| f.clone()))
            .unwrap_or_default()
    }

    fn error_view(err: &ApiError) -> ContactListView {
        let message = match err {
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Malformed(_) => "The server sent an unexpected response".to_string(),
        };
        ContactListView::Error {
            message,
            can_retry: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::testing::{signed_in_store, FakeBackend};
    use crate::view::{PageButton, EMPTY_CONTACTS_MESSAGE};
    use reqwest::StatusCode;
    use std::sync::Arc;

    const PAGE_ONE: &str = r#"{
      "kisiler": [
        {"id": 1, "isim": "Ada", "soyisim": "Lovelace", "tam_isim": "Ada Lovelace", "favori": true},
        {"id": 2, "isim": "Alan", "soyisim": "Turing", "tam_isim": "Alan Turing", "favori": false}
      ],
      "sayfalama": {"mevcut_sayfa": 1, "toplam_sayfa": 3, "toplam_kayit": 26, "limit": 12}
    }"#;

    fn controller(backend: &Arc<FakeBackend>) -> (ContactsController, Arc<crate::state::SessionStore>) {
        backend.accept_access("T1");
        let session = Arc::new(signed_in_store("T1", "R1"));
        let api = RehberApi::new(Arc::new(ApiClient::new(backend.clone(), session.clone())));
        (ContactsController::new(api), session)
    }

    #[tokio::test]
    async fn successful_load_replaces_state_and_renders_cards() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (mut controller, _) = controller(&backend);

        let view = controller.load_contacts(ContactFilters::default(), 1).await;

        assert_eq!(view.cards().len(), 2);
        assert_eq!(view.cards()[0].initials, "AL");
        assert_eq!(
            view.pagination().first(),
            Some(&PageButton::Previous { target: 1, disabled: true })
        );
        let state = controller.state().unwrap();
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.total_records, 26);
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn favorites_on_empty_page_two_shows_empty_state() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler?sayfa=1&limit=12&sirala=isim", StatusCode::OK, PAGE_ONE);
        backend.respond(
            "/kisiler?sayfa=2&limit=12&sirala=isim&favori=true",
            StatusCode::OK,
            r#"{"kisiler":[],"sayfalama":{"mevcut_sayfa":2,"toplam_sayfa":0,"toplam_kayit":0,"limit":12}}"#,
        );
        let (mut controller, _) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 1).await;

        let view = controller.load_contacts(ContactFilters::favorites(), 2).await;

        assert_eq!(
            view,
            ContactListView::Empty {
                message: EMPTY_CONTACTS_MESSAGE
            }
        );
        assert!(view.pagination().is_empty());
        assert!(controller.state().unwrap().items.is_empty());
        assert_eq!(backend.requests_to("/kisiler").len(), 2);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_page_and_offers_retry() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler?sayfa=1&limit=12&sirala=isim", StatusCode::OK, PAGE_ONE);
        backend.respond(
            "/kisiler?sayfa=2&limit=12&sirala=isim",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Sunucu hatası","message":"Bir hata oluştu"}"#,
        );
        let (mut controller, _) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 1).await;

        let view = controller.go_to_page(2).await;

        assert_eq!(
            view,
            ContactListView::Error {
                message: "Sunucu hatası".to_string(),
                can_retry: true
            }
        );
        assert_eq!(controller.state().unwrap().page, 1);
        assert_eq!(controller.render().cards().len(), 2);

        backend.respond("/kisiler?sayfa=2&limit=12&sirala=isim", StatusCode::OK, PAGE_ONE);
        controller.retry().await;
        assert_eq!(controller.state().unwrap().page, 2);
        assert_eq!(
            backend.requests().last().unwrap().path,
            "/kisiler?sayfa=2&limit=12&sirala=isim"
        );
    }

    #[tokio::test]
    async fn network_failure_is_rendered_as_retryable_error() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.fail("/kisiler");
        let (mut controller, _) = controller(&backend);

        let view = controller.load_contacts(ContactFilters::default(), 1).await;

        assert!(matches!(view, ContactListView::Error { can_retry: true, .. }));
        assert!(controller.state().is_none());
    }

    #[tokio::test]
    async fn applying_filters_returns_to_first_page() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (mut controller, _) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 3).await;

        let filters = ContactFilters {
            search: Some("ada".to_string()),
            ..ContactFilters::default()
        };
        controller.apply_filters(filters).await;

        assert_eq!(
            backend.requests().last().unwrap().path,
            "/kisiler?sayfa=1&limit=12&sirala=isim&arama=ada"
        );
        controller.go_to_page(2).await;
        assert_eq!(
            backend.requests().last().unwrap().path,
            "/kisiler?sayfa=2&limit=12&sirala=isim&arama=ada"
        );
    }

    #[tokio::test]
    async fn logout_drops_cached_contacts() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (mut controller, session) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 1).await;

        session.logout().await;

        assert!(controller.state().is_none());
        assert!(matches!(controller.render(), ContactListView::Empty { .. }));
    }

    #[tokio::test]
    async fn logout_then_new_login_still_drops_cached_contacts() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (mut controller, session) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 1).await;

        session.logout().await;
        session
            .establish("X1".to_string(), "Y1".to_string(), crate::testing::user())
            .await;

        assert!(controller.state().is_none());
        assert!(matches!(controller.render(), ContactListView::Empty { .. }));
    }

    #[tokio::test]
    async fn refreshed_token_keeps_cached_contacts() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (mut controller, session) = controller(&backend);
        controller.load_contacts(ContactFilters::default(), 1).await;

        session.set_access_token("T3".to_string()).await;

        assert_eq!(controller.state().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn page_size_is_capped() {
        let backend = Arc::new(FakeBackend::new("T2", "R1"));
        backend.respond("/kisiler", StatusCode::OK, PAGE_ONE);
        let (controller, _) = controller(&backend);
        let mut controller = controller.with_page_size(1000);

        controller.load_contacts(ContactFilters::default(), 1).await;

        assert_eq!(controller.page_size(), 100);
        assert_eq!(
            backend.requests()[0].path,
            "/kisiler?sayfa=1&limit=100&sirala=isim"
        );
    }
}
