//! List view controller: section, page, and filter synchronization.
//!
//! The controller owns exactly one coherent view of "what list, what
//! page, what filters" and guarantees that every state change triggers
//! one fetch and one render, in that order. Overlapping fetches may
//! resolve out of order, so each request carries a monotonically
//! increasing sequence number; a response is applied only if its number
//! still matches the most recently issued one. Last request wins, never
//! last response.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::app::{AlertLevel, AppEvent, EventBus, ListState, LoadPhase};
use crate::domain::{FilterSet, Section};
use crate::services::data_source::{DataSource, FetchError, Query};
use crate::ui::Renderer;

/// Default items per page for list sections.
const DEFAULT_PER_PAGE: u32 = 20;

/// Server-side cap on items per page.
const MAX_PER_PAGE: u32 = 100;

/// Error returned by controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The filter key is not valid for the current section. Rejected
    /// before any state change or fetch.
    #[error("unknown filter key `{key}` for section {section}")]
    InvalidFilterKey { section: Section, key: String },
    /// Pages are 1-based. Rejected before any state change or fetch.
    #[error("invalid page {0}; pages start at 1")]
    InvalidPage(u32),
    /// The data source failed. Page and filters from the triggering call
    /// stay in effect, so `refresh()` retries the same identity.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Items-per-page configuration.
#[derive(Debug, Clone)]
pub struct ListSettings {
    /// Page size for sections without an override.
    pub per_page: u32,
    /// Per-section page size overrides.
    pub overrides: HashMap<Section, u32>,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            overrides: HashMap::new(),
        }
    }
}

impl ListSettings {
    /// Overrides the page size for one section.
    pub fn with_per_page(mut self, section: Section, per_page: u32) -> Self {
        self.overrides.insert(section, per_page);
        self
    }

    /// Returns the page size for `section`, clamped to the server cap.
    pub fn per_page_for(&self, section: Section) -> u32 {
        self.overrides
            .get(&section)
            .copied()
            .unwrap_or(self.per_page)
            .clamp(1, MAX_PER_PAGE)
    }
}

/// A fetch identity snapshotted under the state lock.
struct FetchTicket {
    seq: u64,
    section: Section,
    query: Query,
}

struct Inner {
    state: ListState,
    /// Sequence number of the most recently issued fetch. Responses
    /// carrying an older number are discarded unapplied.
    fetch_seq: u64,
}

/// Controller for the dashboard's section lists.
///
/// Construct one per session and share it behind an [`Arc`]; operations
/// take `&self` and serialize state changes internally. State mutation
/// and the stale-response check each happen under a single lock
/// acquisition, and the lock is never held across the fetch await, so
/// concurrent operations interleave safely.
pub struct ListViewController<D, R> {
    source: Arc<D>,
    renderer: Arc<R>,
    settings: ListSettings,
    events: EventBus,
    inner: Mutex<Inner>,
}

impl<D, R> ListViewController<D, R>
where
    D: DataSource,
    R: Renderer,
{
    /// Creates a controller starting at the dashboard section, page 1,
    /// no filters. Nothing is fetched until the first operation.
    pub fn new(source: Arc<D>, renderer: Arc<R>) -> Self {
        Self {
            source,
            renderer,
            settings: ListSettings::default(),
            events: EventBus::new(),
            inner: Mutex::new(Inner {
                state: ListState::new(),
                fetch_seq: 0,
            }),
        }
    }

    /// Replaces the page-size settings.
    pub fn with_settings(mut self, settings: ListSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the event bus for subscribing to notifications.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the current section.
    pub async fn section(&self) -> Section {
        self.inner.lock().await.state.section
    }

    /// Returns the current page.
    pub async fn page(&self) -> u32 {
        self.inner.lock().await.state.page
    }

    /// Returns a copy of the active filters.
    pub async fn filters(&self) -> FilterSet {
        self.inner.lock().await.state.filters.clone()
    }

    /// Returns a snapshot of the list state.
    pub async fn state(&self) -> ListState {
        self.inner.lock().await.state.clone()
    }

    /// Switches to `section`, resetting the page to 1 and clearing all
    /// filters. Navigating to the current section is a no-op.
    pub async fn navigate(&self, section: Section) -> Result<(), ControllerError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            if inner.state.section == section {
                return Ok(());
            }
            inner.state.reset_for(section);
            self.begin_fetch(&mut inner)
        };
        self.events.emit(AppEvent::SectionChanged(section));
        self.run_fetch(ticket).await
    }

    /// Sets or replaces a filter; an empty value removes it. Resets to
    /// page 1. Fails with [`ControllerError::InvalidFilterKey`] before
    /// any state change when `key` is not valid for the current section.
    pub async fn set_filter(&self, key: &str, value: &str) -> Result<(), ControllerError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            if !inner.state.section.accepts_filter(key) {
                return Err(ControllerError::InvalidFilterKey {
                    section: inner.state.section,
                    key: key.to_string(),
                });
            }
            inner.state.filters.set(key, value);
            inner.state.page = 1;
            self.begin_fetch(&mut inner)
        };
        self.run_fetch(ticket).await
    }

    /// Clears all filters and returns to page 1.
    pub async fn clear_filters(&self) -> Result<(), ControllerError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.state.filters.clear();
            inner.state.page = 1;
            self.begin_fetch(&mut inner)
        };
        self.run_fetch(ticket).await
    }

    /// Jumps to page `n` (1-based). The page is not clamped against the
    /// total page count: out-of-range pages come back from the backend
    /// as an empty list and are rendered normally.
    pub async fn set_page(&self, n: u32) -> Result<(), ControllerError> {
        if n == 0 {
            return Err(ControllerError::InvalidPage(n));
        }
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.state.page = n;
            self.begin_fetch(&mut inner)
        };
        self.run_fetch(ticket).await
    }

    /// Re-fetches the current identity without changing it. Also serves
    /// as the retry after a failed load.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            self.begin_fetch(&mut inner)
        };
        self.run_fetch(ticket).await
    }

    /// Issues a new fetch identity under the state lock: bumps the
    /// sequence number, marks the state loading, and snapshots the query.
    fn begin_fetch(&self, inner: &mut Inner) -> FetchTicket {
        inner.fetch_seq += 1;
        inner.state.phase = LoadPhase::Loading;
        let section = inner.state.section;
        let query = Query::new(
            inner.state.page,
            self.settings.per_page_for(section),
            inner.state.filters.clone(),
        );
        self.renderer.set_loading(true);
        FetchTicket {
            seq: inner.fetch_seq,
            section,
            query,
        }
    }

    /// Awaits the fetch for `ticket` and applies the result if the
    /// ticket is still the most recently issued one.
    async fn run_fetch(&self, ticket: FetchTicket) -> Result<(), ControllerError> {
        let result = self.source.fetch(ticket.section, &ticket.query).await;

        let mut inner = self.inner.lock().await;
        if inner.fetch_seq != ticket.seq {
            debug!(
                section = %ticket.section,
                seq = ticket.seq,
                latest = inner.fetch_seq,
                "discarding superseded response"
            );
            return Ok(());
        }

        self.renderer.set_loading(false);
        match result {
            Ok(page) => {
                inner.state.items = page.items;
                inner.state.phase = LoadPhase::Rendered;
                inner.state.section_loaded = true;
                self.renderer
                    .render(ticket.section, &inner.state.items, &page.pagination);
                Ok(())
            }
            Err(err) => {
                inner.state.phase = LoadPhase::Errored;
                warn!(section = %ticket.section, %err, "list fetch failed");
                if inner.state.section_loaded {
                    // Keep the previous items on screen; only notify.
                    self.events.emit(AppEvent::Alert {
                        level: AlertLevel::Danger,
                        message: format!("Failed to load {}", ticket.section.name()),
                    });
                } else {
                    self.renderer.render_error(ticket.section, &err);
                }
                Err(ControllerError::Fetch(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, EmailSummary, ListItem, ListPage, Pagination};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    fn make_email(id: i64) -> EmailSummary {
        EmailSummary {
            id,
            gmail_id: Some(format!("gm-{id}")),
            account: "support".to_string(),
            sender_email: "customer@example.com".to_string(),
            sender_name: Some("Customer".to_string()),
            subject: format!("Order question #{id}"),
            body_preview: "Hello, I have a question about...".to_string(),
            received_at: "2024-05-01T10:00:00Z".parse().unwrap(),
            processed_at: None,
            status: "pending".to_string(),
            classification: Classification::default(),
            needs_human_review: false,
            response_count: 0,
        }
    }

    /// Data source double. Records every query, answers each page with a
    /// row tagged by the page number, and can gate individual pages so a
    /// test controls response arrival order.
    struct FakeSource {
        total: u64,
        calls: StdMutex<Vec<(Section, Query)>>,
        gates: StdMutex<HashMap<u32, Arc<Notify>>>,
        fail: StdMutex<bool>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self::with_total(100)
        }

        fn with_total(total: u64) -> Self {
            Self {
                total,
                calls: StdMutex::new(Vec::new()),
                gates: StdMutex::new(HashMap::new()),
                fail: StdMutex::new(false),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_call(&self) -> (Section, Query) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        /// Makes fetches for `page` wait until [`release_page`] is called.
        fn gate_page(&self, page: u32) {
            self.gates
                .lock()
                .unwrap()
                .insert(page, Arc::new(Notify::new()));
        }

        fn release_page(&self, page: u32) {
            if let Some(gate) = self.gates.lock().unwrap().get(&page) {
                gate.notify_one();
            }
        }
    }

    #[async_trait]
    impl DataSource for FakeSource {
        async fn fetch(&self, section: Section, query: &Query) -> Result<ListPage, FetchError> {
            self.calls.lock().unwrap().push((section, query.clone()));

            let gate = self.gates.lock().unwrap().get(&query.page).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if *self.fail.lock().unwrap() {
                return Err(FetchError::Http { status: 500 });
            }

            let per_page = u64::from(query.per_page.max(1));
            let pages = self.total.div_ceil(per_page) as u32;
            if query.page > pages.max(1) {
                // Out-of-range request: the backend echoes the page and
                // returns no rows.
                return Ok(ListPage {
                    items: Vec::new(),
                    pagination: Pagination {
                        page: query.page,
                        per_page: query.per_page,
                        total: self.total,
                        total_pages: pages,
                        has_prev: true,
                        has_next: false,
                    },
                });
            }

            Ok(ListPage {
                items: vec![ListItem::Email(make_email(i64::from(query.page)))],
                pagination: Pagination::new(query.page, query.per_page, self.total),
            })
        }
    }

    /// Renderer double that records every call.
    #[derive(Default)]
    struct RecordingRenderer {
        renders: StdMutex<Vec<(Section, Vec<ListItem>, Pagination)>>,
        errors: StdMutex<Vec<(Section, String)>>,
        loading: StdMutex<Vec<bool>>,
    }

    impl RecordingRenderer {
        fn render_count(&self) -> usize {
            self.renders.lock().unwrap().len()
        }

        fn error_count(&self) -> usize {
            self.errors.lock().unwrap().len()
        }

        fn last_render(&self) -> (Section, Vec<ListItem>, Pagination) {
            self.renders.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, section: Section, items: &[ListItem], pagination: &Pagination) {
            self.renders
                .lock()
                .unwrap()
                .push((section, items.to_vec(), pagination.clone()));
        }

        fn render_error(&self, section: Section, error: &FetchError) {
            self.errors
                .lock()
                .unwrap()
                .push((section, error.to_string()));
        }

        fn set_loading(&self, loading: bool) {
            self.loading.lock().unwrap().push(loading);
        }
    }

    type TestController = ListViewController<FakeSource, RecordingRenderer>;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("mailboard=debug")
            .with_test_writer()
            .try_init();
    }

    fn make_controller(
        source: FakeSource,
    ) -> (Arc<TestController>, Arc<FakeSource>, Arc<RecordingRenderer>) {
        let source = Arc::new(source);
        let renderer = Arc::new(RecordingRenderer::default());
        let controller = Arc::new(ListViewController::new(source.clone(), renderer.clone()));
        (controller, source, renderer)
    }

    #[tokio::test]
    async fn navigate_resets_page_and_filters() {
        let (controller, _source, _renderer) = make_controller(FakeSource::new());

        controller.navigate(Section::Emails).await.unwrap();
        controller.set_filter("status", "pending").await.unwrap();
        controller.set_page(3).await.unwrap();

        controller.navigate(Section::Templates).await.unwrap();
        let state = controller.state().await;
        assert_eq!(state.page, 1);
        assert!(state.filters.is_empty());

        // Returning to a previously visited section also starts clean.
        controller.navigate(Section::Emails).await.unwrap();
        let state = controller.state().await;
        assert_eq!(state.section, Section::Emails);
        assert_eq!(state.page, 1);
        assert!(state.filters.is_empty());
    }

    #[tokio::test]
    async fn navigate_to_current_section_is_a_noop() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());

        controller.navigate(Section::Dashboard).await.unwrap();
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_filter_key_rejected_without_fetch() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        let calls_before = source.call_count();

        let err = controller.set_filter("bogus", "x").await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::InvalidFilterKey { section: Section::Emails, ref key } if key == "bogus"
        ));
        assert_eq!(source.call_count(), calls_before);
        assert!(controller.filters().await.is_empty());
    }

    #[tokio::test]
    async fn sections_without_filters_reject_every_key() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());

        let err = controller.set_filter("status", "pending").await.unwrap_err();
        assert!(matches!(err, ControllerError::InvalidFilterKey { .. }));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn page_zero_rejected_without_fetch() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());

        let err = controller.set_page(0).await.unwrap_err();
        assert!(matches!(err, ControllerError::InvalidPage(0)));
        assert_eq!(source.call_count(), 0);
        assert_eq!(controller.page().await, 1);
    }

    #[tokio::test]
    async fn empty_filter_value_removes_key_from_query() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        let baseline = source.last_call().1;

        controller.set_filter("status", "pending").await.unwrap();
        assert_eq!(source.last_call().1.filters.get("status"), Some("pending"));

        controller.set_filter("status", "").await.unwrap();
        assert_eq!(source.last_call().1, baseline);
    }

    #[tokio::test]
    async fn set_filter_resets_page() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        controller.set_page(3).await.unwrap();

        controller.set_filter("status", "pending").await.unwrap();
        assert_eq!(controller.page().await, 1);
        assert_eq!(source.last_call().1.page, 1);
    }

    #[tokio::test]
    async fn clear_filters_resets_everything() {
        let (controller, source, _renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        controller.set_filter("status", "pending").await.unwrap();
        controller.set_filter("account", "sales").await.unwrap();
        controller.set_page(2).await.unwrap();

        controller.clear_filters().await.unwrap();

        let (_, query) = source.last_call();
        assert_eq!(query.page, 1);
        assert!(query.filters.is_empty());
    }

    #[tokio::test]
    async fn last_request_wins_regardless_of_arrival_order() {
        init_tracing();
        let (controller, source, renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        assert_eq!(renderer.render_count(), 1);

        // Hold the page-2 response while page 3 is requested and served.
        source.gate_page(2);
        let slow = tokio::spawn({
            let controller = controller.clone();
            async move { controller.set_page(2).await }
        });
        while source.call_count() < 2 {
            tokio::task::yield_now().await;
        }

        controller.set_page(3).await.unwrap();
        assert_eq!(renderer.render_count(), 2);

        // The page-2 response arrives last and must be discarded.
        source.release_page(2);
        slow.await.unwrap().unwrap();

        assert_eq!(renderer.render_count(), 2);
        let (_, items, pagination) = renderer.last_render();
        assert_eq!(pagination.page, 3);
        assert_eq!(items[0].id(), Some(3));
        assert_eq!(controller.page().await, 3);
    }

    #[tokio::test]
    async fn out_of_range_page_renders_empty_not_error() {
        let (controller, _source, renderer) = make_controller(FakeSource::with_total(40));
        controller.navigate(Section::Emails).await.unwrap();

        controller.set_page(9).await.unwrap();

        let (_, items, pagination) = renderer.last_render();
        assert!(items.is_empty());
        assert_eq!(pagination.page, 9);
        assert!(pagination.has_prev);
        assert!(!pagination.has_next);
        assert_eq!(renderer.error_count(), 0);
        assert_eq!(controller.state().await.phase, LoadPhase::Rendered);
    }

    #[tokio::test]
    async fn first_load_failure_renders_placeholder() {
        let (controller, source, renderer) = make_controller(FakeSource::new());
        source.set_fail(true);

        let err = controller.navigate(Section::Emails).await.unwrap_err();
        assert!(matches!(err, ControllerError::Fetch(FetchError::Http { status: 500 })));
        assert_eq!(renderer.render_count(), 0);
        assert_eq!(renderer.error_count(), 1);
        assert_eq!(controller.state().await.phase, LoadPhase::Errored);
    }

    #[tokio::test]
    async fn reload_failure_keeps_previous_items_and_alerts() {
        let (controller, source, renderer) = make_controller(FakeSource::new());
        controller.navigate(Section::Emails).await.unwrap();
        let mut events = controller.events().subscribe();

        source.set_fail(true);
        let err = controller.set_page(2).await.unwrap_err();
        assert!(matches!(err, ControllerError::Fetch(_)));

        // The page-1 render is still the last one; no error placeholder.
        assert_eq!(renderer.render_count(), 1);
        assert_eq!(renderer.error_count(), 0);
        let state = controller.state().await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id(), Some(1));

        assert!(matches!(
            events.recv().await.unwrap(),
            AppEvent::Alert {
                level: AlertLevel::Danger,
                ..
            }
        ));

        // The failed page stays in effect so a plain refresh retries it.
        assert_eq!(controller.page().await, 2);
        source.set_fail(false);
        controller.refresh().await.unwrap();
        let (_, items, pagination) = renderer.last_render();
        assert_eq!(pagination.page, 2);
        assert_eq!(items[0].id(), Some(2));
    }

    #[tokio::test]
    async fn filtered_pagination_end_to_end() {
        let (controller, source, renderer) = make_controller(FakeSource::new());

        controller.navigate(Section::Emails).await.unwrap();
        controller.set_filter("status", "pending").await.unwrap();
        controller.set_page(2).await.unwrap();

        assert_eq!(source.call_count(), 3);
        let mut expected_filters = FilterSet::new();
        expected_filters.set("status", "pending");
        let (section, query) = source.last_call();
        assert_eq!(section, Section::Emails);
        assert_eq!(query, Query::new(2, 20, expected_filters));

        let (_, items, pagination) = renderer.last_render();
        assert_eq!(pagination.page, 2);
        assert_eq!(items[0].id(), Some(2));
    }

    #[tokio::test]
    async fn per_page_overrides_and_server_cap() {
        let settings = ListSettings::default()
            .with_per_page(Section::Emails, 50)
            .with_per_page(Section::Templates, 500);
        let source = Arc::new(FakeSource::new());
        let renderer = Arc::new(RecordingRenderer::default());
        let controller = ListViewController::new(source.clone(), renderer.clone())
            .with_settings(settings);

        controller.navigate(Section::Emails).await.unwrap();
        assert_eq!(source.last_call().1.per_page, 50);

        controller.navigate(Section::Templates).await.unwrap();
        assert_eq!(source.last_call().1.per_page, 100);

        controller.navigate(Section::Responses).await.unwrap();
        assert_eq!(source.last_call().1.per_page, 20);
    }

    #[tokio::test]
    async fn loading_indicator_wraps_each_fetch() {
        let (controller, _source, renderer) = make_controller(FakeSource::new());

        controller.navigate(Section::Emails).await.unwrap();
        assert_eq!(*renderer.loading.lock().unwrap(), vec![true, false]);
    }
}
