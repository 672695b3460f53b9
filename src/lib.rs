//! Dashboard state and data layer for an email-automation admin panel.
//!
//! mailboard keeps one coherent view of "what list, what page, what
//! filters" for each of the panel's sections, fetches pages from the
//! backend REST API, and hands authoritative results to a pluggable
//! renderer. Overlapping fetches resolve last-request-wins: a response
//! belonging to a superseded state is discarded, never painted.
//!
//! The crate is organized into:
//! - `domain`: sections, filters, pagination, and list rows
//! - `app`: controller-owned state and the cross-component event bus
//! - `services`: the list controller, data sources, and periodic refresh
//! - `ui`: the renderer seam (painting itself lives outside this crate)

pub mod app;
pub mod domain;
pub mod services;
pub mod ui;

pub use app::{AlertLevel, AppEvent, EventBus, ListState, LoadPhase};
pub use domain::{FilterSet, ListItem, ListPage, Pagination, Section};
pub use services::{
    AutoRefresh, ControllerError, DataSource, FetchError, HttpDataSource, ListSettings,
    ListViewController, Query,
};
pub use ui::Renderer;
