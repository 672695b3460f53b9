//! Business logic services.
//!
//! Services own behavior that is independent of painting:
//! - `list_controller`: section/page/filter state and fetch orchestration
//! - `data_source`: the REST fetch seam and its HTTP implementation
//! - `auto_refresh`: periodic dashboard reload

pub mod auto_refresh;
pub mod data_source;
pub mod list_controller;

pub use auto_refresh::{AutoRefresh, DEFAULT_REFRESH_INTERVAL};
pub use data_source::{DataSource, FetchError, HttpDataSource, Query};
pub use list_controller::{ControllerError, ListSettings, ListViewController};
