//! Rendering seam.
//!
//! Painting lives outside this crate; embedders bring their own DOM or
//! terminal output. [`Renderer`] is the capability the controller hands
//! authoritative list state to.

use crate::domain::{ListItem, Pagination, Section};
use crate::services::FetchError;

/// Paints list state for the current section.
///
/// Methods are invoked from inside a controller state transition and
/// must not call back into the controller.
pub trait Renderer: Send + Sync {
    /// Paints `items` and pagination controls for `section`. Called only
    /// with the most recent authoritative state; superseded fetch results
    /// never reach this method.
    fn render(&self, section: Section, items: &[ListItem], pagination: &Pagination);

    /// Paints an error placeholder for a section whose first load
    /// failed. Reload failures for an already-rendered section keep the
    /// previous items instead and are reported as an alert event.
    fn render_error(&self, section: Section, error: &FetchError);

    /// Shows or hides the loading indicator.
    fn set_loading(&self, _loading: bool) {}
}
