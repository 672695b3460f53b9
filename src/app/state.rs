//! Controller-owned list state.

use crate::domain::{FilterSet, ListItem, Section};

/// Load phase of the current list identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// No fetch issued yet.
    #[default]
    Idle,
    /// A fetch for the current identity is in flight.
    Loading,
    /// The latest fetch result has been rendered.
    Rendered,
    /// The latest fetch failed.
    Errored,
}

impl LoadPhase {
    /// Returns whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

/// The tuple of section, page, filters, and loaded items the controller
/// maintains for the session.
///
/// Owned exclusively by the controller and mutated only through its
/// operations; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Currently visible section.
    pub section: Section,
    /// Current page, 1-based.
    pub page: u32,
    /// Active filters for the current section.
    pub filters: FilterSet,
    /// Rows from the most recent successful load.
    pub items: Vec<ListItem>,
    /// Load phase of the current identity.
    pub phase: LoadPhase,
    /// Whether this section has completed at least one successful load.
    /// Distinguishes "first load failed" (error placeholder) from
    /// "reload failed" (keep the previous items).
    pub section_loaded: bool,
}

impl ListState {
    /// Creates the session-start state: dashboard, page 1, no filters.
    pub fn new() -> Self {
        Self {
            section: Section::Dashboard,
            page: 1,
            filters: FilterSet::new(),
            items: Vec::new(),
            phase: LoadPhase::Idle,
            section_loaded: false,
        }
    }

    /// Resets to the first page of `section` with no filters. Filters do
    /// not carry across sections.
    pub fn reset_for(&mut self, section: Section) {
        self.section = section;
        self.page = 1;
        self.filters.clear();
        self.items.clear();
        self.phase = LoadPhase::Idle;
        self.section_loaded = false;
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}
