//! Application state and cross-component plumbing.
//!
//! This module contains:
//! - Controller-owned list state and its load phases (state.rs)
//! - Event bus for cross-component communication (events.rs)

pub mod events;
pub mod state;

pub use events::{AlertLevel, AppEvent, EventBus};
pub use state::{ListState, LoadPhase};
