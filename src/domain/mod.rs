//! Core data types shared across the dashboard.

pub mod filters;
pub mod item;
pub mod pagination;
pub mod section;

pub use filters::FilterSet;
pub use item::{
    AccountStatus, ActivityEntry, Classification, EmailSummary, ListItem, ListPage,
    ResponseSummary, TemplateSummary,
};
pub use pagination::Pagination;
pub use section::Section;
