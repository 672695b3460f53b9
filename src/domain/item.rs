//! Typed rows for each section list.
//!
//! These mirror the JSON rows the backend serializes per list endpoint.
//! The controller treats rows as opaque items; only data sources build
//! them and only renderers look inside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Pagination;

/// Classification assigned to an email by the processing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Classified type (sales, support, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Priority bucket.
    pub priority: Option<String>,
    /// Product line the email concerns.
    #[serde(default)]
    pub product: Option<String>,
    /// Detected sentiment.
    #[serde(default)]
    pub sentiment: Option<String>,
    /// Classifier confidence, 0.0 to 1.0.
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Row in the emails list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: i64,
    #[serde(default)]
    pub gmail_id: Option<String>,
    pub account: String,
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub subject: String,
    pub body_preview: String,
    pub received_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    pub status: String,
    pub classification: Classification,
    #[serde(default)]
    pub needs_human_review: bool,
    #[serde(default)]
    pub response_count: u32,
}

/// Row in the generated responses list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub id: i64,
    pub email_id: i64,
    pub subject: String,
    pub body_preview: String,
    pub status: String,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub template_used: Option<String>,
    #[serde(default)]
    pub generation_confidence: Option<f64>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row in the templates list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub subject_template: Option<String>,
    pub body_preview: String,
    #[serde(default)]
    pub variables: Vec<String>,
    pub is_active: bool,
    #[serde(default)]
    pub usage_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row in the admin account-status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub name: String,
    pub email: String,
    pub is_authenticated: bool,
    pub email_count: u64,
}

/// Row in the dashboard recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub sender: String,
    pub subject: String,
    pub account: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub time_ago: Option<String>,
}

/// A single row in a section list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Email(EmailSummary),
    Response(ResponseSummary),
    Template(TemplateSummary),
    Account(AccountStatus),
    Activity(ActivityEntry),
}

impl ListItem {
    /// Returns the backend row id, where the row has one.
    pub fn id(&self) -> Option<i64> {
        match self {
            ListItem::Email(email) => Some(email.id),
            ListItem::Response(response) => Some(response.id),
            ListItem::Template(template) => Some(template.id),
            ListItem::Account(_) => None,
            ListItem::Activity(entry) => Some(entry.id),
        }
    }
}

/// One fetched page of a section list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    /// Rows in backend order.
    pub items: Vec<ListItem>,
    /// Pagination state for the list.
    pub pagination: Pagination,
}
