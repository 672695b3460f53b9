//! Top-level dashboard sections.
//!
//! A section is one of the five admin panel views. It determines which
//! backend endpoint serves the section's list and which filter keys the
//! list accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five top-level dashboard views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Overview cards and recent activity.
    #[default]
    Dashboard,
    /// Incoming email list.
    Emails,
    /// Generated response list.
    Responses,
    /// Response template list.
    Templates,
    /// Account status and system settings.
    Admin,
}

impl Section {
    /// Returns all sections in navigation order.
    pub fn all() -> &'static [Section] {
        &[
            Section::Dashboard,
            Section::Emails,
            Section::Responses,
            Section::Templates,
            Section::Admin,
        ]
    }

    /// Returns the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Emails => "Emails",
            Section::Responses => "Responses",
            Section::Templates => "Templates",
            Section::Admin => "Administration",
        }
    }

    /// Returns the lowercase identifier used in navigation and on the wire.
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Emails => "emails",
            Section::Responses => "responses",
            Section::Templates => "templates",
            Section::Admin => "admin",
        }
    }

    /// Returns the backend endpoint serving this section's list.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Section::Dashboard => "/api/dashboard/recent-activity",
            Section::Emails => "/api/emails",
            Section::Responses => "/api/responses",
            Section::Templates => "/api/templates",
            Section::Admin => "/api/admin/gmail-accounts/status",
        }
    }

    /// Returns the filter keys this section's list accepts.
    pub fn filter_keys(&self) -> &'static [&'static str] {
        match self {
            Section::Dashboard | Section::Admin => &[],
            Section::Emails => &[
                "account",
                "status",
                "type",
                "priority",
                "days_back",
                "search",
            ],
            Section::Responses => &["status", "account", "days_back", "search"],
            Section::Templates => &["category", "active_only", "search"],
        }
    }

    /// Returns whether `key` is a valid filter key for this section.
    pub fn accepts_filter(&self, key: &str) -> bool {
        self.filter_keys().contains(&key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
