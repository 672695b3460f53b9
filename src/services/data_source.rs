//! Data source seam and the HTTP implementation backing it.
//!
//! [`DataSource`] is the capability the controller fetches pages through.
//! [`HttpDataSource`] implements it against the admin panel's REST API:
//! one endpoint per section, a flattened `{page, per_page, ...filters}`
//! query string, and per-section JSON envelopes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::domain::{
    AccountStatus, ActivityEntry, EmailSummary, FilterSet, ListItem, ListPage, Pagination,
    ResponseSummary, Section, TemplateSummary,
};

/// Error surfaced by a data source fetch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The backend answered with a non-success status.
    #[error("request failed with HTTP status {status}")]
    Http { status: u16 },
    /// The request could not be sent or the connection dropped.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body was not the expected JSON shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request URL could not be built.
    #[error("invalid request url: {0}")]
    Url(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Flattened query for a list fetch: page, page size, and the active
/// non-empty filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub page: u32,
    pub per_page: u32,
    pub filters: FilterSet,
}

impl Query {
    /// Creates a query.
    pub fn new(page: u32, per_page: u32, filters: FilterSet) -> Self {
        Self {
            page,
            per_page,
            filters,
        }
    }

    /// Returns the query as ordered key/value parameters. Filters with
    /// empty values never appear; [`FilterSet`] guarantees it.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        for (key, value) in self.filters.iter() {
            params.push((key.to_string(), value.to_string()));
        }
        params
    }
}

/// Capability to fetch one page of a section list.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches `query` for `section`, returning the rows and pagination.
    async fn fetch(&self, section: Section, query: &Query) -> Result<ListPage, FetchError>;
}

#[derive(Deserialize)]
struct EmailsEnvelope {
    emails: Vec<EmailSummary>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct ResponsesEnvelope {
    responses: Vec<ResponseSummary>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct TemplatesEnvelope {
    templates: Vec<TemplateSummary>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct AccountsEnvelope {
    accounts: Vec<AccountStatus>,
}

#[derive(Deserialize)]
struct ActivityEnvelope {
    emails: Vec<ActivityEntry>,
}

/// REST-backed data source for the admin panel API.
pub struct HttpDataSource {
    client: Client,
    base: Url,
}

impl HttpDataSource {
    /// Creates a data source rooted at `base` (scheme and host of the
    /// backend API).
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    /// Uses a preconfigured client (timeouts, proxies, default headers).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, section: Section) -> Result<Url, FetchError> {
        self.base
            .join(section.endpoint())
            .map_err(|err| FetchError::Url(err.to_string()))
    }

    /// Decodes a section's list envelope into a [`ListPage`].
    ///
    /// The admin and dashboard endpoints do not paginate; their pages are
    /// synthesized as a single page covering all rows.
    fn page_from_json(section: Section, body: Value) -> Result<ListPage, FetchError> {
        let decode = |err: serde_json::Error| FetchError::Decode(err.to_string());
        match section {
            Section::Emails => {
                let envelope: EmailsEnvelope = serde_json::from_value(body).map_err(decode)?;
                Ok(ListPage {
                    items: envelope.emails.into_iter().map(ListItem::Email).collect(),
                    pagination: envelope.pagination,
                })
            }
            Section::Responses => {
                let envelope: ResponsesEnvelope = serde_json::from_value(body).map_err(decode)?;
                Ok(ListPage {
                    items: envelope
                        .responses
                        .into_iter()
                        .map(ListItem::Response)
                        .collect(),
                    pagination: envelope.pagination,
                })
            }
            Section::Templates => {
                let envelope: TemplatesEnvelope = serde_json::from_value(body).map_err(decode)?;
                Ok(ListPage {
                    items: envelope
                        .templates
                        .into_iter()
                        .map(ListItem::Template)
                        .collect(),
                    pagination: envelope.pagination,
                })
            }
            Section::Admin => {
                let envelope: AccountsEnvelope = serde_json::from_value(body).map_err(decode)?;
                let total = envelope.accounts.len() as u64;
                Ok(ListPage {
                    items: envelope
                        .accounts
                        .into_iter()
                        .map(ListItem::Account)
                        .collect(),
                    pagination: Pagination::single(total),
                })
            }
            Section::Dashboard => {
                let envelope: ActivityEnvelope = serde_json::from_value(body).map_err(decode)?;
                let total = envelope.emails.len() as u64;
                Ok(ListPage {
                    items: envelope
                        .emails
                        .into_iter()
                        .map(ListItem::Activity)
                        .collect(),
                    pagination: Pagination::single(total),
                })
            }
        }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, section: Section, query: &Query) -> Result<ListPage, FetchError> {
        let url = self.endpoint(section)?;
        let response = self
            .client
            .get(url)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        Self::page_from_json(section, body)
    }
}
