//! Literature sources.
//!
//! A [`LiteratureSource`] answers the two remote lookups of the pipeline:
//!
//! 1. [`LiteratureSource::search_ids`] turns a free-text query into an ordered list
//!    of record identifiers (at most `max_results` of them).
//! 2. [`LiteratureSource::fetch_details`] turns those identifiers into one
//!    [`Record`] each, in the order the identifiers were given.
//!
//! [`PubMedSource`] talks to NCBI E-utilities; [`MockSource`] serves canned data
//! and counts calls, for tests.

mod pubmed;

pub mod mock;

pub use mock::MockSource;
pub use pubmed::PubMedSource;

use crate::models::{Record, RecordId, SearchQuery};
use async_trait::async_trait;

/// The two-stage lookup interface the pipeline drives.
#[async_trait]
pub trait LiteratureSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for identifiers matching the query
    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<RecordId>, SourceError>;

    /// Fetch one record per identifier, preserving the input order.
    ///
    /// An empty `ids` slice must return an empty list without contacting the remote
    /// service.
    async fn fetch_details(&self, ids: &[RecordId]) -> Result<Vec<Record>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Connection failure, timeout or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// The body was not JSON at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    /// Whether this is a transport failure (network or HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Network(_) | SourceError::Api(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
