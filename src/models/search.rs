//! Search request model.

use serde::{Deserialize, Serialize};

/// Result cap applied to ESearch when nothing else is configured
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text PubMed query (field tags such as `[AUTH]` are passed through)
    pub query: String,

    /// Maximum number of identifiers to request (`retmax`)
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Whether the query carries any searchable text
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}
