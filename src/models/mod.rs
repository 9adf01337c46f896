//! Core data models for PubMed records and search operations.

mod record;
mod search;

pub use record::{AuthorEntry, ClassifiedRecord, Record, RecordId, NOT_AVAILABLE, UNKNOWN_AUTHOR};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};
