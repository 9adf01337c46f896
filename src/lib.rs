//! # PubMed Papers
//!
//! Fetch PubMed papers for a query and flag authors whose affiliation does not
//! look academic.
//!
//! ## Architecture
//!
//! The library is a linear pipeline:
//!
//! - [`sources`]: the [`LiteratureSource`] trait and its PubMed E-utilities
//!   implementation (ID search, then a batched summary fetch)
//! - [`classify`]: the affiliation heuristic
//! - [`pipeline`]: search → fetch → classify for one query
//! - [`output`]: CSV files and stdout rendering
//! - [`models`]: records, authors and queries
//! - [`config`]: configuration management
//! - [`utils`]: HTTP client

pub mod classify;
pub mod config;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{ClassifiedRecord, Record, RecordId, SearchQuery};
pub use sources::{LiteratureSource, PubMedSource, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
