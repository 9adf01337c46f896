//! Utility modules supporting the fetch pipeline.
//!
//! - [`HttpClient`]: shared reqwest client configured from [`crate::config::HttpConfig`]

mod http;

pub use http::HttpClient;
