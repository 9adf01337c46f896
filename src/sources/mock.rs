//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Record, RecordId, SearchQuery};
use crate::sources::{LiteratureSource, SourceError};

/// A mock source that returns predefined ids and records and counts calls.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Mutex<Vec<RecordId>>,
    records: Mutex<HashMap<RecordId, Record>>,
    fail_search: Mutex<Option<String>>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ids returned by `search_ids`.
    pub fn set_ids(&self, ids: Vec<RecordId>) {
        let mut guard = self.ids.lock().unwrap();
        *guard = ids;
    }

    /// Register a record served by `fetch_details`.
    pub fn add_record(&self, record: Record) {
        let mut guard = self.records.lock().unwrap();
        guard.insert(record.id.clone(), record);
    }

    /// Make `search_ids` fail with a transport error.
    pub fn fail_search_with(&self, message: impl Into<String>) {
        let mut guard = self.fail_search.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Number of `search_ids` calls so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_details` calls so far, including calls with no ids.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiteratureSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_ids(&self, _query: &SearchQuery) -> Result<Vec<RecordId>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_search.lock().unwrap().clone() {
            return Err(SourceError::Api(message));
        }
        Ok(self.ids.lock().unwrap().clone())
    }

    async fn fetch_details(&self, ids: &[RecordId]) -> Result<Vec<Record>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let guard = self.records.lock().unwrap();
        Ok(ids
            .iter()
            .map(|id| {
                guard
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Record::new(id.clone()))
            })
            .collect())
    }
}
