//! PubMed source implementation using the E-utilities JSON API.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{Config, EutilsConfig};
use crate::models::{AuthorEntry, Record, RecordId, SearchQuery, NOT_AVAILABLE};
use crate::sources::{LiteratureSource, SourceError};
use crate::utils::HttpClient;

/// PubMed literature source
///
/// ESearch yields the PMIDs for a query; a single batched ESummary call then
/// yields title, publication date and authors for all of them.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    eutils: EutilsConfig,
}

impl PubMedSource {
    /// Create a new PubMed source against the public NCBI endpoints
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&Config::default())
    }

    /// Create a source from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::from_config(&config.http)?),
            eutils: config.eutils.clone(),
        })
    }

    /// Create with a custom HTTP client and endpoints (for testing)
    pub fn with_client(client: Arc<HttpClient>, eutils: EutilsConfig) -> Self {
        Self { client, eutils }
    }

    /// Query parameters for ESearch
    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        vec![
            ("db", self.eutils.database.clone()),
            ("term", query.query.clone()),
            ("retmax", query.max_results.to_string()),
            ("retmode", "json".to_string()),
        ]
    }

    /// Query parameters for ESummary, all ids in one comma-joined value
    fn summary_params(&self, ids: &[RecordId]) -> Vec<(&'static str, String)> {
        let joined = ids
            .iter()
            .map(RecordId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("db", self.eutils.database.clone()),
            ("id", joined),
            ("retmode", "json".to_string()),
        ]
    }

    /// GET `url` and return the body, failing on any non-success status
    async fn get_body(
        &self,
        url: &str,
        params: &[(&'static str, String)],
        action: &str,
    ) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to {}: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "PubMed API returned status: {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }

    /// Parse an ESearch JSON body into identifiers.
    ///
    /// Any shape mismatch under the top level (missing or mistyped
    /// `esearchresult` / `idlist`) yields an empty list. Numeric ids are kept as
    /// their decimal text; other non-string entries are skipped.
    fn parse_search_response(body: &str) -> Result<Vec<RecordId>, SourceError> {
        let data: Value = serde_json::from_str(body).map_err(|e| {
            SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e))
        })?;

        Ok(data
            .get("esearchresult")
            .and_then(|result| result.get("idlist"))
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| match id {
                        Value::String(id) => Some(RecordId::from(id.as_str())),
                        Value::Number(id) => Some(RecordId::from(id.to_string())),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Parse an ESummary JSON body into one record per requested id.
    ///
    /// Output order follows `ids`, not the response. Ids the response does not
    /// mention become placeholder records.
    fn parse_summary_response(body: &str, ids: &[RecordId]) -> Result<Vec<Record>, SourceError> {
        let data: Value = serde_json::from_str(body).map_err(|e| {
            SourceError::Parse(format!("Failed to parse PubMed summary JSON: {}", e))
        })?;

        let results = data.get("result");

        Ok(ids
            .iter()
            .map(|id| {
                let summary = results.and_then(|r| r.get(id.as_str()));
                if summary.is_none() {
                    tracing::debug!("No summary returned for PMID {}", id);
                }
                summary_to_record(id, summary)
            })
            .collect())
    }
}

fn string_field<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a str> {
    value.and_then(|v| v.get(key)).and_then(Value::as_str)
}

fn summary_to_record(id: &RecordId, summary: Option<&Value>) -> Record {
    let authors = summary
        .and_then(|s| s.get("authors"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| AuthorEntry {
                    name: string_field(Some(entry), "name").map(String::from),
                    affiliation: string_field(Some(entry), "affiliation").map(String::from),
                })
                .collect()
        })
        .unwrap_or_default();

    Record::new(id.clone())
        .title(string_field(summary, "title").unwrap_or(NOT_AVAILABLE))
        .publication_date(string_field(summary, "pubdate").unwrap_or(NOT_AVAILABLE))
        .authors(authors)
}

#[async_trait]
impl LiteratureSource for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<RecordId>, SourceError> {
        if query.is_blank() {
            return Err(SourceError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }

        tracing::debug!(
            "Searching PubMed for {:?} (retmax={})",
            query.query,
            query.max_results
        );

        let body = self
            .get_body(
                &self.eutils.search_url,
                &self.search_params(query),
                "search PubMed",
            )
            .await?;

        let ids = Self::parse_search_response(&body)?;
        tracing::debug!("PubMed search returned {} ids", ids.len());
        Ok(ids)
    }

    async fn fetch_details(&self, ids: &[RecordId]) -> Result<Vec<Record>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Fetching PubMed summaries for {} ids", ids.len());

        let body = self
            .get_body(
                &self.eutils.summary_url,
                &self.summary_params(ids),
                "fetch PubMed details",
            )
            .await?;

        Self::parse_summary_response(&body, ids)
    }
}
