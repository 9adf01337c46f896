//! Search → fetch → classify orchestration.

use crate::classify::classify;
use crate::models::{ClassifiedRecord, SearchQuery};
use crate::sources::{LiteratureSource, SourceError};

/// Run the full lookup for one query.
///
/// Performs at most two remote calls, strictly in sequence. When the search finds
/// nothing the detail fetch is skipped and an empty list is returned. Any source
/// error aborts the run; there is no partial result.
pub async fn run(
    source: &dyn LiteratureSource,
    query: &SearchQuery,
) -> Result<Vec<ClassifiedRecord>, SourceError> {
    tracing::debug!("Fetching papers for query: {} (source: {})", query.query, source.id());

    let ids = source.search_ids(query).await?;
    tracing::info!("Found {} papers in {}", ids.len(), source.name());

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let records = source.fetch_details(&ids).await?;
    let classified = classify(records);

    let flagged = classified
        .iter()
        .filter(|record| !record.non_academic_authors.is_empty())
        .count();
    tracing::debug!(
        "{} of {} papers list at least one non-academic author",
        flagged,
        classified.len()
    );

    Ok(classified)
}
