//! Author affiliation classification.
//!
//! An author counts as non-academic when their affiliation is present, non-empty,
//! and does not contain "university" in any letter case. Everything else is
//! academic and contributes nothing to the derived fields.
//!
//! The rule is a heuristic: "University Hospital" is academic, while
//! "Institute of Technology", "College" or a government laboratory all count as
//! companies.
//!
//! Company affiliations are deduplicated through a `HashSet`, so their order in
//! [`ClassifiedRecord::company_affiliations`] is unspecified and can change from
//! one run to the next.

use std::collections::HashSet;

use crate::models::{AuthorEntry, ClassifiedRecord, Record};

/// Substring that marks an affiliation as academic
pub const ACADEMIC_MARKER: &str = "university";

/// Separator used for both derived fields
pub const LIST_SEPARATOR: &str = ", ";

/// Whether an affiliation string looks non-academic
pub fn is_non_academic_affiliation(affiliation: &str) -> bool {
    !affiliation.is_empty() && !affiliation.to_lowercase().contains(ACADEMIC_MARKER)
}

/// The author's affiliation, if it marks them as non-academic
fn company_affiliation(author: &AuthorEntry) -> Option<&str> {
    author
        .affiliation
        .as_deref()
        .filter(|affiliation| is_non_academic_affiliation(affiliation))
}

/// Classify the authors of a single record
pub fn classify_record(record: Record) -> ClassifiedRecord {
    let mut names = Vec::new();
    let mut affiliations = Vec::new();

    for author in &record.authors {
        if let Some(affiliation) = company_affiliation(author) {
            names.push(author.display_name());
            affiliations.push(affiliation);
        }
    }

    let non_academic_authors = names.join(LIST_SEPARATOR);
    let company_affiliations = affiliations
        .into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);

    ClassifiedRecord {
        record,
        non_academic_authors,
        company_affiliations,
    }
}

/// Classify every record, consuming the fetched records
pub fn classify(records: Vec<Record>) -> Vec<ClassifiedRecord> {
    records.into_iter().map(classify_record).collect()
}
