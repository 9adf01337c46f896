//! Record model representing one PubMed entry and its classified form.

use serde::{Deserialize, Serialize};

/// Placeholder used when the summary omits a title or publication date
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder used when an author entry has no name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Opaque PubMed identifier (PMID) as returned by ESearch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One author as listed in an ESummary document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// Author name, if the summary carries one
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text affiliation, possibly empty
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    /// Create an author with both fields set
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            affiliation: Some(affiliation.into()),
        }
    }

    /// Name to display, falling back to [`UNKNOWN_AUTHOR`]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// A PubMed record as fetched, before affiliation classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// PubMed identifier
    pub id: RecordId,

    /// Article title
    pub title: String,

    /// Publication date exactly as PubMed formats it (e.g. "2023 Jan 15")
    pub publication_date: String,

    /// Authors in the order the summary lists them
    pub authors: Vec<AuthorEntry>,
}

impl Record {
    /// Create a record with placeholder metadata and no authors
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            title: NOT_AVAILABLE.to_string(),
            publication_date: NOT_AVAILABLE.to_string(),
            authors: Vec::new(),
        }
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the publication date
    pub fn publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }

    /// Append an author
    pub fn author(mut self, author: AuthorEntry) -> Self {
        self.authors.push(author);
        self
    }

    /// Replace the author list
    pub fn authors(mut self, authors: Vec<AuthorEntry>) -> Self {
        self.authors = authors;
        self
    }
}

/// A record annotated with its non-academic authors and their affiliations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: Record,

    /// Names of non-academic authors joined with ", "
    pub non_academic_authors: String,

    /// Distinct company affiliations joined with ", ". Order is unspecified.
    pub company_affiliations: String,
}

impl std::fmt::Display for ClassifiedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let authors = self
            .record
            .authors
            .iter()
            .map(AuthorEntry::display_name)
            .collect::<Vec<_>>()
            .join("; ");

        write!(
            f,
            "PubmedID: {} | Title: {} | Publication Date: {} | Authors: {} | Non-academic Authors: {} | Company Affiliations: {}",
            self.record.id,
            self.record.title,
            self.record.publication_date,
            authors,
            self.non_academic_authors,
            self.company_affiliations
        )
    }
}
