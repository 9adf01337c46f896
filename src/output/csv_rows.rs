//! CSV file format.
//!
//! The `Authors` column carries the full author list as a JSON array of
//! `{"name", "affiliation"}` objects so a written file can be read back
//! without losing affiliations.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

use super::OutputError;
use crate::models::{AuthorEntry, ClassifiedRecord, Record, RecordId};

/// Header row, in column order
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Authors",
    "Non-academic Authors",
    "Company Affiliations",
];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "PubmedID")]
    pubmed_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Authors")]
    authors: String,
    #[serde(rename = "Non-academic Authors")]
    non_academic_authors: String,
    #[serde(rename = "Company Affiliations")]
    company_affiliations: String,
}

impl CsvRow {
    fn from_record(classified: &ClassifiedRecord) -> Result<Self, OutputError> {
        let record = &classified.record;
        Ok(Self {
            pubmed_id: record.id.to_string(),
            title: record.title.clone(),
            publication_date: record.publication_date.clone(),
            authors: serde_json::to_string(&record.authors)?,
            non_academic_authors: classified.non_academic_authors.clone(),
            company_affiliations: classified.company_affiliations.clone(),
        })
    }

    fn into_record(self) -> Result<ClassifiedRecord, OutputError> {
        let authors: Vec<AuthorEntry> = if self.authors.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.authors)?
        };

        Ok(ClassifiedRecord {
            record: Record::new(RecordId::from(self.pubmed_id))
                .title(self.title)
                .publication_date(self.publication_date)
                .authors(authors),
            non_academic_authors: self.non_academic_authors,
            company_affiliations: self.company_affiliations,
        })
    }
}

/// Write the header and one row per record.
///
/// The header is written even when `records` is empty.
pub fn write_csv<W: io::Write>(
    writer: W,
    records: &[ClassifiedRecord],
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(CsvRow::from_record(record)?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a CSV file, creating or truncating it
pub fn write_csv_file(path: &Path, records: &[ClassifiedRecord]) -> Result<(), OutputError> {
    if records.is_empty() {
        tracing::warn!(
            "No records to write; {} will contain only the header row",
            path.display()
        );
    }

    let file = File::create(path)?;
    write_csv(file, records)?;
    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Parse records previously written by [`write_csv`]
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<ClassifiedRecord>, OutputError> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADERS.iter().copied()) {
        return Err(OutputError::Header(
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }

    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map_err(OutputError::from)?.into_record())
        .collect()
}

/// Parse a CSV file previously written by [`write_csv_file`]
pub fn read_csv_file(path: &Path) -> Result<Vec<ClassifiedRecord>, OutputError> {
    read_csv(File::open(path)?)
}
