//! Text rendering for standard output.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

use super::OutputError;
use crate::models::ClassifiedRecord;

/// Column width cap for free-text cells in table output
const MAX_CELL_CHARS: usize = 60;

/// How records are printed when no output file is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per record
    Plain,
    /// Pretty-printed JSON array
    Json,
    /// Human-readable table
    Table,
}

/// Render records for standard output
pub fn render(records: &[ClassifiedRecord], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Plain => Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

fn render_table(records: &[ClassifiedRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            "PubmedID",
            "Title",
            "Publication Date",
            "Non-academic Authors",
            "Company Affiliations",
        ]);

    for classified in records {
        let record = &classified.record;
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(truncate(&record.title, MAX_CELL_CHARS)).add_attribute(Attribute::Bold),
            Cell::new(&record.publication_date),
            Cell::new(truncate(&classified.non_academic_authors, MAX_CELL_CHARS)),
            Cell::new(truncate(&classified.company_affiliations, MAX_CELL_CHARS)),
        ]);
    }

    table.to_string()
}

/// Cut `text` to at most `max_chars` characters, marking the cut with "..."
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
