//! CSV ingestion into task descriptors.
//!
//! The upload format is a UTF-8 CSV with a header row. Each logical column
//! is recognized under several header spellings; per row, the first alias
//! with a non-empty value wins.

use comicforge_core::{CsvRow, normalize};
use comicforge_error::{CsvError, CsvErrorKind};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Accepted header spellings for the page-number column, in priority order.
const PAGE_NUMBER_ALIASES: [&str; 3] = ["ページ番号", "page_number", "ページ"];
/// Accepted header spellings for the template-name column.
const TEMPLATE_ALIASES: [&str; 3] = ["使用するコマ割りテンプレ", "template", "テンプレート"];
/// Accepted header spellings for the prompt column.
const PROMPT_ALIASES: [&str; 3] = ["漫画作成のプロンプト", "prompt", "プロンプト"];

/// Parse CSV content from a reader into an ordered sequence of rows.
///
/// Field cleanup per row: the page number is trimmed with a single trailing
/// comma stripped, the template name runs through the normalizer, and the
/// prompt is trimmed. Rows missing any of the three resulting values are
/// dropped silently (logged at debug). Header-only input or input with no
/// matching columns yields an empty sequence; the orchestrator turns that
/// into its "no data" precondition error, never into silent success.
///
/// # Errors
///
/// Returns an error only for input that cannot be read or decoded at all.
pub fn parse_csv(input: impl Read) -> Result<Vec<CsvRow>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| CsvError::new(CsvErrorKind::Malformed(e.to_string())))?
        .clone();

    let page_columns = find_columns(&headers, &PAGE_NUMBER_ALIASES);
    let template_columns = find_columns(&headers, &TEMPLATE_ALIASES);
    let prompt_columns = find_columns(&headers, &PROMPT_ALIASES);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CsvError::new(CsvErrorKind::Malformed(e.to_string())))?;

        let raw_page = pick(&record, &page_columns).trim();
        let page_number = raw_page.strip_suffix(',').unwrap_or(raw_page).to_string();
        let template_name = normalize(pick(&record, &template_columns));
        let prompt = pick(&record, &prompt_columns).trim().to_string();

        let row = CsvRow::new(page_number, template_name, prompt);
        if row.is_complete() {
            rows.push(row);
        } else {
            debug!(?row, "Dropping incomplete CSV row");
        }
    }

    Ok(rows)
}

/// Parse CSV content from a string.
pub fn parse_csv_str(input: &str) -> Result<Vec<CsvRow>, CsvError> {
    parse_csv(input.as_bytes())
}

/// Parse CSV content from a file on disk.
pub fn parse_csv_path(path: &Path) -> Result<Vec<CsvRow>, CsvError> {
    let file = std::fs::File::open(path)
        .map_err(|e| CsvError::new(CsvErrorKind::Read(format!("{}: {}", path.display(), e))))?;
    parse_csv(file)
}

/// Indices of every header matching one of the aliases, in alias order.
///
/// A UTF-8 BOM on the first header cell is ignored when matching.
fn find_columns(headers: &csv::StringRecord, aliases: &[&str]) -> Vec<usize> {
    let mut columns = Vec::new();
    for alias in aliases {
        for (idx, header) in headers.iter().enumerate() {
            if header.trim_start_matches('\u{feff}').trim() == *alias {
                columns.push(idx);
            }
        }
    }
    columns
}

/// First non-empty raw value among the candidate columns.
fn pick<'a>(record: &'a csv::StringRecord, columns: &[usize]) -> &'a str {
    for &idx in columns {
        if let Some(value) = record.get(idx) {
            if !value.is_empty() {
                return value;
            }
        }
    }
    ""
}
