//! Board-report CSV importer
//!
//! [`parse_initiatives_csv`] turns raw CSV text into a [`ParseResult`]. It
//! never fails: malformed input degrades to partial data plus warnings.
//!
//! Warning policy:
//! - structural decode problems (decoder errors, rows with the wrong number
//!   of fields, a quoted field left open at end of input): first
//!   [`MAX_DECODE_WARNINGS`] are reported
//! - missing required headers: one aggregate warning, parsing continues
//! - unparseable status or date cells: silent fallback, no warning

pub mod columns;
pub mod extract;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::model::{Initiative, ParseResult};
use columns::{missing_required_headers, ColumnIndex};
use extract::{extract_initiative, is_placeholder_row};

/// Cap on structural decode warnings surfaced per import
pub const MAX_DECODE_WARNINGS: usize = 5;

/// Parse board-report CSV text into initiatives and warnings.
///
/// The first row is the header row (each header trimmed). Rows whose cells
/// are all blank are skipped before anything else sees them; rows with blank
/// ID and name are dropped after decoding. Source order is preserved.
///
/// # Examples
///
/// ```
/// use boardroom_common::csv_import::parse_initiatives_csv;
///
/// let result = parse_initiatives_csv("ID,Strategic Initiative,Opportunity,Lead,Annual Status\nSI-1,CRM,Growth,A. Patel,on track\n");
/// assert_eq!(result.initiatives.len(), 1);
/// assert_eq!(result.initiatives[0].annual_status.label(), "On Track");
/// assert!(result.warnings.is_empty());
///
/// assert!(parse_initiatives_csv("   ").initiatives.is_empty());
/// ```
pub fn parse_initiatives_csv(csv_text: &str) -> ParseResult {
    let trimmed = csv_text.trim();
    if trimmed.is_empty() {
        return ParseResult::default();
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(trimmed.as_bytes());

    let mut decode_issues: Vec<String> = Vec::new();

    let headers: Vec<String> = match reader.headers() {
        Ok(record) => record.iter().map(|h| h.trim().to_string()).collect(),
        Err(e) => {
            decode_issues.push(decode_warning(&e.to_string(), e.position().map(|p| p.line())));
            return finish(Vec::new(), decode_issues);
        }
    };

    let mut rows: Vec<StringRecord> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                if is_blank_record(&record) {
                    continue;
                }
                if record.len() != headers.len() {
                    let kind = if record.len() < headers.len() { "Too few" } else { "Too many" };
                    decode_issues.push(decode_warning(
                        &format!(
                            "{} fields: expected {} fields but parsed {}",
                            kind,
                            headers.len(),
                            record.len()
                        ),
                        record.position().map(|p| p.line()),
                    ));
                }
                rows.push(record);
            }
            Err(e) => {
                decode_issues.push(decode_warning(&e.to_string(), e.position().map(|p| p.line())));
            }
        }
    }

    // The decoder silently runs an open quote to end of input
    if let Some(line) = unterminated_quote_line(trimmed) {
        decode_issues.push(decode_warning("Quoted field unterminated", Some(line)));
    }

    if rows.is_empty() {
        return finish(Vec::new(), decode_issues);
    }

    let mut warnings = Vec::new();
    let missing = missing_required_headers(&headers);
    if !missing.is_empty() {
        warnings.push(format!(
            "Missing expected header(s): {}. Parsing will continue, but results may be incomplete.",
            missing.join(", ")
        ));
    }

    let columns = ColumnIndex::resolve(&headers);
    let initiatives: Vec<_> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !is_placeholder_row(row, &columns))
        .map(|(index, row)| extract_initiative(row, &columns, index))
        .collect();

    debug!(
        "Parsed board CSV: {} data rows, {} initiatives, {} decode issues",
        rows.len(),
        initiatives.len(),
        decode_issues.len()
    );

    let mut result = finish(initiatives, decode_issues);
    result.warnings.extend(warnings);
    result
}

/// Structural warnings first, capped
fn finish(initiatives: Vec<Initiative>, mut decode_issues: Vec<String>) -> ParseResult {
    decode_issues.truncate(MAX_DECODE_WARNINGS);
    ParseResult {
        initiatives,
        warnings: decode_issues,
    }
}

fn decode_warning(message: &str, line: Option<u64>) -> String {
    match line {
        Some(line) => format!("CSV parse: {} (row {})", message, line),
        None => format!("CSV parse: {} (row —)", message),
    }
}

/// Every cell empty after trimming (stray delimiters included)
fn is_blank_record(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Line on which a quoted field opens and never closes, if any.
///
/// Follows the decoder's quoting: a quote only opens a field at its start,
/// and `""` inside a quoted field is an escaped quote.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    #[derive(PartialEq)]
    enum State {
        FieldStart,
        Unquoted,
        Quoted,
        QuoteInQuoted,
    }

    let mut state = State::FieldStart;
    let mut line: u64 = 1;
    let mut opened_on = line;
    for c in text.chars() {
        state = match (state, c) {
            (State::FieldStart, '"') => {
                opened_on = line;
                State::Quoted
            }
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, '"') => State::Quoted,
            (_, ',') | (_, '\n') => State::FieldStart,
            _ => State::Unquoted,
        };
        if c == '\n' {
            line += 1;
        }
    }

    (state == State::Quoted).then_some(opened_on)
}
