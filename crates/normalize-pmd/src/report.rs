//! PMD CSV report parsing.
//!
//! PMD's `-f csv` renderer writes one quoted row per violation:
//!
//! ```text
//! "Problem","Package","File","Priority","Line","Description","Rule set","Rule"
//! "1","com.example","/src/Foo.java","3","12","Avoid unused private fields such as 'x'.","Best Practices","UnusedPrivateField"
//! ```
//!
//! Columns are positional. Rows may be ragged; missing trailing columns are empty.
//! Output read from a live process can end mid-row, so [`parse_output`] retries
//! once without the last line before giving up.

use serde::{Deserialize, Serialize};

/// First field of PMD's header row.
const HEADER_FIRST_FIELD: &str = "Problem";

/// One row of a PMD CSV report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmdRecord {
    pub problem: String,
    pub package: String,
    pub file: String,
    pub priority: Option<u32>,
    pub line: Option<usize>,
    pub description: String,
    pub rule_set: String,
    pub rule: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("unterminated quoted field in PMD CSV output")]
    UnterminatedQuote,
    #[error("invalid {column} value in PMD CSV output: {value:?}")]
    InvalidNumber { column: &'static str, value: String },
    #[error("malformed PMD CSV output: {0}")]
    Read(#[from] csv::Error),
    #[error("failed to parse PMD CSV output")]
    Unrecoverable,
}

impl PmdRecord {
    fn from_row(row: &csv::StringRecord) -> Result<Self, CsvError> {
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        Ok(Self {
            problem: field(0),
            package: field(1),
            file: field(2),
            priority: parse_number(row.get(3), "priority")?,
            line: parse_number(row.get(4), "line")?,
            description: field(5),
            rule_set: field(6),
            rule: field(7),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    value: Option<&str>,
    column: &'static str,
) -> Result<Option<T>, CsvError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| CsvError::InvalidNumber {
            column,
            value: value.to_string(),
        })
}

/// Strictly parse a PMD CSV report.
///
/// Skips blank lines and the header row. Fails on an unterminated quoted
/// field or a non-numeric priority/line.
pub fn parse_records(text: &str) -> Result<Vec<PmdRecord>, CsvError> {
    // PMD quotes every field and doubles embedded quotes, so an odd count
    // means a quoted field was cut off.
    if text.bytes().filter(|&b| b == b'"').count() % 2 != 0 {
        return Err(CsvError::UnterminatedQuote);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if row.get(0) == Some(HEADER_FIRST_FIELD) {
            continue;
        }
        records.push(PmdRecord::from_row(&row)?);
    }
    Ok(records)
}

/// Parse PMD output, tolerating one truncated trailing line.
///
/// On failure the last non-empty line is dropped and parsing is retried once.
/// The dropped line is not checked. A second failure yields
/// [`CsvError::Unrecoverable`].
pub fn parse_output(text: &str) -> Result<Vec<PmdRecord>, CsvError> {
    match parse_records(text) {
        Ok(records) => Ok(records),
        Err(first) => {
            tracing::debug!(error = %first, "retrying PMD CSV parse without last line");
            parse_records(without_last_line(text)).map_err(|_| CsvError::Unrecoverable)
        }
    }
}

/// Incremental parser for PMD output that arrives in chunks.
///
/// Complete lines are parsed as they arrive and appended to the current
/// batch; the unfinished tail waits for the next chunk. [`finish`](Self::finish)
/// parses the whole text once with [`parse_output`] and that result replaces
/// the streamed batch.
#[derive(Debug, Default)]
pub struct ReportStream {
    text: Vec<u8>,
    /// Bytes of `text` already turned into records.
    consumed: usize,
    records: Vec<PmdRecord>,
}

impl ReportStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk. Returns the number of records added.
    pub fn push(&mut self, chunk: &[u8]) -> usize {
        self.text.extend_from_slice(chunk);
        let pending = &self.text[self.consumed..];
        let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') else {
            return 0;
        };
        let segment = &pending[..=last_newline];
        // A newline inside a quoted field: wait for the closing quote.
        if segment.iter().filter(|&&b| b == b'"').count() % 2 != 0 {
            return 0;
        }

        let added = match parse_records(&String::from_utf8_lossy(segment)) {
            Ok(records) => {
                let n = records.len();
                self.records.extend(records);
                n
            }
            Err(e) => {
                tracing::debug!(error = %e, bytes = segment.len(), "skipping unparseable pmd output");
                0
            }
        };
        self.consumed += last_newline + 1;
        added
    }

    /// Records parsed so far.
    pub fn records(&self) -> &[PmdRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parse the complete output. Keeps the streamed batch if that fails.
    pub fn finish(self) -> Vec<PmdRecord> {
        match parse_output(&String::from_utf8_lossy(&self.text)) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, records = self.records.len(), "keeping streamed pmd results");
                self.records
            }
        }
    }
}

fn without_last_line(text: &str) -> &str {
    let trimmed = text.trim_end_matches(['\r', '\n']);
    match trimmed.rfind('\n') {
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}
