//! Interaction record ingestion
//!
//! Reads `sender,receiver,weight` tables with a header row. Rows that do
//! not parse into exactly three integers are skipped and reported; they
//! never abort the load.

use crate::graph::{InteractionRecord, NodeId};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input had no header row
    #[error("Input is empty: expected a sender,receiver,weight header")]
    MissingHeader,

    /// A data row could not be parsed
    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

pub type IngestResult<T> = Result<T, IngestError>;

/// A data row that was left out of the load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input, header included
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Parsed records plus the rows that were skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub records: Vec<InteractionRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestReport {
    /// Number of distinct actors across the parsed records
    pub fn actor_count(&self) -> usize {
        raw_actor_count(&self.records)
    }
}

fn parse_row(line: usize, content: &str) -> IngestResult<InteractionRecord> {
    let fields: Vec<&str> = content.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(IngestError::MalformedRow {
            line,
            reason: format!("expected 3 fields, found {}", fields.len()),
        });
    }

    let mut values = [0i64; 3];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| IngestError::MalformedRow {
            line,
            reason: format!("'{}' is not an integer", field),
        })?;
    }

    Ok(InteractionRecord::new(values[0], values[1], values[2]))
}

/// Parse records from a reader. The first line is the header.
///
/// Lines are split on raw bytes so a row that is not valid UTF-8 is
/// skipped like any other malformed row. Read failures stay fatal.
pub fn parse_records<R: BufRead>(reader: R) -> IngestResult<IngestReport> {
    let mut lines = reader.split(b'\n');
    match lines.next() {
        Some(header) => {
            header?;
        }
        None => return Err(IngestError::MissingHeader),
    }

    let mut report = IngestReport::default();
    for (offset, line) in lines.enumerate() {
        let line_no = offset + 2;
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
                warn!("Skipping row {} (invalid UTF-8): {}", line_no, content);
                report.skipped.push(SkippedRow {
                    line: line_no,
                    content,
                    reason: "invalid UTF-8".to_string(),
                });
                continue;
            }
        };
        if content.trim().is_empty() {
            continue;
        }

        match parse_row(line_no, &content) {
            Ok(record) => report.records.push(record),
            Err(IngestError::MalformedRow { line, reason }) => {
                warn!("Skipping row {} ({}): {}", line, reason, content);
                report.skipped.push(SkippedRow {
                    line,
                    content,
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Parsed {} interaction records, skipped {} rows",
        report.records.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Parse records from a CSV file on disk
pub fn load_records(path: impl AsRef<Path>) -> IngestResult<IngestReport> {
    let path = path.as_ref();
    info!("Loading interaction records from {:?}", path);
    let file = File::open(path)?;
    parse_records(BufReader::new(file))
}

/// Distinct ids appearing as sender or receiver in the record sequence.
///
/// Counts every record as given, self-loops and non-positive weights
/// included, independent of what the graph store retained.
pub fn raw_actor_count(records: &[InteractionRecord]) -> usize {
    let mut actors: FxHashSet<NodeId> = FxHashSet::default();
    for record in records {
        actors.insert(record.source);
        actors.insert(record.destination);
    }
    actors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_skips_header_and_malformed_rows() {
        let input = "sender,receiver,weight\n1,2,5\n2, 3 ,1\nbad,row\n4,5,x\n\n1,3,10\n";
        let report = parse_records(Cursor::new(input)).unwrap();

        assert_eq!(
            report.records,
            vec![
                InteractionRecord::new(1, 2, 5),
                InteractionRecord::new(2, 3, 1),
                InteractionRecord::new(1, 3, 10),
            ]
        );
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 4);
        assert_eq!(report.skipped[1].line, 5);
        assert!(report.skipped[1].reason.contains("'x'"));
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let input: &[u8] = b"sender,receiver,weight\r\n1,2,5\r\n\xff\xfe,3,1\n2,3,1\n";
        let report = parse_records(Cursor::new(input)).unwrap();

        assert_eq!(
            report.records,
            vec![InteractionRecord::new(1, 2, 5), InteractionRecord::new(2, 3, 1)]
        );
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
        assert_eq!(report.skipped[0].reason, "invalid UTF-8");
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = parse_records(Cursor::new(""));
        assert!(matches!(result, Err(IngestError::MissingHeader)));
    }

    #[test]
    fn test_raw_actor_count_includes_receivers_and_self_loops() {
        let records = vec![
            InteractionRecord::new(1, 2, 1),
            InteractionRecord::new(3, 3, 1),
            InteractionRecord::new(2, 4, 0),
        ];
        assert_eq!(raw_actor_count(&records), 4);
    }
}
