//! Line-oriented IFC record scanner
//!
//! Scans STEP text for entity definition lines (`#<id>=<TYPE>(...)`) and
//! groups them by entity type. This is a scraper, not a STEP parser: each
//! line stands alone and a line that does not decode or does not match is
//! skipped without failing the scan.

use crate::domain::{IfcRecord, RecordSet};
use std::io::BufRead;

/// Why a line produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not an entity definition (no leading `#` or no `=IFC`)
    NotAnEntity,
    /// No `=` to split id from payload
    MissingEquals,
    /// No `(` after the entity type
    MissingParenthesis,
    /// Entity type token is empty
    EmptyType,
    /// Bytes are not valid UTF-8
    Undecodable,
}

/// Per-scan counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines: usize,
    pub records: usize,
    /// Lines that looked like entities but could not be split
    pub malformed: usize,
    pub undecodable: usize,
}

/// Scans a whole text
pub fn extract(text: &str) -> RecordSet {
    let mut records = RecordSet::new();
    for (index, line) in text.lines().enumerate() {
        if let Ok(record) = parse_line(line, index + 1) {
            records.entry(record.entity_type.clone()).or_default().push(record);
        }
    }
    records
}

/// Scans a reader line by line
///
/// Undecodable lines are counted and skipped. Only I/O errors from the
/// reader itself end the scan.
pub fn extract_reader<R: BufRead>(mut reader: R) -> std::io::Result<(RecordSet, ExtractionStats)> {
    let mut records = RecordSet::new();
    let mut stats = ExtractionStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let outcome = match std::str::from_utf8(&buf) {
            Ok(line) => parse_line(line, stats.lines),
            Err(_) => Err(SkipReason::Undecodable),
        };

        match outcome {
            Ok(record) => {
                stats.records += 1;
                records.entry(record.entity_type.clone()).or_default().push(record);
            }
            Err(SkipReason::NotAnEntity) => {}
            Err(SkipReason::Undecodable) => {
                stats.undecodable += 1;
                tracing::debug!(line = stats.lines, "Skipping undecodable line");
            }
            Err(reason) => {
                stats.malformed += 1;
                tracing::debug!(line = stats.lines, reason = ?reason, "Skipping malformed entity line");
            }
        }
    }

    Ok((records, stats))
}

/// Classifies one line; `line_number` is 1-based
pub fn parse_line(line: &str, line_number: usize) -> Result<IfcRecord, SkipReason> {
    if !line.starts_with('#') || !line.contains("=IFC") {
        return Err(SkipReason::NotAnEntity);
    }

    let (id, payload) = line.split_once('=').ok_or(SkipReason::MissingEquals)?;
    let (entity_type, _) = payload.split_once('(').ok_or(SkipReason::MissingParenthesis)?;
    let entity_type = entity_type.trim();
    if entity_type.is_empty() {
        return Err(SkipReason::EmptyType);
    }

    Ok(IfcRecord {
        id: id.trim_start_matches('#').trim().to_string(),
        entity_type: entity_type.to_string(),
        line: line_number,
        raw_data: line.trim().to_string(),
    })
}

/// Keeps only the selected types; record lists are copied verbatim
///
/// Selected types absent from `records` are ignored.
pub fn project<S: AsRef<str>>(records: &RecordSet, selected_types: &[S]) -> RecordSet {
    selected_types
        .iter()
        .filter_map(|t| {
            let t = t.as_ref();
            records.get(t).map(|list| (t.to_string(), list.clone()))
        })
        .collect()
}
