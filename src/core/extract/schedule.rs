//! Tab-delimited schedule text
//!
//! Hosts export schedules as tab-separated text with one or more title and
//! header lines above the data. The header row is located by looking for a
//! line that mentions every column name.

use crate::domain::{ScheduleField, ScheduleRecord, ScheduleRow};

/// Parses exported schedule text into rows keyed by header name
pub fn parse_schedule_text(headers: &[ScheduleField], text: &str) -> Vec<ScheduleRow> {
    let lines: Vec<&str> = text.lines().collect();
    let skip = header_rows(headers, &lines);

    lines
        .iter()
        .skip(skip)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split('\t')
                .zip(headers)
                .map(|(cell, header)| (header.name.clone(), cell.trim().to_string()))
                .collect()
        })
        .collect()
}

/// Number of lines above the first data row
///
/// The last line never counts as a header. Falls back to one line when no
/// header row is found.
fn header_rows(headers: &[ScheduleField], lines: &[&str]) -> usize {
    let last = lines.len().saturating_sub(1);
    let found = lines.iter().enumerate().position(|(i, line)| {
        !line.trim().is_empty()
            && i < last
            && headers
                .iter()
                .filter(|h| !h.name.is_empty())
                .all(|h| line.contains(h.name.as_str()))
    });

    match found {
        Some(i) => i + 1,
        None if lines.is_empty() => 0,
        None => 1,
    }
}

/// Builds a schedule record from its fields and exported text
pub fn schedule_from_export(
    id: i64,
    name: impl Into<String>,
    category: Option<i64>,
    headers: Vec<ScheduleField>,
    text: &str,
) -> ScheduleRecord {
    let rows = parse_schedule_text(&headers, text);
    ScheduleRecord {
        id,
        name: name.into(),
        category,
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<ScheduleField> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ScheduleField {
                id: i as i64 + 1,
                name: name.to_string(),
                field_type: "Instance".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_title_line_then_header_row() {
        let headers = fields(&["Mark", "Width", "Level"]);
        let text = "Door Schedule\nMark\tWidth\tLevel\n\nD1\t0.9\tL1\nD2\t 1.2 \tL2\textra\n";

        let rows = parse_schedule_text(&headers, text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Mark"], "D1");
        assert_eq!(rows[1]["Width"], "1.2");
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_header_not_found_skips_one_line() {
        let headers = fields(&["Mark", "Comments"]);
        let text = "Mark\tNotes\nD1\tfire rated\n";

        let rows = parse_schedule_text(&headers, text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Comments"], "fire rated");
    }

    #[test]
    fn test_last_line_is_never_the_header() {
        let headers = fields(&["Mark"]);
        let rows = parse_schedule_text(&headers, "Title\nMark");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Mark"], "Mark");
    }

    #[test]
    fn test_short_rows_and_empty_text() {
        let headers = fields(&["Mark", "Width"]);
        let rows = parse_schedule_text(&headers, "Mark\tWidth\nD1\n");
        assert_eq!(rows[0].len(), 1);

        assert!(parse_schedule_text(&headers, "").is_empty());
    }

    #[test]
    fn test_schedule_from_export() {
        let record = schedule_from_export(
            501,
            "Door Schedule",
            Some(-2000023),
            fields(&["Mark"]),
            "Door Schedule\nMark\nD1\n",
        );
        assert_eq!(record.rows.len(), 1);
        assert_eq!(record.headers[0].name, "Mark");
    }
}
