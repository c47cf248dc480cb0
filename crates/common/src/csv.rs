//! CSV rendering for admin exports.
//!
//! Exports carry Thai free text, so the output is prefixed with a UTF-8
//! byte-order-mark (spreadsheet tools mis-detect the encoding without it)
//! and every field is quoted unconditionally.

/// UTF-8 byte-order-mark prefixed to every CSV document.
pub const CSV_BOM: char = '\u{FEFF}';

/// Quote a single field: wrap in double quotes, doubling literal quotes.
///
/// Applied to every field, headers included. Question prompts and comments
/// routinely contain commas, quotes and newlines; uniform quoting keeps
/// column alignment intact.
fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render headers and rows as a BOM-prefixed CSV document.
///
/// Rows are joined with `\n`. Callers are responsible for keeping every row
/// the same width as `headers`.
#[must_use]
pub fn to_csv(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push(CSV_BOM);

    let header_line = headers
        .iter()
        .map(|h| escape_field(h))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&header_line);

    for row in rows {
        out.push('\n');
        let line = row
            .iter()
            .map(|f| escape_field(f))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(ToString::to_string).collect()
    }

    /// Minimal RFC 4180 parser for round-trip checks.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let text = text.strip_prefix(CSV_BOM).unwrap_or(text);
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        row.push(field);
        rows.push(row);
        rows
    }

    #[test]
    fn test_bom_present_exactly_once() {
        let csv = to_csv(&strings(&["a"]), &[strings(&["b"])]);
        assert!(csv.starts_with(CSV_BOM));
        assert_eq!(csv.matches(CSV_BOM).count(), 1);
    }

    #[test]
    fn test_every_field_quoted() {
        let csv = to_csv(&strings(&["a", "b"]), &[strings(&["1", "2"])]);
        assert!(csv.contains("\"a\",\"b\""));
        assert!(csv.contains("\"1\",\"2\""));
    }

    #[test]
    fn test_round_trip_comma_and_quote() {
        let tricky = "Do you agree, \"really\"?";
        let csv = to_csv(&strings(&[tricky, "Comment"]), &[strings(&["AGREE", ""])]);

        let parsed = parse_csv(&csv);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0][0], tricky);
        assert_eq!(parsed[1], vec!["AGREE".to_string(), String::new()]);
    }

    #[test]
    fn test_round_trip_embedded_newline() {
        let cell = "first: one\nsecond: two";
        let csv = to_csv(&strings(&["Comments"]), &[strings(&[cell])]);

        let parsed = parse_csv(&csv);
        assert_eq!(parsed[1][0], cell);
    }

    #[test]
    fn test_thai_text_survives() {
        let prompt = "ท่านเห็นด้วยหรือไม่";
        let csv = to_csv(&strings(&[prompt]), &[]);
        assert!(csv.contains(prompt));
    }

    #[test]
    fn test_rectangular_rows_keep_width() {
        let headers = strings(&["Date", "Respondent", "Q1", "Comment"]);
        let rows = vec![strings(&["2025-01-01", "abc1234567", "", ""])];
        let parsed = parse_csv(&to_csv(&headers, &rows));
        assert_eq!(parsed[0].len(), parsed[1].len());
    }
}
