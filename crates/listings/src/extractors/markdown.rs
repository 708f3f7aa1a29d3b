// ABOUTME: Extracts internship rows from a Markdown README with pipe tables grouped under company lines.
// ABOUTME: A single forward scan carries the current company from each header line to the rows after it.

//! README table extraction.
//!
//! Lines are trimmed and classified one at a time, with no lookahead:
//! - A header line starts with `| **[` and contains `](`; the text between the
//!   first `[` and the following `]` becomes the current company. Header lines
//!   never produce a row themselves.
//! - A row line starts with `|` and contains another `|`. While a company is
//!   active it is split on `|`; with at least four cells, cell 2 is the role
//!   and cell 3 the location.
//! - Anything else is ignored.

use tracing::debug;

use crate::models::InternshipListing;

const HEADER_PREFIX: &str = "| **[";
const LINK_DESTINATION_MARKER: &str = "](";
/// Role cell text of the table's own header row.
const HEADER_LABEL: &str = "Role";
const SEPARATOR_MARKER: &str = "---";
const MIN_CELLS: usize = 4;

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A company line. `None` when the line has the header shape but no usable name.
    Header(Option<&'a str>),
    /// A pipe-delimited line that may carry a role and location.
    Row(&'a str),
    Other,
}

/// Classifies a trimmed line.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.starts_with(HEADER_PREFIX) && line.contains(LINK_DESTINATION_MARKER) {
        return Line::Header(company_name(line));
    }
    if line.starts_with('|') && line[1..].contains('|') {
        return Line::Row(line);
    }
    Line::Other
}

/// Text between the first `[` and the next `]`, if non-empty.
fn company_name(line: &str) -> Option<&str> {
    let start = line.find('[')? + 1;
    let end = start + line[start..].find(']')?;
    let name = &line[start..end];
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Splits a row line and returns `(role, location)` if the row is accepted.
pub fn parse_row_line(line: &str) -> Option<(String, String)> {
    let cells: Vec<&str> = line.split('|').collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let role = cells[2].trim();
    let location = cells[3].trim();
    if role.is_empty() || role == HEADER_LABEL || role.contains(SEPARATOR_MARKER) {
        return None;
    }
    Some((role.to_string(), location.to_string()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTableExtractor;

impl MarkdownTableExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts internship listings in line order.
    ///
    /// The current company starts out unset on every call, so rows before the
    /// first header line are skipped.
    pub fn extract(&self, raw: &str) -> Vec<InternshipListing> {
        let (_, listings) = raw.lines().map(str::trim).fold(
            (None::<String>, Vec::new()),
            |(company, mut listings), line| match classify_line(line) {
                Line::Header(Some(name)) => {
                    debug!(company = name, "entering company section");
                    (Some(name.to_string()), listings)
                }
                Line::Row(row) => {
                    if let Some(current) = company.as_deref() {
                        if let Some((role, location)) = parse_row_line(row) {
                            listings.push(InternshipListing::new(current, role, location));
                        }
                    }
                    (company, listings)
                }
                Line::Header(None) | Line::Other => (company, listings),
            },
        );
        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(raw: &str) -> Vec<InternshipListing> {
        MarkdownTableExtractor::new().extract(raw)
    }

    #[test]
    fn test_company_header_then_rows() {
        let raw = "| **[Acme](url)** |\n| --- | --- | --- | --- |\n| x | Engineer | NYC | Apply |\n";
        assert_eq!(
            extract(raw),
            vec![InternshipListing::new("Acme", "Engineer", "NYC")]
        );
    }

    #[test]
    fn test_row_with_three_cells_skipped() {
        let raw = "| **[Acme](url)** |\n| x | Engineer\n";
        assert!(extract(raw).is_empty());
    }

    #[test]
    fn test_rows_before_any_header_skipped() {
        let raw = "\
| Company | Role | Location | Application |
| x | Orphan | Remote | Apply |
| **[Acme](https://acme.example)** |
| x | Engineer | NYC | Apply |
";
        assert_eq!(
            extract(raw),
            vec![InternshipListing::new("Acme", "Engineer", "NYC")]
        );
    }

    #[test]
    fn test_company_switches_at_each_header() {
        let raw = "\
| **[Acme](https://acme.example)** |
| x | Engineer | NYC | Apply |
| x | Analyst | Boston, MA | Apply |
| **[Globex](https://globex.example)** |
| x | Data Intern | Remote | Apply |
";
        assert_eq!(
            extract(raw),
            vec![
                InternshipListing::new("Acme", "Engineer", "NYC"),
                InternshipListing::new("Acme", "Analyst", "Boston, MA"),
                InternshipListing::new("Globex", "Data Intern", "Remote"),
            ]
        );
    }

    #[test]
    fn test_header_line_never_produces_a_row() {
        let raw = "| **[Acme](https://acme.example)** | Software Intern | NYC | Apply |";
        assert!(extract(raw).is_empty());
    }

    #[test]
    fn test_header_shape_without_name_keeps_previous_company() {
        let raw = "\
| **[Acme](https://acme.example)** |
| **[](https://empty.example)** |
| x | Engineer | NYC | Apply |
";
        assert_eq!(
            extract(raw),
            vec![InternshipListing::new("Acme", "Engineer", "NYC")]
        );
    }

    #[test]
    fn test_table_header_and_separator_rows_rejected() {
        let raw = "\
| **[Acme](https://acme.example)** |
| Company | Role | Location | Application |
| ------- | :---: | -------- | ----------- |
| x |  | NYC | Apply |
| x | Intern | | Apply |
";
        assert_eq!(extract(raw), vec![InternshipListing::new("Acme", "Intern", "")]);
    }

    #[test]
    fn test_role_label_match_is_literal() {
        let raw = "| **[Acme](u)** |\n| x | role | NYC | Apply |\n| x | Roles | SF | Apply |\n";
        assert_eq!(
            extract(raw),
            vec![
                InternshipListing::new("Acme", "role", "NYC"),
                InternshipListing::new("Acme", "Roles", "SF"),
            ]
        );
    }

    #[test]
    fn test_surrounding_whitespace_and_crlf() {
        let raw = "   | **[Acme](u)** |  \r\n\t| x |  Engineer  |  NYC  | Apply |\r\n";
        assert_eq!(
            extract(raw),
            vec![InternshipListing::new("Acme", "Engineer", "NYC")]
        );
    }

    #[test]
    fn test_non_table_lines_ignored() {
        let raw = "\
# Summer 2026 Internships
| **[Acme](u)** |
Some prose with a | pipe in it
- a list item
| x | Engineer | NYC | Apply |
";
        assert_eq!(
            extract(raw),
            vec![InternshipListing::new("Acme", "Engineer", "NYC")]
        );
    }

    #[test]
    fn test_each_call_starts_without_company() {
        let ext = MarkdownTableExtractor::new();
        let first = ext.extract("| **[Acme](u)** |\n| x | Engineer | NYC | Apply |\n");
        let second = ext.extract("| x | Engineer | NYC | Apply |\n");
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("| **[Acme](u)** |"), Line::Header(Some("Acme")));
        assert_eq!(classify_line("| **[Acme** |"), Line::Row("| **[Acme** |"));
        assert_eq!(classify_line("| **[Acme(u)** |"), Line::Row("| **[Acme(u)** |"));
        assert_eq!(classify_line("| **[Acme](u"), Line::Header(Some("Acme")));
        assert_eq!(classify_line("| **[Acme(u) and ](x)"), Line::Header(Some("Acme(u) and ")));
        assert_eq!(classify_line("| a | b |"), Line::Row("| a | b |"));
        assert_eq!(classify_line("|"), Line::Other);
        assert_eq!(classify_line("plain text"), Line::Other);
    }

    #[test]
    fn test_parse_row_line() {
        assert_eq!(
            parse_row_line("| ↳ | SWE Intern | Remote in USA | Apply |"),
            Some(("SWE Intern".to_string(), "Remote in USA".to_string()))
        );
        assert_eq!(parse_row_line("| x | Engineer"), None);
        assert_eq!(parse_row_line("| x | Role | Location | Apply |"), None);
        assert_eq!(parse_row_line("| x | a---b | NYC | Apply |"), None);
    }
}
