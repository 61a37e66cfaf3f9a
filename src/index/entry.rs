/*! Line parsing.

One inverted index result line is `<key>,<value1>[,<value2>,...]`. The split
happens at the **first** delimiter only: for word keys the remainder is itself
a delimiter-joined site list and has to stay whole.
!*/

/// Field delimiter of the inverted index output format.
pub const DELIMITER: char = ',';

/// Parsed form of one input line.
///
/// Transient: folded into [super::IndexMap] right after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: String,
}

/// Outcome of parsing a single line.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    Entry(RawEntry),
    /// No delimiter found. The line is dropped; callers count these.
    Skipped,
    /// Nothing on the line at all.
    Empty,
}

impl RawEntry {
    /// Split `line` at the first delimiter into key and raw value.
    pub fn parse(line: &str) -> ParsedLine {
        if line.is_empty() {
            return ParsedLine::Empty;
        }

        match line.split_once(DELIMITER) {
            Some((key, value)) => ParsedLine::Entry(RawEntry {
                key: key.to_string(),
                value: value.to_string(),
            }),
            None => ParsedLine::Skipped,
        }
    }
}
