/*! Key→value map built from parsed lines.

Insertion order is significant downstream (record generation walks it), so the
map is backed by [indexmap::IndexMap]. A duplicate key overwrites the stored
value but keeps its original position, matching the reference loader.
!*/
use log::warn;

use super::{ParsedLine, RawEntry};

/// The completed inverted index mapping.
///
/// Keys are words or URLs; values are delimiter-joined site lists or decimal
/// occurrence counts respectively. Built in one pass, read-only afterwards.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexMap {
    entries: indexmap::IndexMap<String, String>,
}

impl IndexMap {
    /// Fold raw input into a map.
    ///
    /// Returns the map along with the number of skipped (delimiter-less)
    /// lines. Skipping never aborts the pass: one malformed line must not
    /// cancel a whole bulk load.
    pub fn from_lines(data: &str) -> (Self, usize) {
        let mut entries = indexmap::IndexMap::new();
        let mut skipped = 0;

        for line in data.lines() {
            // trim_end to get rid of eventual carriage returns.
            match RawEntry::parse(line.trim_end()) {
                ParsedLine::Entry(RawEntry { key, value }) => {
                    entries.insert(key, value);
                }
                ParsedLine::Skipped => {
                    warn!("skipping line without delimiter: {:?}", line);
                    skipped += 1;
                }
                ParsedLine::Empty => (),
            }
        }

        (Self { entries }, skipped)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_insertion_order() {
        let (map, skipped) = IndexMap::from_lines(
            "about,http://www.iht.com,http://www.nytimes.com
http://www.iht.com,1
http://www.nytimes.com,2",
        );

        assert_eq!(skipped, 0);
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["about", "http://www.iht.com", "http://www.nytimes.com"]
        );
        assert_eq!(map.get("http://www.nytimes.com"), Some("2"));
    }

    #[test]
    fn duplicate_key_last_value_wins() {
        let (map, _) = IndexMap::from_lines(
            "sports,http://espn.go.com
news,http://www.cnn.com
sports,http://www.skysports.com",
        );

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("sports"), Some("http://www.skysports.com"));
        // the overwritten key keeps its original position
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["sports", "news"]);
    }

    #[test]
    fn counts_skipped_and_ignores_empty_lines() {
        let (map, skipped) = IndexMap::from_lines(
            "about,http://www.iht.com

malformed line
http://www.iht.com,1
",
        );

        assert_eq!(skipped, 1);
        assert_eq!(map.len(), 2);
        assert!(map.get("malformed line").is_none());
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let (map, skipped) = IndexMap::from_lines("about,http://www.iht.com\r\nhttp://www.iht.com,1\r\n");

        assert_eq!(skipped, 0);
        assert_eq!(map.get("http://www.iht.com"), Some("1"));
    }

    #[test]
    fn empty_input_builds_empty_map() {
        let (map, skipped) = IndexMap::from_lines("");
        assert!(map.is_empty());
        assert_eq!(skipped, 0);
    }
}
