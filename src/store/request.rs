/*! Write request wire shapes.

The store speaks attribute maps: every item is a map from attribute name to a
typed value, strings as `{"S": …}` and numbers as decimal strings in
`{"N": …}`. Rank records land in the `WordUrlRank` table, raw index rows in
`InvertedIndex`.
!*/
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::Record;

/// Per-call item ceiling documented by the store.
pub const MAX_BATCH_ITEMS: usize = 25;

/// Attribute value in store wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    /// String attribute.
    S(String),
    /// Number attribute, transported as a decimal string.
    N(String),
}

/// Target tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    #[serde(rename = "WordUrlRank")]
    Rank,
    #[serde(rename = "InvertedIndex")]
    Index,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Rank => "WordUrlRank",
            Table::Index => "InvertedIndex",
        }
    }
}

/// One write request against a store table.
///
/// Writes are upserts keyed by the item's key attributes, so resubmitting a
/// request after a partial failure can never double-write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(rename = "Table")]
    pub table: Table,
    #[serde(rename = "Item")]
    pub item: BTreeMap<String, AttrValue>,
}

impl WriteRequest {
    /// Rank record item: `Word`/`Url` strings plus the decimal `Rank`.
    pub fn rank(record: &Record) -> Self {
        let mut item = BTreeMap::new();
        item.insert("Word".to_string(), AttrValue::S(record.word.clone()));
        item.insert("Url".to_string(), AttrValue::S(record.url.clone()));
        item.insert("Rank".to_string(), AttrValue::N(record.rank.to_string()));

        Self {
            table: Table::Rank,
            item,
        }
    }

    /// Raw index row item: the key→value pair as parsed from the input.
    pub fn index(key: &str, value: &str) -> Self {
        let mut item = BTreeMap::new();
        item.insert("Key".to_string(), AttrValue::S(key.to_string()));
        item.insert("Value".to_string(), AttrValue::S(value.to_string()));

        Self {
            table: Table::Index,
            item,
        }
    }

    fn attr(&self, name: &str) -> &str {
        match self.item.get(name) {
            Some(AttrValue::S(v)) | Some(AttrValue::N(v)) => v.as_str(),
            None => "",
        }
    }

    /// Values of the item's key attributes, in table key order.
    pub fn key_attrs(&self) -> Vec<&str> {
        match self.table {
            Table::Rank => vec![self.attr("Word"), self.attr("Url")],
            Table::Index => vec![self.attr("Key")],
        }
    }

    /// Identifying word/url (or key) string for logs and failure reports.
    pub fn ident(&self) -> String {
        format!("{} {}", self.table.name(), self.key_attrs().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about_record() -> Record {
        Record {
            word: "about".to_string(),
            url: "http://www.iht.com".to_string(),
            rank: 1,
        }
    }

    #[test]
    fn rank_item_wire_shape() {
        let request = WriteRequest::rank(&about_record());

        let expected = serde_json::json!({
            "Table": "WordUrlRank",
            "Item": {
                "Word": { "S": "about" },
                "Url": { "S": "http://www.iht.com" },
                "Rank": { "N": "1" },
            }
        });
        assert_eq!(serde_json::to_value(&request).unwrap(), expected);
    }

    #[test]
    fn index_item_wire_shape() {
        let request = WriteRequest::index("about", "http://www.iht.com,http://www.nytimes.com");

        let expected = serde_json::json!({
            "Table": "InvertedIndex",
            "Item": {
                "Key": { "S": "about" },
                "Value": { "S": "http://www.iht.com,http://www.nytimes.com" },
            }
        });
        assert_eq!(serde_json::to_value(&request).unwrap(), expected);
    }

    #[test]
    fn round_trips_through_json() {
        let request = WriteRequest::rank(&about_record());

        let json = serde_json::to_string(&request).unwrap();
        let back: WriteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn key_attrs_identify_items() {
        let request = WriteRequest::rank(&about_record());
        assert_eq!(request.key_attrs(), vec!["about", "http://www.iht.com"]);

        let request = WriteRequest::index("sports", "http://espn.go.com");
        assert_eq!(request.key_attrs(), vec!["sports"]);
        assert_eq!(request.ident(), "InvertedIndex sports");
    }
}
