/*! Record generation.

Walks the completed [IndexMap] and denormalizes it into (word, url, rank)
records. Keys classify two ways:

- word keys carry a delimiter-joined site list and emit one record per site,
- URL keys carry the site's occurrence count and emit nothing themselves.
  They only exist to be looked up as rank sources.

Generation is pure and deterministic: records come out in map insertion order
of the word keys, then site-list order within each word.
!*/
use log::debug;

use crate::index::{IndexMap, DELIMITER};

/// Denormalized output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub word: String,
    pub url: String,
    pub rank: u64,
}

/// URL-syntax predicate used to classify map keys.
///
/// True when the key parses as an absolute URL with a host. Words never do
/// (no scheme), and scheme-only keys like `mailto:` fail the host check.
pub fn is_url(key: &str) -> bool {
    url::Url::parse(key).map(|u| u.has_host()).unwrap_or(false)
}

/// Rank for `site`: its occurrence count in the map, 0 when the site never
/// appeared as a key or its count doesn't parse.
fn site_rank(map: &IndexMap, site: &str) -> u64 {
    match map.get(site) {
        Some(count) => match count.parse() {
            Ok(rank) => rank,
            Err(_) => {
                debug!("unparsable rank {:?} for site {}", count, site);
                0
            }
        },
        None => 0,
    }
}

/// Emit one record per (word, site) pair found in `map`.
///
/// Empty site segments (from trailing or doubled delimiters) are dropped.
pub fn generate(map: &IndexMap) -> Vec<Record> {
    let mut records = Vec::new();

    for (key, value) in map.iter() {
        if is_url(key) {
            continue;
        }

        let sites = value.split(DELIMITER).filter(|site| !site.is_empty());
        for site in sites {
            records.push(Record {
                word: key.to_string(),
                url: site.to_string(),
                rank: site_rank(map, site),
            });
        }
    }

    debug!("generated {} records from {} map entries", records.len(), map.len());
    records
}
