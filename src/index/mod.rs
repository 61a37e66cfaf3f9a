/*!
# Inverted index input

Parsing of inverted index result lines and construction of the key→value map
they describe. Everything here is synchronous and runs once per load, before
any store traffic.
!*/
mod entry;
mod map;

pub use entry::{ParsedLine, RawEntry, DELIMITER};
pub use map::IndexMap;
