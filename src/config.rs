/*! Pipeline configuration.

The historical loader scripts kept their settings in module-level globals fed
by argv. Everything tunable now lives in [LoadConfig], handed to the pipeline
entry point as a value.
!*/
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::store::MAX_BATCH_ITEMS;

/// Which tables a run writes.
///
/// The two historical loader variants differed only here: one wrote rank
/// records, the other also persisted the raw index mapping. Neither is
/// hardcoded; callers pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSet {
    /// Denormalized (word, url, rank) records only.
    RankRecords,
    /// Rank records plus one entry per raw key→value mapping row.
    RankRecordsAndIndex,
}

impl SinkSet {
    pub fn writes_index_entries(&self) -> bool {
        matches!(self, SinkSet::RankRecordsAndIndex)
    }
}

/// Pipeline knobs.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Inverted index results file.
    pub input: PathBuf,
    /// Items per store call, at most [MAX_BATCH_ITEMS].
    pub batch_size: usize,
    /// Maximum number of batches in flight.
    pub concurrency: usize,
    /// Retries per batch once the initial attempt reported unprocessed items.
    pub max_retries: usize,
    /// Backoff bound for the first retry. Doubles on each further one.
    pub backoff_base: Duration,
    /// Ceiling for the backoff bound.
    pub backoff_cap: Duration,
    /// Output sink set.
    pub sinks: SinkSet,
}

impl LoadConfig {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Check knob ranges. Called before any read or write happens.
    pub fn validate(&self) -> Result<(), Error> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_ITEMS {
            return Err(Error::Custom(format!(
                "batch_size must be within 1..={}, got {}",
                MAX_BATCH_ITEMS, self.batch_size
            )));
        }
        if self.concurrency == 0 {
            return Err(Error::Custom(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            batch_size: MAX_BATCH_ITEMS,
            concurrency: 4,
            max_retries: 3,
            backoff_base: Duration::from_millis(100),
            backoff_cap: Duration::from_secs(5),
            sinks: SinkSet::RankRecords,
        }
    }
}
