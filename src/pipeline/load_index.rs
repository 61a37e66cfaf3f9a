/*! Index loading pipeline.

Reads a whole inverted index output file, builds the in-memory index, expands
it into per-(word, url) rank records and bulk writes those to the store.

Only an unreadable input file or an invalid configuration aborts the run.
Malformed input lines and failed writes are counted and reported instead, so
one bad line never wastes an otherwise good load.
!*/
use std::fs;

use async_trait::async_trait;
use log::{error, info};
use tokio_util::sync::CancellationToken;

use crate::config::LoadConfig;
use crate::error::Error;
use crate::index::IndexMap;
use crate::pipeline::Pipeline;
use crate::records;
use crate::report::RunReport;
use crate::store::{BatchWriter, RetryPolicy, SharedClient, WriteRequest};

pub struct LoadIndex {
    config: LoadConfig,
    client: SharedClient,
    cancel: CancellationToken,
}

impl LoadIndex {
    pub fn new(config: LoadConfig, client: SharedClient, cancel: CancellationToken) -> Self {
        Self {
            config,
            client,
            cancel,
        }
    }

    /// Expand the index into write requests for the configured sinks.
    /// Returns the requests along with the number of rank records generated.
    fn build_requests(&self, index: &IndexMap) -> (Vec<WriteRequest>, usize) {
        let rank_records = records::generate(index);
        let generated = rank_records.len();

        let mut requests: Vec<WriteRequest> =
            rank_records.iter().map(WriteRequest::rank).collect();
        if self.config.sinks.writes_index_entries() {
            requests.extend(index.iter().map(|(key, value)| WriteRequest::index(key, value)));
        }

        (requests, generated)
    }
}

#[async_trait]
impl Pipeline<RunReport> for LoadIndex {
    async fn run(&self) -> Result<RunReport, Error> {
        self.config.validate()?;

        info!("loading index output from {:?}", self.config.input);
        let data = fs::read_to_string(&self.config.input)?;

        let (index, lines_skipped) = IndexMap::from_lines(&data);
        info!(
            "parsed {} key(s), skipped {} malformed line(s)",
            index.len(),
            lines_skipped
        );

        let (requests, records_generated) = self.build_requests(&index);

        let writer = BatchWriter::new(
            self.client.clone(),
            RetryPolicy {
                max_retries: self.config.max_retries,
                backoff_base: self.config.backoff_base,
                backoff_cap: self.config.backoff_cap,
            },
            self.config.batch_size,
            self.config.concurrency,
            self.cancel.clone(),
        );
        let summary = writer.write(requests).await;

        for failure in &summary.failed {
            error!(
                "failed to write {}: {}",
                failure.request.ident(),
                failure.error
            );
        }

        Ok(RunReport {
            lines_skipped,
            records_generated,
            written: summary.written,
            failed: summary.failed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::sync::Arc;

    use super::*;
    use crate::config::SinkSet;
    use crate::store::MemoryStore;

    fn write_input(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.txt");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn missing_input_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoadConfig::new(dir.path().join("absent.txt"));
        let pipeline = LoadIndex::new(
            config,
            Arc::new(MemoryStore::new()),
            CancellationToken::new(),
        );

        assert!(matches!(pipeline.run().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn invalid_config_is_fatal() {
        let (_dir, path) = write_input("about,http://a.com\n");
        let mut config = LoadConfig::new(path);
        config.batch_size = 0;
        let pipeline = LoadIndex::new(
            config,
            Arc::new(MemoryStore::new()),
            CancellationToken::new(),
        );

        assert!(pipeline.run().await.is_err());
    }

    #[tokio::test]
    async fn rank_sink_only_writes_rank_records() {
        let (_dir, path) = write_input("about,http://a.com\nhttp://a.com,3\n");
        let store = Arc::new(MemoryStore::new());
        let pipeline = LoadIndex::new(
            LoadConfig::new(path),
            store.clone(),
            CancellationToken::new(),
        );

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.records_generated, 1);
        assert_eq!(report.written, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn index_sink_persists_every_key() {
        let (_dir, path) = write_input("about,http://a.com\nhttp://a.com,3\n");
        let store = Arc::new(MemoryStore::new());
        let mut config = LoadConfig::new(path);
        config.sinks = SinkSet::RankRecordsAndIndex;
        let pipeline = LoadIndex::new(config, store.clone(), CancellationToken::new());

        let report = pipeline.run().await.unwrap();

        // one rank record plus both raw index entries
        assert_eq!(report.records_generated, 1);
        assert_eq!(report.written, 3);
        assert_eq!(store.len(), 3);
    }
}
