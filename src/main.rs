//! # Rankloader
//!
//! Rankloader bulk loads the output of an inverted index run into a
//! key-value store, expanding each `word,site1,site2,...` line into one
//! (word, url, rank) record per site.
//!
//! ## Getting started
//!
//! ```sh
//! rankloader 0.1.0
//! inverted index bulk loading tool.
//!
//! USAGE:
//!     rankloader [FLAGS] [OPTIONS] -i <input>
//!
//! FLAGS:
//!     -h, --help          Prints help information
//!     -V, --version       Prints version information
//!         --with-index    also persist raw index entries
//!
//! OPTIONS:
//!     -i, --input <input>        path to an inverted index output file
//!         --endpoint <url>       store endpoint URL
//! ```
//!
use std::sync::Arc;

use structopt::StructOpt;
use tokio_util::sync::CancellationToken;

#[macro_use]
extern crate log;

mod cli;

use rankloader::config::{LoadConfig, SinkSet};
use rankloader::error::Error;
use rankloader::pipeline::{LoadIndex, Pipeline};
use rankloader::store::{HttpStore, MemoryStore, SharedClient};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Opt::from_args();
    debug!("cli args\n{:#?}", opt);

    let mut config = LoadConfig::new(opt.input);
    config.batch_size = opt.batch_size;
    config.concurrency = opt.concurrency;
    config.max_retries = opt.max_retries;
    if opt.with_index {
        config.sinks = SinkSet::RankRecordsAndIndex;
    }

    let client: SharedClient = match &opt.endpoint {
        Some(endpoint) => Arc::new(HttpStore::new(endpoint)?),
        None => {
            warn!("no store endpoint specified, writing to an in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // ctrl-c abandons pending batches instead of killing in-flight calls
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, abandoning pending writes");
            interrupt.cancel();
        }
    });

    let pipeline = LoadIndex::new(config, client, cancel);
    let report = pipeline.run().await?;

    info!(
        "done: {} record(s) generated, {} written, {} failed, {} input line(s) skipped",
        report.records_generated, report.written, report.failed, report.lines_skipped
    );

    if !report.success() {
        std::process::exit(1);
    }
    Ok(())
}
