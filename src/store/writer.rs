/*! Batched writing.

Partitions write requests into store-sized batches and dispatches them with a
bounded number in flight. A batch whose call comes back with unprocessed items
is resubmitted after a capped, jittered exponential backoff until the retry
ceiling; whatever survives is reported as terminally failed rather than
silently dropped. Transport failures retry under the same policy, with the
whole remaining batch treated as unprocessed.

Batches are independent: no cross-batch ordering is promised, which is fine
because every write is an upsert keyed by the item itself.
!*/
use std::time::Duration;

use futures::stream::{self, StreamExt};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use super::{SharedClient, WriteRequest};
use crate::error::Error;

/// Retry/backoff knobs for a single batch.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Resubmissions allowed after the initial attempt.
    pub max_retries: usize,
    /// Backoff bound for the first retry.
    pub backoff_base: Duration,
    /// Ceiling for the backoff bound.
    pub backoff_cap: Duration,
}

impl RetryPolicy {
    /// Upper bound of the delay before retry `attempt` (1-based):
    /// `base * 2^(attempt-1)`, capped.
    pub fn backoff_bound(&self, attempt: usize) -> Duration {
        let exp = attempt.saturating_sub(1).min(31) as u32;
        let bound = self.backoff_base.saturating_mul(2u32.saturating_pow(exp));
        bound.min(self.backoff_cap)
    }

    /// Full-jitter delay: uniform below the bound, so simultaneous retries
    /// against a throttling store spread out.
    fn delay(&self, attempt: usize) -> Duration {
        let bound = self.backoff_bound(attempt);
        if bound.is_zero() {
            return bound;
        }
        rand::thread_rng().gen_range(Duration::ZERO..=bound)
    }
}

/// A write request that survived the retry ceiling, with its last-seen error.
#[derive(Debug)]
pub struct FailedRecord {
    pub request: WriteRequest,
    pub error: String,
}

/// Aggregated outcome of one write run.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Requests the store acknowledged.
    pub written: usize,
    /// Requests given up on. Disjoint from the written count.
    pub failed: Vec<FailedRecord>,
}

impl WriteSummary {
    pub fn all_written(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail_all(&mut self, requests: Vec<WriteRequest>, error: String) {
        for request in requests {
            self.failed.push(FailedRecord {
                request,
                error: error.clone(),
            });
        }
    }

    fn merge(&mut self, other: WriteSummary) {
        self.written += other.written;
        self.failed.extend(other.failed);
    }
}

/// Dispatches size-bounded batches against a store client.
pub struct BatchWriter {
    client: SharedClient,
    policy: RetryPolicy,
    batch_size: usize,
    concurrency: usize,
    cancel: CancellationToken,
}

impl BatchWriter {
    pub fn new(
        client: SharedClient,
        policy: RetryPolicy,
        batch_size: usize,
        concurrency: usize,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            policy,
            batch_size,
            concurrency,
            cancel,
        }
    }

    /// Write all `requests`, in ceil(len / batch_size) initial batches.
    pub async fn write(&self, requests: Vec<WriteRequest>) -> WriteSummary {
        if requests.is_empty() {
            return WriteSummary::default();
        }

        let total = requests.len();
        let chunks = requests.into_iter().chunks(self.batch_size);
        let batches: Vec<Vec<WriteRequest>> =
            chunks.into_iter().map(|chunk| chunk.collect()).collect();
        info!(
            "writing {} request(s) in {} batch(es), {} in flight max",
            total,
            batches.len(),
            self.concurrency
        );

        let summaries: Vec<WriteSummary> = stream::iter(batches.into_iter().enumerate())
            .map(|(id, batch)| self.write_batch(id, batch))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut summary = WriteSummary::default();
        for batch_summary in summaries {
            summary.merge(batch_summary);
        }
        summary
    }

    /// Drive one batch until completed, exhausted or cancelled.
    async fn write_batch(&self, id: usize, batch: Vec<WriteRequest>) -> WriteSummary {
        let mut summary = WriteSummary::default();
        let mut pending = batch;
        // transport error of the most recent attempt; None when the store
        // answered normally but left items unprocessed.
        let mut transport_error: Option<Error> = None;

        let attempts = self.policy.max_retries + 1;
        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.policy.delay(attempt);
                debug!(
                    "batch {}: retry {}/{} in {:?}",
                    id, attempt, self.policy.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }
            if self.cancel.is_cancelled() {
                warn!(
                    "batch {}: cancelled, abandoning {} item(s)",
                    id,
                    pending.len()
                );
                summary.fail_all(pending, format!("{:?}", Error::Cancelled));
                return summary;
            }

            match self.client.batch_write(pending.clone()).await {
                Ok(output) => {
                    summary.written += pending.len().saturating_sub(output.unprocessed.len());
                    if output.unprocessed.is_empty() {
                        debug!("batch {}: completed on attempt {}", id, attempt + 1);
                        return summary;
                    }
                    debug!(
                        "batch {}: {} unprocessed item(s) on attempt {}",
                        id,
                        output.unprocessed.len(),
                        attempt + 1
                    );
                    pending = output.unprocessed;
                    transport_error = None;
                }
                Err(e) => {
                    warn!("batch {}: store call failed: {:?}", id, e);
                    transport_error = Some(e);
                }
            }
        }

        let error = match transport_error {
            Some(e) => format!("{:?}", e),
            None => format!("{:?}", Error::RetryExhausted { attempts }),
        };
        warn!(
            "batch {}: giving up on {} item(s) after {} attempt(s)",
            id,
            pending.len(),
            attempts
        );
        summary.fail_all(pending, error);
        summary
    }
}
