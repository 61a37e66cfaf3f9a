//! Store client contract.
use std::sync::Arc;

use async_trait::async_trait;

use super::WriteRequest;
use crate::error::Error;

/// Outcome of one batch call.
///
/// An empty `unprocessed` list means the whole batch was durably written.
#[derive(Debug, Default)]
pub struct BatchWriteOutput {
    /// Items the store did not write in this call, typically because it was
    /// throttling. Resubmitting them is the caller's job.
    pub unprocessed: Vec<WriteRequest>,
}

/// Bulk write access to the store.
///
/// Partial throttling is a normal `Ok` response carrying the unprocessed
/// subset; only connectivity or auth problems surface as errors.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Submit up to [super::MAX_BATCH_ITEMS] write requests in one call.
    async fn batch_write(&self, batch: Vec<WriteRequest>) -> Result<BatchWriteOutput, Error>;
}

pub type SharedClient = Arc<dyn StoreClient>;
