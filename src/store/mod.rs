/*!
# Store interface

Write-request wire shapes, the client contract, and the batched writer that
feeds records to the store under its per-call limits.

Two clients ship with the crate: [HttpStore] for a real endpoint and
[MemoryStore] for endpoint-less runs and tests. Both speak the same
[StoreClient] contract: transport failure is an error, partial throttling is a
normal response carrying the unprocessed subset.
!*/
mod client;
mod http;
mod memory;
mod request;
mod writer;

pub use client::{BatchWriteOutput, SharedClient, StoreClient};
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use request::{AttrValue, Table, WriteRequest, MAX_BATCH_ITEMS};
pub use writer::{BatchWriter, FailedRecord, RetryPolicy, WriteSummary};
