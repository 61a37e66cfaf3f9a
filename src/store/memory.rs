/*! In-memory store.

Backs endpoint-less runs and the test suite. Mirrors the real store's
semantics where the writer depends on them: upserts keyed by the item's key
attributes, a hard per-call item limit, and throttling expressed as an `Ok`
response with unprocessed items rather than an error.
!*/
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AttrValue, BatchWriteOutput, StoreClient, Table, WriteRequest, MAX_BATCH_ITEMS};
use crate::error::Error;

type StoredItems = HashMap<(Table, Vec<String>), BTreeMap<String, AttrValue>>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<StoredItems>,
    throttled_calls: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` calls report their whole batch as unprocessed.
    pub fn throttle_next(&self, n: usize) {
        *self.throttled_calls.lock().unwrap() = n;
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored item attributes for `key` in `table`, if present.
    pub fn get(&self, table: Table, key: &[&str]) -> Option<BTreeMap<String, AttrValue>> {
        let key: Vec<String> = key.iter().map(|k| k.to_string()).collect();
        self.items.lock().unwrap().get(&(table, key)).cloned()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn batch_write(&self, batch: Vec<WriteRequest>) -> Result<BatchWriteOutput, Error> {
        if batch.is_empty() {
            return Err(Error::Store("empty batch".to_string()));
        }
        if batch.len() > MAX_BATCH_ITEMS {
            return Err(Error::Store(format!(
                "batch of {} items exceeds the {} item limit",
                batch.len(),
                MAX_BATCH_ITEMS
            )));
        }

        {
            let mut throttled = self.throttled_calls.lock().unwrap();
            if *throttled > 0 {
                *throttled -= 1;
                return Ok(BatchWriteOutput { unprocessed: batch });
            }
        }

        let mut items = self.items.lock().unwrap();
        for request in batch {
            let key: Vec<String> = request.key_attrs().iter().map(|k| k.to_string()).collect();
            let WriteRequest { table, item } = request;
            items.insert((table, key), item);
        }

        Ok(BatchWriteOutput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn rank_request(word: &str, url: &str, rank: u64) -> WriteRequest {
        WriteRequest::rank(&Record {
            word: word.to_string(),
            url: url.to_string(),
            rank,
        })
    }

    #[tokio::test]
    async fn writes_are_upserts() {
        let store = MemoryStore::new();

        store
            .batch_write(vec![rank_request("about", "http://www.iht.com", 1)])
            .await
            .unwrap();
        store
            .batch_write(vec![rank_request("about", "http://www.iht.com", 7)])
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        let item = store
            .get(Table::Rank, &["about", "http://www.iht.com"])
            .unwrap();
        assert_eq!(item.get("Rank"), Some(&AttrValue::N("7".to_string())));
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let store = MemoryStore::new();
        let batch: Vec<WriteRequest> = (0..MAX_BATCH_ITEMS + 1)
            .map(|n| rank_request("word", &format!("http://site{}.com", n), 0))
            .collect();

        assert!(store.batch_write(batch).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn throttled_calls_return_everything_unprocessed() {
        let store = MemoryStore::new();
        store.throttle_next(1);

        let batch = vec![rank_request("about", "http://www.iht.com", 1)];
        let output = store.batch_write(batch.clone()).await.unwrap();
        assert_eq!(output.unprocessed, batch);
        assert!(store.is_empty());

        // throttling armed for one call only
        let output = store.batch_write(batch).await.unwrap();
        assert!(output.unprocessed.is_empty());
        assert_eq!(store.len(), 1);
    }
}
