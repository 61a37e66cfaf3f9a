/*! HTTP store client.

Speaks a minimal JSON batch protocol: the whole batch is POSTed as
`{"RequestItems": […]}` and the store answers `{"UnprocessedItems": […]}`,
possibly empty. Anything beyond the endpoint URL (credentials, table
provisioning) is the deployment's business, not ours.
!*/
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{BatchWriteOutput, StoreClient, WriteRequest};
use crate::error::Error;

#[derive(Debug, Serialize)]
struct BatchWriteBody<'a> {
    #[serde(rename = "RequestItems")]
    request_items: &'a [WriteRequest],
}

#[derive(Debug, Deserialize)]
struct BatchWriteResponse {
    #[serde(rename = "UnprocessedItems", default)]
    unprocessed_items: Vec<WriteRequest>,
}

/// Holds the endpoint and the http client that makes the calls.
pub struct HttpStore {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(endpoint: &str) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl StoreClient for HttpStore {
    async fn batch_write(&self, batch: Vec<WriteRequest>) -> Result<BatchWriteOutput, Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&BatchWriteBody {
                request_items: &batch,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<BatchWriteResponse>()
            .await?;

        Ok(BatchWriteOutput {
            unprocessed: response.unprocessed_items,
        })
    }
}
