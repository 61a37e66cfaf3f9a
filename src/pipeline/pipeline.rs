//! Pipeline trait.
use async_trait::async_trait;

use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any custom pipeline that needs a return type can use the
/// trait aswell.
#[async_trait]
pub trait Pipeline<T> {
    async fn run(&self) -> Result<T, Error>;
}
