//! Record store abstraction.
//!
//! The stats endpoint opens one session per request and always releases it.
//! Stores implement [`RecordStore`]; [`with_session`] owns the lifecycle.

mod mongo;

#[cfg(test)]
mod memory;

pub use mongo::MongoStore;

#[cfg(test)]
pub use memory::MemoryStore;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::FinalTableRecord;

/// Errors that can occur while talking to a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Query(String),
}

/// A source of sessions against the document database.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &'static str;

    /// Open a new session. Nothing is held if this fails.
    async fn connect(&self) -> Result<Box<dyn RecordSession>, StoreError>;
}

/// An open session. Must be closed exactly once.
#[async_trait]
pub trait RecordSession: Send + Sync {
    /// Every record in `collection`, unfiltered and unsorted.
    async fn find_all(&self, collection: &str) -> Result<Vec<FinalTableRecord>, StoreError>;

    /// Release the session's connections.
    async fn close(&self);
}

/// Run `op` against a fresh session and close it afterwards, whether `op`
/// succeeded or not.
pub async fn with_session<T, F, Fut>(store: &dyn RecordStore, op: F) -> Result<T, StoreError>
where
    F: FnOnce(Arc<dyn RecordSession>) -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let session: Arc<dyn RecordSession> = Arc::from(store.connect().await?);
    debug!("Opened {} session", store.name());

    let result = op(Arc::clone(&session)).await;

    session.close().await;
    debug!("Closed {} session", store.name());
    result
}

/// Load the whole collection in a single scoped session.
pub async fn fetch_all_records(
    store: &dyn RecordStore,
    collection: &str,
) -> Result<Vec<FinalTableRecord>, StoreError> {
    with_session(store, |session| async move { session.find_all(collection).await }).await
}
