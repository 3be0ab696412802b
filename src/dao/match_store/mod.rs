#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{MatchRecordEntity, MatchSummaryEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for completed match records.
pub trait MatchStore: Send + Sync {
    fn save_match(&self, record: MatchRecordEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchRecordEntity>>>;
    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchSummaryEntity>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
