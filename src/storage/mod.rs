//! Storage gateway used by every resource handler.
//!
//! Handlers only ever talk to [`Storage`]; the backend is picked once at
//! startup (see `app::build_storage`) and shared through `AppState`.
use async_trait::async_trait;

use crate::models::{ForeignKey, Kind, Record};

pub mod error;
pub mod file;
pub mod postgres;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use postgres::PgStorage;

/// Object persistence by type and id.
///
/// Mutations (`put`/`delete`) become durable at the latest on `save()`.
/// Implementations must be shareable across requests (`Arc<dyn Storage>`).
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // All objects of `kind`, in insertion order.
    async fn all(&self, kind: Kind) -> StorageResult<Vec<Record>>;

    async fn get(&self, kind: Kind, id: &str) -> StorageResult<Option<Record>>;

    // Objects of `kind` whose `foreign_key` points at `parent_id` (e.g. the cities of a state).
    async fn children(
        &self,
        kind: Kind,
        foreign_key: ForeignKey,
        parent_id: &str,
    ) -> StorageResult<Vec<Record>>;

    // Insert or replace a record.
    async fn put(&self, record: Record) -> StorageResult<()>;

    // Returns `Ok(false)` if nothing was deleted.
    async fn delete(&self, kind: Kind, id: &str) -> StorageResult<bool>;

    async fn save(&self) -> StorageResult<()>;

    async fn count(&self, kind: Kind) -> StorageResult<u64>;

    // Release per-request resources. Called once at the end of every request.
    async fn close(&self) -> StorageResult<()>;
}
