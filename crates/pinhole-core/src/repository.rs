use crate::error::StorageError;
use crate::link_id::LinkId;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record.
///
/// The record does not carry its own short code: the code is always derived
/// from the identifier the store keys it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the URL was submitted.
    pub submitted_at: Timestamp,
}

impl LinkRecord {
    /// Creates a record submitted now.
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            submitted_at: Timestamp::now(),
        }
    }
}

/// A read-only view of a repository.
///
/// [`exists`](ReadRepository::exists) is the lookup the identifier allocator
/// relies on to reject custom codes that are already in use.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record stored under `id`.
    /// Returns `None` if there is none.
    async fn get(&self, id: LinkId) -> Result<Option<LinkRecord>>;

    /// Checks whether a record with `id` already exists.
    ///
    /// Returns `Err(OutOfRange)` if `id` is too large for the store to query.
    async fn exists(&self, id: LinkId) -> Result<bool>;

    /// Lists up to `limit` records, most recently submitted first.
    async fn recent(&self, limit: usize) -> Result<Vec<(LinkId, LinkRecord)>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a record under the next auto-assigned identifier and returns it.
    async fn insert_auto(&self, record: LinkRecord) -> Result<LinkId>;

    /// Inserts a record under an explicit identifier.
    ///
    /// Uniqueness is enforced here regardless of any earlier `exists` check:
    /// returns `Err(Conflict)` if the identifier is already taken.
    async fn insert(&self, id: LinkId, record: LinkRecord) -> Result<()>;
}
