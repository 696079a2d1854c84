use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pinhole_core::repository::{ReadRepository, Repository, Result};
use pinhole_core::{LinkId, LinkRecord, StorageError};
use std::sync::atomic::{AtomicU64, Ordering};

/// First identifier handed out by [`Repository::insert_auto`].
pub const FIRST_AUTO_ID: u64 = 1;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Behaves like a table with an auto-increment primary key: `insert_auto`
/// takes the next counter value, skipping identifiers that were already
/// claimed through `insert`, and `insert` fails on duplicates.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<LinkId, LinkRecord>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_offset(FIRST_AUTO_ID)
    }

    /// Creates a repository whose auto-assigned identifiers start at `offset`.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicU64::new(offset),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn check_range(id: LinkId) -> Result<()> {
        if id.is_storable() {
            Ok(())
        } else {
            Err(StorageError::OutOfRange(id))
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        Self::check_range(id)?;
        Ok(self.storage.get(&id).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, id: LinkId) -> Result<bool> {
        Self::check_range(id)?;
        Ok(self.storage.contains_key(&id))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<(LinkId, LinkRecord)>> {
        let mut links: Vec<_> = self
            .storage
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        // Newest first; records submitted in the same instant keep insertion
        // order by falling back to the identifier.
        links.sort_unstable_by(|(a_id, a), (b_id, b)| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b_id.cmp(a_id))
        });
        links.truncate(limit);
        Ok(links)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_auto(&self, record: LinkRecord) -> Result<LinkId> {
        loop {
            // The counter only advances past storable values, so once it
            // reaches the end of the range every later call fails the same way.
            let id = self
                .next_id
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                    LinkId::new(next).is_storable().then(|| next + 1)
                })
                .map(LinkId::new)
                .map_err(|next| StorageError::OutOfRange(LinkId::new(next)))?;

            // The entry guard holds the shard lock, so a concurrent custom
            // insert of the same id cannot slip in between check and write.
            match self.storage.entry(id) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(record);
                    return Ok(id);
                }
            }
        }
    }

    async fn insert(&self, id: LinkId, record: LinkRecord) -> Result<()> {
        Self::check_range(id)?;

        match self.storage.entry(id) {
            Entry::Occupied(_) => Err(StorageError::Conflict(id)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}
