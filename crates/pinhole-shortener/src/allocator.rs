//! Identifier allocation for new short links.
//!
//! A submission either asks for a custom short code or leaves the choice to
//! the record store. Custom codes are decoded into the identifier they stand
//! for and only accepted if that identifier is in range and not yet taken.

use pinhole_core::{base62, DecodeError, LinkId, ReadRepository, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Shown whenever a custom code maps to an identifier too large to store.
pub const TOO_LONG_MESSAGE: &str =
    "Your custom name is too long. Are you sure you wanted a shortening service? :)";

/// Outcome of a successful allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// No custom code was requested; the store assigns the next identifier.
    Auto,
    /// The custom code is free; the record must be created with this identifier.
    Custom(LinkId),
}

impl Allocation {
    /// The identifier chosen by the caller, if any.
    pub fn id(&self) -> Option<LinkId> {
        match self {
            Allocation::Auto => None,
            Allocation::Custom(id) => Some(*id),
        }
    }
}

/// Why a custom code was refused. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid character: \"{0}\"")]
    InvalidCharacter(char),
    #[error("{}", TOO_LONG_MESSAGE)]
    TooLong,
    #[error("\"{0}\" is already taken")]
    AlreadyTaken(String),
    #[error("could not check whether the custom name is available: {0}")]
    Unavailable(String),
}

/// Validates custom short codes against a record store.
#[derive(Debug)]
pub struct IdAllocator<R> {
    lookup: Arc<R>,
}

impl<R> Clone for IdAllocator<R> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<R: ReadRepository> IdAllocator<R> {
    pub fn new(lookup: Arc<R>) -> Self {
        Self { lookup }
    }

    /// Decides which identifier a new link gets.
    ///
    /// Surrounding whitespace is ignored and a blank code means "no
    /// preference". Otherwise the code must consist of base62 digits, decode
    /// to a storable identifier, and not be in use yet.
    ///
    /// The `exists` check is advisory: the store still has to reject a
    /// duplicate at insert time when two submissions race for the same code.
    pub async fn allocate(&self, custom: &str) -> Result<Allocation, Rejection> {
        let custom = custom.trim();
        if custom.is_empty() {
            trace!("no custom code requested");
            return Ok(Allocation::Auto);
        }

        let id = match base62::decode(custom) {
            Ok(value) => LinkId::new(value),
            Err(DecodeError::InvalidCharacter { character, position }) => {
                debug!(code = custom, %character, position, "custom code has invalid character");
                return Err(Rejection::InvalidCharacter(character));
            }
            Err(DecodeError::Overflow) => {
                debug!(code = custom, "custom code overflows the codec");
                return Err(Rejection::TooLong);
            }
            // Unreachable: blank codes return above.
            Err(DecodeError::Empty) => return Ok(Allocation::Auto),
        };

        if !id.is_storable() {
            debug!(code = custom, %id, "custom code exceeds the storable range");
            return Err(Rejection::TooLong);
        }

        match self.lookup.exists(id).await {
            Ok(true) => {
                debug!(code = custom, %id, "custom code already taken");
                Err(Rejection::AlreadyTaken(custom.to_owned()))
            }
            Ok(false) => {
                trace!(code = custom, %id, "custom code accepted");
                Ok(Allocation::Custom(id))
            }
            Err(StorageError::OutOfRange(_)) => Err(Rejection::TooLong),
            Err(err) => {
                warn!(code = custom, %id, error = %err, "existence check failed");
                Err(Rejection::Unavailable(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pinhole_core::repository::Result;
    use pinhole_core::{LinkRecord, Repository};
    use pinhole_storage::InMemoryRepository;

    const MYLINK_ID: LinkId = LinkId::new(20_662_393_254);

    fn allocator() -> (Arc<InMemoryRepository>, IdAllocator<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (Arc::clone(&repo), IdAllocator::new(repo))
    }

    /// Answers every lookup with the same error.
    struct FailingLookup(StorageError);

    #[async_trait]
    impl ReadRepository for FailingLookup {
        async fn get(&self, _id: LinkId) -> Result<Option<LinkRecord>> {
            Err(self.0.clone())
        }

        async fn exists(&self, _id: LinkId) -> Result<bool> {
            Err(self.0.clone())
        }

        async fn recent(&self, _limit: usize) -> Result<Vec<(LinkId, LinkRecord)>> {
            Err(self.0.clone())
        }
    }

    #[tokio::test]
    async fn empty_code_defers_to_auto_assignment() {
        let (_, allocator) = allocator();

        assert_eq!(allocator.allocate("").await, Ok(Allocation::Auto));
        assert_eq!(allocator.allocate("   ").await, Ok(Allocation::Auto));
        assert_eq!(Allocation::Auto.id(), None);
    }

    #[tokio::test]
    async fn fresh_custom_code_is_accepted() {
        let (_, allocator) = allocator();

        let allocation = allocator.allocate("mylink").await.unwrap();
        assert_eq!(allocation, Allocation::Custom(MYLINK_ID));
        assert_eq!(allocation.id(), Some(MYLINK_ID));
    }

    #[tokio::test]
    async fn taken_custom_code_is_rejected_with_original_text() {
        let (repo, allocator) = allocator();
        repo.insert(MYLINK_ID, LinkRecord::new("https://www.python.org/"))
            .await
            .unwrap();

        let rejection = allocator.allocate("mylink").await.unwrap_err();
        assert_eq!(rejection, Rejection::AlreadyTaken("mylink".to_string()));
        assert_eq!(rejection.to_string(), "\"mylink\" is already taken");
    }

    #[tokio::test]
    async fn bad_character_is_named() {
        let (_, allocator) = allocator();

        let rejection = allocator
            .allocate("my_link_bad_chars:##$#$%^$&%^**")
            .await
            .unwrap_err();
        assert_eq!(rejection, Rejection::InvalidCharacter('_'));
        assert_eq!(rejection.to_string(), "Invalid character: \"_\"");
    }

    #[tokio::test]
    async fn overlong_code_is_too_long() {
        let (_, allocator) = allocator();

        let rejection = allocator
            .allocate("MyLinkCustomLinkThatIsTooLongooooooooohYea")
            .await
            .unwrap_err();
        assert_eq!(rejection, Rejection::TooLong);
        assert_eq!(rejection.to_string(), TOO_LONG_MESSAGE);
    }

    #[tokio::test]
    async fn code_beyond_signed_range_is_too_long() {
        let (_, allocator) = allocator();

        // i64::MAX itself is fine, one more is not.
        assert_eq!(
            allocator.allocate("aZl8N0y58M7").await,
            Ok(Allocation::Custom(LinkId::MAX))
        );
        assert_eq!(
            allocator.allocate("aZl8N0y58M8").await,
            Err(Rejection::TooLong)
        );
    }

    #[tokio::test]
    async fn lookup_overflow_collapses_to_too_long() {
        let lookup = FailingLookup(StorageError::OutOfRange(MYLINK_ID));
        let allocator = IdAllocator::new(Arc::new(lookup));

        assert_eq!(allocator.allocate("mylink").await, Err(Rejection::TooLong));
    }

    #[tokio::test]
    async fn lookup_failure_is_a_rejection_not_a_raw_error() {
        let lookup = FailingLookup(StorageError::Unavailable("connection refused".into()));
        let allocator = IdAllocator::new(Arc::new(lookup));

        let rejection = allocator.allocate("mylink").await.unwrap_err();
        assert!(matches!(rejection, Rejection::Unavailable(_)));
    }

    #[tokio::test]
    async fn bad_character_is_checked_before_lookup() {
        let lookup = FailingLookup(StorageError::Unavailable("must not be called".into()));
        let allocator = IdAllocator::new(Arc::new(lookup));

        assert_eq!(
            allocator.allocate("a-b").await,
            Err(Rejection::InvalidCharacter('-'))
        );
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() {
        let (_, allocator) = allocator();

        assert_eq!(
            allocator.allocate("  mylink\n").await,
            Ok(Allocation::Custom(MYLINK_ID))
        );
    }
}
