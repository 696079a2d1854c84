use crate::allocator::{Allocation, IdAllocator, Rejection};
use crate::error::{FieldErrors, Result};
use crate::shortener::{ShortLink, ShortenParams, Shortener};
use async_trait::async_trait;
use pinhole_core::{LinkRecord, Repository, ShortCode, StorageError};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` to handle:
/// - URL validation
/// - Custom code validation through [`IdAllocator`]
/// - Record creation under an auto-assigned or custom identifier
///
/// The short code of every link is derived from its identifier, so a custom
/// alias like `"007"` comes back as `"7"`.
#[derive(Debug)]
pub struct ShortenerService<R> {
    repository: Arc<R>,
    allocator: IdAllocator<R>,
}

impl<R> Clone for ShortenerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            allocator: self.allocator.clone(),
        }
    }
}

impl<R: Repository> ShortenerService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Creates a service over a repository that is also used elsewhere.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self {
            allocator: IdAllocator::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Validates that the URL has a valid format (has a scheme and host).
    fn validate_url(url: &str) -> std::result::Result<(), String> {
        if url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(format!("URL must have a valid scheme and host: {}", url));
        };

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(format!("URL scheme must be http or https: {}", scheme));
        }

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(format!("URL must have a valid scheme and host: {}", url));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: Repository> Shortener for ShortenerService<R> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortLink> {
        let alias = params.custom_alias.as_deref().unwrap_or_default().trim();
        let url_check = Self::validate_url(&params.original_url);
        let allocation = self.allocator.allocate(alias).await;

        let allocation = match (url_check, allocation) {
            (Ok(()), Ok(allocation)) => allocation,
            (url_check, allocation) => {
                let errors = FieldErrors {
                    url: url_check.err(),
                    custom: allocation.err(),
                };
                debug!(%errors, "submission rejected");
                return Err(errors.into());
            }
        };

        let record = LinkRecord::new(params.original_url);
        let id = match allocation {
            Allocation::Auto => self.repository.insert_auto(record.clone()).await?,
            Allocation::Custom(id) => {
                // A concurrent submission may have claimed the id since the check.
                match self.repository.insert(id, record.clone()).await {
                    Ok(()) => id,
                    Err(StorageError::Conflict(_)) => {
                        debug!(alias, %id, "custom code claimed during insert");
                        return Err(Rejection::AlreadyTaken(alias.to_owned()).into());
                    }
                    Err(StorageError::OutOfRange(_)) => return Err(Rejection::TooLong.into()),
                    Err(err) => return Err(err.into()),
                }
            }
        };

        let link = ShortLink::new(id, record);
        info!(
            code = %link.code,
            %id,
            custom = allocation.id().is_some(),
            url = %link.record.original_url,
            "created short link"
        );
        Ok(link)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        trace!(code = %code, "resolving short code");

        let id = code.id();
        if !id.is_storable() {
            return Ok(None);
        }

        match self.repository.get(id).await {
            Ok(record) => Ok(record),
            Err(StorageError::OutOfRange(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ShortLink>> {
        let links = self.repository.recent(limit).await?;
        Ok(links
            .into_iter()
            .map(|(id, record)| ShortLink::new(id, record))
            .collect())
    }
}
