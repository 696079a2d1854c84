use crate::error::Result;
use async_trait::async_trait;
use pinhole_core::{LinkId, LinkRecord, ShortCode};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// How many links a listing of recent submissions shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    #[builder(setter(into))]
    pub original_url: String,
    /// Optional custom short code requested by the submitter.
    #[builder(default, setter(into, strip_option))]
    pub custom_alias: Option<String>,
}

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortLink {
    pub id: LinkId,
    /// Always `ShortCode::from_id(id)`.
    pub code: ShortCode,
    pub record: LinkRecord,
}

impl ShortLink {
    pub fn new(id: LinkId, record: LinkRecord) -> Self {
        Self {
            id,
            code: ShortCode::from_id(id),
            record,
        }
    }

    /// Renders the public short URL under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        self.code.to_url(base_url)
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the new link.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortLink>;

    /// Resolves a short code to its stored record.
    /// Returns `None` if no record exists for it.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Lists up to `limit` links, most recently submitted first.
    async fn recent(&self, limit: usize) -> Result<Vec<ShortLink>>;
}
