use crate::error::ShortenError;
use async_trait::async_trait;
use jiff::Timestamp;
use portal_core::{LinkRecord, ShortCode};
use std::time::Duration;

type Result<T> = std::result::Result<T, ShortenError>;

/// Expiration policy for a shortened URL.
#[derive(Debug, Clone)]
pub enum ExpirationPolicy {
    /// The shortened URL never expires.
    Never,
    /// The shortened URL expires after a certain duration from creation.
    AfterDuration(Duration),
    /// The shortened URL expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// The expiration policy for the shortened URL.
    pub expiration: ExpirationPolicy,
}

/// A freshly created link: the reserved code and the persisted record.
#[derive(Debug, Clone)]
pub struct ShortenedLink {
    pub short_code: ShortCode,
    pub record: LinkRecord,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the reserved code and record.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedLink>;
}
