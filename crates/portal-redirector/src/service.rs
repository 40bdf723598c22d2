use std::sync::Arc;

use crate::error::RedirectError;
use crate::redirector::Redirector;
use async_trait::async_trait;
use jiff::Timestamp;
use portal_core::{Repository, ShortCode};
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Looks the record up, evaluates expiry lazily against the resolution
/// time, and bumps the visit counter through the store's atomic increment.
/// Expired and unknown codes leave the counter untouched.
#[derive(Debug, Clone)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R: Repository> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Resolves a short code to its original URL.
    pub async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        Redirector::resolve(self, code).await
    }
}

#[async_trait]
impl<R: Repository> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        trace!(code = %code, "resolving short code");

        let Some(record) = self
            .repository
            .get(code)
            .await
            .map_err(RedirectError::from)?
        else {
            trace!(code = %code, "short code not found");
            return Err(RedirectError::NotFound(code.to_string()));
        };

        if record.is_expired_at(Timestamp::now()) {
            debug!(code = %code, "record has expired");
            return Err(RedirectError::Expired(code.to_string()));
        }

        self.repository
            .increment_visit(code)
            .await
            .map_err(RedirectError::from)?;

        debug!(code = %code, url = %record.original_url, "resolved short code");
        Ok(record.original_url)
    }
}
