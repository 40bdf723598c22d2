use std::sync::Arc;

use crate::caller::Caller;
use crate::error::StatsError;
use crate::reporter::{StatsReporter, StatsView};
use async_trait::async_trait;
use portal_core::{ReadRepository, ShortCode};
use tracing::{debug, trace};

/// A concrete implementation of the `StatsReporter` trait.
///
/// Pure read path: looks the record up through the read-only repository
/// view and assembles the projection. The short URL is computed from the
/// configured public base URL.
#[derive(Debug, Clone)]
pub struct StatsService<R> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: ReadRepository> StatsService<R> {
    /// Creates a new `StatsService` over the given repository.
    pub fn new(repository: R, public_base_url: impl Into<String>) -> Self {
        Self {
            repository: Arc::new(repository),
            base_url: public_base_url.into(),
        }
    }

    /// Projects the record behind `code` into a [`StatsView`].
    pub async fn report(&self, code: &ShortCode, caller: &Caller) -> crate::Result<StatsView> {
        StatsReporter::report(self, code, caller).await
    }
}

#[async_trait]
impl<R: ReadRepository> StatsReporter for StatsService<R> {
    async fn report(&self, code: &ShortCode, caller: &Caller) -> crate::Result<StatsView> {
        let Caller::Authenticated(identity) = caller else {
            debug!(code = %code, "refusing stats for anonymous caller");
            return Err(StatsError::Unauthorized);
        };

        trace!(code = %code, subject = %identity.subject, "reporting stats");

        let Some(record) = self
            .repository
            .get(code)
            .await
            .map_err(StatsError::from)?
        else {
            trace!(code = %code, "short code not found");
            return Err(StatsError::NotFound(code.to_string()));
        };

        Ok(StatsView {
            short_url: code.to_url(&self.base_url),
            short_code: code.clone(),
            original_url: record.original_url,
            visit_count: record.visit_count,
            created_at: record.created_at,
            expires_at: record.expires_at,
        })
    }
}
