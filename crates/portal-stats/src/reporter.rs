use crate::caller::Caller;
use crate::Result;
use async_trait::async_trait;
use jiff::Timestamp;
use portal_core::ShortCode;
use serde::Serialize;

/// Read-only projection of a link record for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub short_code: ShortCode,
    pub original_url: String,
    pub short_url: String,
    pub visit_count: u64,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

#[async_trait]
pub trait StatsReporter: Send + Sync + 'static {
    /// Projects the record behind `code` into a [`StatsView`].
    ///
    /// Anonymous callers are refused with `Unauthorized`; unknown codes
    /// yield `NotFound`. Expired records still report: expiry is visible
    /// in the view, not an error.
    async fn report(&self, code: &ShortCode, caller: &Caller) -> Result<StatsView>;
}
