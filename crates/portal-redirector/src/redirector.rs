use crate::Result;
use async_trait::async_trait;
use portal_core::ShortCode;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its original URL, counting the visit.
    ///
    /// Unknown codes yield `NotFound`, expired codes yield `Expired`; the
    /// visit counter moves only on success, exactly once per call.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
