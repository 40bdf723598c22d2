use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    pub original_url: String,
    /// Overrides the configured default TTL; `0` disables expiry.
    pub ttl_seconds: Option<u64>,
}

#[derive(Serialize)]
pub struct CreateLinkResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}
