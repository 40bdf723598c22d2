use std::sync::Arc;

use crate::auth::BearerAuthenticator;
use portal_redirector::Redirector;
use portal_shortener::{ExpirationPolicy, Shortener};
use portal_stats::StatsReporter;

/// Shared handler state: the three services, the authenticator, and the
/// startup configuration the handlers need.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    stats: Arc<dyn StatsReporter>,
    authenticator: Arc<BearerAuthenticator>,
    base_url: String,
    default_expiration: ExpirationPolicy,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        redirector: Arc<dyn Redirector>,
        stats: Arc<dyn StatsReporter>,
        authenticator: BearerAuthenticator,
        public_base_url: impl Into<String>,
        default_expiration: ExpirationPolicy,
    ) -> Self {
        Self {
            shortener,
            redirector,
            stats,
            authenticator: Arc::new(authenticator),
            base_url: public_base_url.into(),
            default_expiration,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    pub fn stats(&self) -> &dyn StatsReporter {
        self.stats.as_ref()
    }

    pub fn authenticator(&self) -> &BearerAuthenticator {
        self.authenticator.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_expiration(&self) -> ExpirationPolicy {
        self.default_expiration.clone()
    }
}
