use axum::http::{header, HeaderMap};
use portal_stats::Caller;
use tracing::trace;

/// Subject recorded for callers that presented the configured stats token.
const TOKEN_SUBJECT: &str = "stats-token";

/// Bearer-token authenticator for the stats endpoint.
///
/// This is the authentication collaborator in front of the stats reporter:
/// it turns the `Authorization` header into a [`Caller`] value and nothing
/// else. With no token configured every caller is anonymous, so the stats
/// endpoint fails closed.
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    token: Option<String>,
}

impl BearerAuthenticator {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Classifies the request's caller from its headers.
    pub fn authenticate(&self, headers: &HeaderMap) -> Caller {
        let Some(expected) = self.token.as_deref() else {
            trace!("no stats token configured, treating caller as anonymous");
            return Caller::Anonymous;
        };

        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match presented {
            Some(token) if token == expected => Caller::authenticated(TOKEN_SUBJECT),
            _ => Caller::Anonymous,
        }
    }
}
