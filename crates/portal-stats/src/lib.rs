//! Statistics reporting for the Portal URL shortener.
//!
//! A read-only projection over a link record, gated by a caller identity
//! the transport's authentication layer has already verified. Credentials
//! are never inspected here.

pub mod caller;
pub mod error;
pub mod reporter;
pub mod service;

pub use caller::{Caller, CallerIdentity};
pub use error::StatsError;
pub use reporter::{StatsReporter, StatsView};
pub use service::StatsService;

/// Result type for stats reporting.
pub type Result<T> = std::result::Result<T, StatsError>;
