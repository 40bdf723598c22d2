//! Redirect resolution for the Portal URL shortener.
//!
//! The resolver turns an inbound short code into the original URL, counts
//! the visit, and signals unknown and expired codes as distinct outcomes.

pub mod error;
pub mod redirector;
pub mod service;

pub use error::RedirectError;
pub use redirector::Redirector;
pub use service::RedirectorService;

/// Result type for redirect resolution.
pub type Result<T> = std::result::Result<T, RedirectError>;
