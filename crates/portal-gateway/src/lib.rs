//! HTTP gateway for the Portal URL shortener.
//!
//! Maps the HTTP surface onto the shortener, redirector and stats services,
//! and owns the ambient concerns of the binary: configuration, bearer-token
//! authentication for the stats endpoint, and error-to-status mapping.

pub mod app;
pub mod auth;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
