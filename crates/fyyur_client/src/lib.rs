//! Client-side helpers for the Fyyur venue site: lenient timestamp parsing,
//! show-time formatting, and venue deletion with redirect following.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod config;
pub mod deleter;
pub mod display;
pub mod http_client;
pub mod iso;
pub mod observability;

pub use deleter::{DeleteOutcome, Navigator, VenueDeleter, venue_path};
pub use display::{DisplayFormat, format_show_time};
pub use iso::{MissingFields, TimestampParts, parse_iso_string, parse_iso_string_with};
pub use observability::{DiagnosticLog, TracingLog};

#[derive(Debug, Error)]
pub enum FyyurError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("redirect error: {0}")]
    Redirect(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The parts of a settled DELETE exchange that callers look at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VenueResponse {
    pub status: u16,
    /// Whether the final response was reached through at least one redirect.
    pub redirected: bool,
    /// Final URL after redirects.
    pub url: String,
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issue a single DELETE for `path` (relative to the site root).
    ///
    /// Any HTTP status counts as a settled exchange; only failures to
    /// build or complete the request are errors.
    async fn delete(&self, path: &str) -> Result<VenueResponse, FyyurError>;
}
