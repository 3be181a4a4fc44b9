//! Venue deletion with redirect following.
//!
//! A deletion is one DELETE to `/venues/{id}`. When the server answers through
//! a redirect the current location is replaced with the final URL. Any other
//! settled response is left to the caller. Transport failures are written to
//! the diagnostic log and never reach the caller.

use std::fmt::Display;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::observability::{DiagnosticLog, TracingLog};
use crate::{FyyurError, Transport};

/// Replaces the current location with a new URL (a full page load).
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, url: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The response came through a redirect and the location was replaced.
    Navigated { url: String },
    /// The exchange settled without a redirect; the status is not inspected.
    NoAction { status: u16 },
    /// The request never settled; the error went to the diagnostic log.
    Failed,
}

/// Path of a venue resource. The identifier is inserted as-is.
pub fn venue_path(venue_id: impl Display) -> String {
    format!("/venues/{venue_id}")
}

#[derive(Clone)]
pub struct VenueDeleter {
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    log: Arc<dyn DiagnosticLog>,
}

impl VenueDeleter {
    /// Build a deleter that logs failures through `tracing`.
    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_log(transport, navigator, Arc::new(TracingLog))
    }

    pub fn with_log(
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        log: Arc<dyn DiagnosticLog>,
    ) -> Self {
        Self {
            transport,
            navigator,
            log,
        }
    }

    /// Delete one venue and follow a redirect if the server issued one.
    pub async fn delete_venue(&self, venue_id: impl Display) -> DeleteOutcome {
        let path = venue_path(venue_id);
        match self.transport.delete(&path).await {
            Ok(resp) if resp.redirected => {
                tracing::info!(%path, location = %resp.url, "following redirect");
                self.navigator.navigate(&resp.url);
                DeleteOutcome::Navigated { url: resp.url }
            }
            Ok(resp) => {
                tracing::debug!(%path, status = resp.status, "no redirect, nothing to do");
                DeleteOutcome::NoAction {
                    status: resp.status,
                }
            }
            Err(err) => {
                self.report(err);
                DeleteOutcome::Failed
            }
        }
    }

    /// Start a deletion and return immediately. The continuation runs on the
    /// current tokio runtime; dropping the handle does not cancel it.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like [`tokio::spawn`].
    pub fn spawn_delete(&self, venue_id: impl Display) -> JoinHandle<DeleteOutcome> {
        let this = self.clone();
        let venue_id = venue_id.to_string();
        tokio::spawn(async move { this.delete_venue(venue_id).await })
    }

    /// Delete several venues concurrently, one independent request per id.
    /// Repeated ids are not collapsed. Outcomes follow input order.
    pub async fn delete_venues<I>(&self, venue_ids: I) -> Vec<DeleteOutcome>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        join_all(venue_ids.into_iter().map(|id| self.delete_venue(id))).await
    }

    fn report(&self, err: FyyurError) {
        self.log.record(&err);
    }
}
