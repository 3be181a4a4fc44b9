use crate::FyyurError;

/// Where swallowed failures go.
pub trait DiagnosticLog: Send + Sync + 'static {
    fn record(&self, error: &FyyurError);
}

/// Writes failures to the `tracing` error channel as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn record(&self, error: &FyyurError) {
        tracing::error!(error = ?error, "venue deletion failed");
    }
}
