//! Metric recorder.
//!
//! Forwards samples to the configured metric sink. Recording never fails
//! toward the caller: sink errors and panics are logged and dropped.

use shared::models::MetricSample;
use shared::sink::{MetricSink, SinkError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Runs a sink call, swallowing both errors and panics.
///
/// Returns `true` if the sink accepted the record.
pub(crate) fn deliver<F>(what: &'static str, send: F) -> bool
where
    F: FnOnce() -> Result<(), SinkError>,
{
    match panic::catch_unwind(AssertUnwindSafe(send)) {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            tracing::warn!(sink = what, %error, "Sink rejected record, dropping it");
            false
        }
        Err(_) => {
            tracing::warn!(sink = what, "Sink panicked, dropping record");
            false
        }
    }
}

/// Fire-and-forget front for a metric sink.
pub struct MetricRecorder {
    sink: Arc<dyn MetricSink>,
    source: String,
}

impl MetricRecorder {
    /// Creates a recorder that stamps samples with `source`.
    #[must_use]
    pub fn new(sink: Arc<dyn MetricSink>, source: impl Into<String>) -> Self {
        Self {
            sink,
            source: source.into(),
        }
    }

    /// Source label this recorder applies to samples it builds.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Validates a sample and forwards it to the sink.
    ///
    /// Invalid samples (empty name or unit, non-finite value) are logged
    /// and dropped. Returns `true` if the sink accepted the sample.
    pub fn record(&self, sample: &MetricSample) -> bool {
        if let Err(error) = sample.validate_sample() {
            tracing::warn!(metric = %sample.name, %error, "Dropping invalid metric sample");
            return false;
        }

        deliver("metric", || self.sink.record(sample))
    }
}

impl std::fmt::Debug for MetricRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRecorder")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
