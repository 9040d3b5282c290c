//! Sink traits and implementations.
//!
//! Sinks are the outbound collaborators of the monitoring shim. A sink
//! may write a log line, buffer in memory, or forward to a telemetry
//! pipeline. The `MetricSink` and `SecurityEventSink` traits keep the
//! observers independent of where data ends up.

pub mod metric_sink;
pub mod security_sink;

pub use metric_sink::{InMemoryMetricSink, LogMetricSink, MetricSink, NoopMetricSink};
pub use security_sink::{
    InMemorySecurityEventSink, LogSecurityEventSink, NoopSecurityEventSink, SecurityEventSink,
};

use thiserror::Error;

/// Errors that can occur while forwarding to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to acquire lock on the sink.
    #[error("Failed to acquire lock on sink")]
    LockError,

    /// The sink refused the record.
    #[error("Sink rejected record: {0}")]
    Rejected(String),

    /// Generic delivery error.
    #[error("Sink delivery failed: {0}")]
    Delivery(String),
}
