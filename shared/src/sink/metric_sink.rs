//! Metric sink trait and implementations.

use super::SinkError;
use crate::models::MetricSample;
use std::sync::{Arc, RwLock};

/// Trait for metric sink implementations.
///
/// Implementations must be thread-safe (Send + Sync) since samples may
/// arrive from an observer task.
pub trait MetricSink: Send + Sync {
    /// Forwards a single sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample could not be delivered.
    fn record(&self, sample: &MetricSample) -> Result<(), SinkError>;
}

/// Sink that discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricSink;

impl MetricSink for NoopMetricSink {
    fn record(&self, _sample: &MetricSample) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that writes each sample as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMetricSink;

impl MetricSink for LogMetricSink {
    fn record(&self, sample: &MetricSample) -> Result<(), SinkError> {
        tracing::info!(
            metric = %sample.name,
            value = sample.value,
            unit = %sample.unit,
            source = %sample.source,
            tags = ?sample.tags,
            "Metric recorded"
        );
        Ok(())
    }
}

/// In-memory metric sink, mostly useful for tests and local buffering.
#[derive(Debug, Default)]
pub struct InMemoryMetricSink {
    samples: Arc<RwLock<Vec<MetricSample>>>,
}

impl InMemoryMetricSink {
    /// Creates a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory sink wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns a copy of every sample recorded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn samples(&self) -> Result<Vec<MetricSample>, SinkError> {
        let samples = self.samples.read().map_err(|_| SinkError::LockError)?;
        Ok(samples.clone())
    }

    /// Returns the number of recorded samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn count(&self) -> Result<usize, SinkError> {
        let samples = self.samples.read().map_err(|_| SinkError::LockError)?;
        Ok(samples.len())
    }

    /// Drops all recorded samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn clear(&self) -> Result<(), SinkError> {
        let mut samples = self.samples.write().map_err(|_| SinkError::LockError)?;
        samples.clear();
        Ok(())
    }
}

impl MetricSink for InMemoryMetricSink {
    fn record(&self, sample: &MetricSample) -> Result<(), SinkError> {
        let mut samples = self.samples.write().map_err(|_| SinkError::LockError)?;
        samples.push(sample.clone());
        Ok(())
    }
}

impl<S: MetricSink + ?Sized> MetricSink for Arc<S> {
    fn record(&self, sample: &MetricSample) -> Result<(), SinkError> {
        (**self).record(sample)
    }
}
