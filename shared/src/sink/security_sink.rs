//! Security event sink trait and implementations.

use super::SinkError;
use crate::models::SecurityEvent;
use std::sync::{Arc, RwLock};

/// Trait for security event sink implementations.
pub trait SecurityEventSink: Send + Sync {
    /// Forwards a single event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be delivered.
    fn record_event(&self, event: &SecurityEvent) -> Result<(), SinkError>;
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSecurityEventSink;

impl SecurityEventSink for NoopSecurityEventSink {
    fn record_event(&self, _event: &SecurityEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that writes each event as a warning log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSecurityEventSink;

impl SecurityEventSink for LogSecurityEventSink {
    fn record_event(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        tracing::warn!(
            kind = %event.kind,
            severity = %event.severity,
            blocked = event.blocked,
            details = ?event.details,
            "Security event recorded"
        );
        Ok(())
    }
}

/// In-memory security event sink.
#[derive(Debug, Default)]
pub struct InMemorySecurityEventSink {
    events: Arc<RwLock<Vec<SecurityEvent>>>,
}

impl InMemorySecurityEventSink {
    /// Creates a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory sink wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns a copy of every event recorded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn events(&self) -> Result<Vec<SecurityEvent>, SinkError> {
        let events = self.events.read().map_err(|_| SinkError::LockError)?;
        Ok(events.clone())
    }

    /// Returns the number of recorded events.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn count(&self) -> Result<usize, SinkError> {
        let events = self.events.read().map_err(|_| SinkError::LockError)?;
        Ok(events.len())
    }
}

impl SecurityEventSink for InMemorySecurityEventSink {
    fn record_event(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        let mut events = self.events.write().map_err(|_| SinkError::LockError)?;
        events.push(event.clone());
        Ok(())
    }
}

impl<S: SecurityEventSink + ?Sized> SecurityEventSink for Arc<S> {
    fn record_event(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        (**self).record_event(event)
    }
}
