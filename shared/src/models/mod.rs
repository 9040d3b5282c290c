//! Data models for the portal monitoring shim.
//!
//! This module contains the samples and events that flow from observers
//! to sinks.

pub mod metric;
pub mod security;

pub use metric::{MetricSample, SampleValidationError, DEFAULT_SOURCE};
pub use security::{SecurityEvent, Severity};
