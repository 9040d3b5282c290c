//! Portal Monitoring Shared Library
//!
//! This crate contains the data models and sink abstractions used by the
//! portal monitoring shim.
//!
//! # Modules
//!
//! - [`models`] - Metric samples and security events
//! - [`sink`] - Sink traits and implementations
//!
//! # Example
//!
//! ```
//! use shared::models::MetricSample;
//! use shared::sink::{InMemoryMetricSink, MetricSink};
//!
//! let sink = InMemoryMetricSink::new();
//! sink.record(&MetricSample::new("resource_load_time", 250.0, "ms"))
//!     .unwrap();
//!
//! assert_eq!(sink.count().unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod sink;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
pub use validator;
