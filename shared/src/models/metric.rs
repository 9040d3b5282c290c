//! Metric sample data model.
//!
//! Defines the `MetricSample` structure handed from observers to metric sinks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

/// Default source label for samples produced by the client runtime.
pub const DEFAULT_SOURCE: &str = "browser";

/// A single structured performance sample.
///
/// Samples are created per observed event, forwarded once and then
/// discarded. They carry no identity of their own.
///
/// # Example
///
/// ```
/// use shared::models::MetricSample;
///
/// let sample = MetricSample::new("resource_load_time", 250.0, "ms")
///     .with_tag("type", "resource")
///     .with_tag("name", "https://cdn.example.com/app.js");
///
/// assert_eq!(sample.source, "browser");
/// assert!(sample.validate_sample().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    /// The name of the metric (e.g., "`resource_load_time`").
    #[serde(rename = "metricName")]
    #[validate(length(min = 1, message = "Metric name cannot be empty"))]
    pub name: String,

    /// The measured value.
    pub value: f64,

    /// Unit of the value (e.g., "ms").
    #[validate(length(min = 1, message = "Metric unit cannot be empty"))]
    pub unit: String,

    /// Dimensions describing what was measured.
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Where the sample was observed.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// Errors that can occur during sample validation.
#[derive(Debug, Error)]
pub enum SampleValidationError {
    /// The value is NaN or infinite.
    #[error("Metric value must be finite, got {0}")]
    NonFiniteValue(f64),

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl MetricSample {
    /// Creates a new sample with no tags and the default source.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            tags: HashMap::new(),
            source: default_source(),
        }
    }

    /// Adds a tag to the sample.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Sets the source of the sample.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Returns the value of a tag, if present.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Validates the sample.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not finite
    /// - The name or unit is empty
    pub fn validate_sample(&self) -> Result<(), SampleValidationError> {
        if !self.value.is_finite() {
            return Err(SampleValidationError::NonFiniteValue(self.value));
        }

        self.validate()?;
        Ok(())
    }
}
