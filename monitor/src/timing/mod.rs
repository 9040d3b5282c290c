//! Resource timing feed and observer.
//!
//! The host environment reports network resource fetches as
//! [`ResourceTimingEntry`] batches through a [`TimingFeed`]. The
//! [`ResourceTimingObserver`] turns each resource entry into a
//! `resource_load_time` sample.

pub mod feed;
pub mod observer;

pub use feed::{
    BufferedTimingFeed, TimingBatch, TimingFeed, UnavailableFeed, DEFAULT_BUFFER_SIZE,
};
pub use observer::{process_batch, sample_for, ResourceTimingObserver, RESOURCE_LOAD_TIME};

use serde::{Deserialize, Serialize};

/// Entry type reported for network resource fetches.
pub const RESOURCE_ENTRY_TYPE: &str = "resource";

/// One timing record as reported by the host.
///
/// `request_start` and `response_end` are optional because hosts may
/// omit them (e.g. for cross-origin resources without timing headers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTimingEntry {
    /// Kind of entry ("resource", "navigation", "paint", ...).
    pub entry_type: String,

    /// Resource URL or entry name.
    pub name: String,

    /// What initiated the fetch ("script", "img", "fetch", ...).
    #[serde(default)]
    pub initiator_type: String,

    /// Timestamp when the request was issued, in milliseconds.
    #[serde(default)]
    pub request_start: Option<f64>,

    /// Timestamp when the last response byte arrived, in milliseconds.
    #[serde(default)]
    pub response_end: Option<f64>,
}

impl ResourceTimingEntry {
    /// Creates a resource entry with both timestamps present.
    #[must_use]
    pub fn resource(
        name: impl Into<String>,
        initiator_type: impl Into<String>,
        request_start: f64,
        response_end: f64,
    ) -> Self {
        Self {
            entry_type: RESOURCE_ENTRY_TYPE.to_string(),
            name: name.into(),
            initiator_type: initiator_type.into(),
            request_start: Some(request_start),
            response_end: Some(response_end),
        }
    }

    /// Returns `true` if this entry describes a network resource.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        self.entry_type == RESOURCE_ENTRY_TYPE
    }

    /// Load time in milliseconds, if both timestamps are usable numbers.
    #[must_use]
    pub fn load_time(&self) -> Option<f64> {
        let start = self.request_start.filter(|v| v.is_finite())?;
        let end = self.response_end.filter(|v| v.is_finite())?;
        Some(end - start)
    }
}
