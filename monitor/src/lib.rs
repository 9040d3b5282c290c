//! Portal Monitoring
//!
//! Client-side observability shim for the study portal. It records
//! resource load times from the host's timing feed and watches raw
//! markup assignments for injected script tags.
//!
//! # Architecture
//!
//! - [`recorder::MetricRecorder`] forwards samples to a metric sink
//! - [`timing::ResourceTimingObserver`] turns timing entries into samples
//! - [`guard::MarkupGuard`] inspects markup before the original setter runs
//! - [`debug::DebugLogger`] provides development-only logging helpers
//!
//! [`ProductionMonitoring`] wires these together behind an explicit
//! `start()`/`stop()` lifecycle.
//!
//! # Example
//!
//! ```
//! use portal_monitor::guard::Element;
//! use portal_monitor::{MonitorConfig, ProductionMonitoring};
//! use shared::sink::{InMemoryMetricSink, InMemorySecurityEventSink};
//!
//! let events = InMemorySecurityEventSink::new_shared();
//! let monitoring = ProductionMonitoring::new(
//!     MonitorConfig::default(),
//!     InMemoryMetricSink::new_shared(),
//!     Some(events.clone()),
//! );
//!
//! let mut element = monitoring.guard_element(Element::new("div"));
//! element.set_inner_html("<script>alert(1)</script>");
//!
//! assert_eq!(element.inner_html(), "<script>alert(1)</script>");
//! assert_eq!(events.count().unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod debug;
pub mod guard;
pub mod recorder;
pub mod telemetry;
pub mod timing;

pub use config::MonitorConfig;

use debug::DebugLogger;
use guard::{GuardedElement, MarkupGuard, MarkupTarget};
use recorder::MetricRecorder;
use shared::models::MetricSample;
use shared::sink::{LogMetricSink, LogSecurityEventSink, MetricSink, SecurityEventSink};
use std::sync::Arc;
use timing::{ResourceTimingObserver, TimingFeed};

/// Production monitoring facade.
///
/// Owns the recorder, the markup guard and, once started, the resource
/// timing observer.
#[derive(Debug)]
pub struct ProductionMonitoring {
    config: MonitorConfig,
    recorder: Arc<MetricRecorder>,
    guard: Arc<MarkupGuard>,
    observer: Option<ResourceTimingObserver>,
    debug: DebugLogger,
}

impl ProductionMonitoring {
    /// Creates the facade. Nothing is observed until [`Self::start`].
    #[must_use]
    pub fn new(
        config: MonitorConfig,
        metric_sink: Arc<dyn MetricSink>,
        security_sink: Option<Arc<dyn SecurityEventSink>>,
    ) -> Self {
        let recorder = Arc::new(MetricRecorder::new(metric_sink, config.source.clone()));
        let guard = Arc::new(
            MarkupGuard::new(security_sink)
                .with_content_prefix(config.content_prefix)
                .with_enabled(config.markup_guard),
        );
        let debug = DebugLogger::new(config.debug);

        Self {
            config,
            recorder,
            guard,
            observer: None,
            debug,
        }
    }

    /// Creates the facade with sinks that write log lines.
    #[must_use]
    pub fn with_log_sinks(config: MonitorConfig) -> Self {
        Self::new(
            config,
            Arc::new(LogMetricSink),
            Some(Arc::new(LogSecurityEventSink)),
        )
    }

    /// Starts observing resource timing on `feed`.
    ///
    /// Returns `true` if an observer is running afterwards. A disabled
    /// config or a host without timing support simply yields `false`.
    pub fn start(&mut self, feed: &dyn TimingFeed) -> bool {
        if self.is_observing() {
            return true;
        }

        if !self.config.resource_timing {
            tracing::debug!("Resource timing disabled by configuration");
            return false;
        }

        self.observer = ResourceTimingObserver::start(feed, Arc::clone(&self.recorder));
        self.observer.is_some()
    }

    /// Stops the resource timing observer, if any.
    pub fn stop(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.stop();
        }
    }

    /// Returns `true` while the resource timing observer is running.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(ResourceTimingObserver::is_running)
    }

    /// Records an application-defined sample. Invalid samples are dropped.
    pub fn record_metric(&self, sample: &MetricSample) -> bool {
        self.recorder.record(sample)
    }

    /// Wraps `target` so its markup setter goes through the guard.
    #[must_use]
    pub fn guard_element<T: MarkupTarget>(&self, target: T) -> GuardedElement<T> {
        GuardedElement::new(target, Arc::clone(&self.guard))
    }

    /// The shared markup guard.
    #[must_use]
    pub fn guard(&self) -> &Arc<MarkupGuard> {
        &self.guard
    }

    /// The shared metric recorder.
    #[must_use]
    pub fn recorder(&self) -> &Arc<MetricRecorder> {
        &self.recorder
    }

    /// Debug helpers configured for this instance.
    #[must_use]
    pub fn debug(&self) -> DebugLogger {
        self.debug
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
