//! Markup injection guard.
//!
//! Wraps a "set raw markup" operation. Every incoming string is checked
//! for an opening `<script` token (ASCII case-insensitive). A hit is
//! reported as a high-severity [`SecurityEvent`], then the original
//! assignment runs unchanged. The guard reports; it never blocks.

pub mod element;

pub use element::{Element, GuardedElement, MarkupTarget};

use crate::recorder::deliver;
use regex::Regex;
use shared::models::{SecurityEvent, Severity};
use shared::sink::SecurityEventSink;
use std::sync::{Arc, LazyLock};

/// Event kind for detected injection attempts.
pub const INJECTION_ATTEMPT: &str = "injection_attempt";

/// Detail subkind for script-tag payloads.
pub const POTENTIAL_XSS: &str = "potential_xss";

/// Characters of the offending value copied into a report.
pub const DEFAULT_CONTENT_PREFIX: usize = 200;

static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)<script").expect("script tag pattern is valid"));

/// Inspects markup assignments and reports suspicious payloads.
pub struct MarkupGuard {
    sink: Option<Arc<dyn SecurityEventSink>>,
    content_prefix: usize,
    enabled: bool,
}

impl MarkupGuard {
    /// Creates an enabled guard. Without a sink, detections are only logged.
    #[must_use]
    pub fn new(sink: Option<Arc<dyn SecurityEventSink>>) -> Self {
        Self {
            sink,
            content_prefix: DEFAULT_CONTENT_PREFIX,
            enabled: true,
        }
    }

    /// Sets how many characters of the value are kept in reports.
    #[must_use]
    pub fn with_content_prefix(mut self, chars: usize) -> Self {
        self.content_prefix = chars;
        self
    }

    /// Turns inspection on or off. Assignments always go through.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns `true` if inspection is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Checks `value` and builds the event it would trigger, if any.
    #[must_use]
    pub fn inspect(&self, element_tag: &str, value: &str) -> Option<SecurityEvent> {
        if !SCRIPT_TAG.is_match(value) {
            return None;
        }

        let prefix: String = value.chars().take(self.content_prefix).collect();

        Some(
            SecurityEvent::new(INJECTION_ATTEMPT, Severity::High)
                .with_detail("subkind", POTENTIAL_XSS)
                .with_detail("contentPrefix", prefix)
                .with_detail("elementTag", element_tag)
                .with_blocked(true),
        )
    }

    /// Inspects `value`, reports it if suspicious, then assigns it to
    /// `target`.
    ///
    /// Returns `true` if the value was flagged. Reporting failures are
    /// swallowed and never affect the assignment.
    pub fn set_markup<T>(&self, target: &mut T, value: impl Into<String>) -> bool
    where
        T: MarkupTarget + ?Sized,
    {
        let value = value.into();

        let flagged = if self.enabled {
            match self.inspect(target.tag_name(), &value) {
                Some(event) => {
                    self.report(&event);
                    true
                }
                None => false,
            }
        } else {
            false
        };

        target.set_inner_html(value);
        flagged
    }

    fn report(&self, event: &SecurityEvent) {
        match &self.sink {
            Some(sink) => {
                deliver("security", || sink.record_event(event));
            }
            None => {
                tracing::warn!(
                    kind = %event.kind,
                    element = event.detail_str("elementTag").unwrap_or_default(),
                    "Potential script injection in markup assignment"
                );
            }
        }
    }
}

impl Default for MarkupGuard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for MarkupGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupGuard")
            .field("has_sink", &self.sink.is_some())
            .field("content_prefix", &self.content_prefix)
            .field("enabled", &self.enabled)
            .finish()
    }
}
