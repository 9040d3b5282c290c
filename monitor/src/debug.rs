//! Development-time debug helpers.
//!
//! Every helper is a no-op unless debug output is enabled, except that
//! wrapped closures passed to [`DebugLogger::performance`] always run.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::time::Instant;

const TARGET: &str = "portal_monitor::debug";

/// Debug logger gated on a single switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugLogger {
    enabled: bool,
}

impl DebugLogger {
    /// Creates a logger; output is emitted only when `enabled`.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns `true` if debug output is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a debug message with optional data.
    pub fn log(&self, message: &str, data: Option<&Value>) {
        if self.enabled {
            tracing::debug!(target: TARGET, data = ?data, "[DEBUG] {message}");
        }
    }

    /// Logs a debug warning with optional data.
    pub fn warn(&self, message: &str, data: Option<&Value>) {
        if self.enabled {
            tracing::warn!(target: TARGET, data = ?data, "[DEBUG WARN] {message}");
        }
    }

    /// Logs a debug error with optional details.
    pub fn error(&self, message: &str, error: Option<&dyn std::fmt::Display>) {
        if self.enabled {
            match error {
                Some(error) => {
                    tracing::error!(target: TARGET, %error, "[DEBUG ERROR] {message}");
                }
                None => tracing::error!(target: TARGET, "[DEBUG ERROR] {message}"),
            }
        }
    }

    /// Runs `f` inside a labelled span. Does nothing when disabled.
    pub fn group<F>(&self, label: &str, f: F)
    where
        F: FnOnce(),
    {
        if !self.enabled {
            return;
        }

        let span = tracing::debug_span!(target: TARGET, "debug_group", label);
        let _entered = span.enter();
        f();
    }

    /// Logs submitted form data next to its validation errors.
    pub fn form_validation(&self, form_data: &Value, errors: &Value) {
        if !self.enabled {
            return;
        }

        let span = tracing::debug_span!(target: TARGET, "debug_form_validation");
        let _entered = span.enter();
        tracing::debug!(target: TARGET, data = %form_data, "[DEBUG FORM VALIDATION] Form Data");
        tracing::debug!(
            target: TARGET,
            errors = %errors,
            "[DEBUG FORM VALIDATION] Validation Errors"
        );
    }

    /// Runs `f` and, when enabled, logs how long it took.
    pub fn performance<T, F>(&self, label: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(target: TARGET, "[DEBUG PERFORMANCE] {label}: {elapsed_ms:.2}ms");
        result
    }

    /// Logs that a component rendered, with the current UTC time.
    pub fn render(&self, component: &str) {
        if self.enabled {
            let at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            tracing::debug!(target: TARGET, "[DEBUG RENDER] {component} rendered at {at}");
        }
    }

    /// Logs an outgoing API call.
    pub fn api_call(&self, endpoint: &str, method: &str, data: Option<&Value>) {
        if self.enabled {
            tracing::debug!(target: TARGET, data = ?data, "[DEBUG API] {method} {endpoint}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use tracing_test::traced_test;

    #[test]
    fn test_performance_returns_result_either_way() {
        assert_eq!(DebugLogger::new(false).performance("sum", || 2 + 2), 4);
        assert_eq!(DebugLogger::new(true).performance("sum", || 2 + 2), 4);
    }

    #[test]
    fn test_group_skipped_when_disabled() {
        let ran = Cell::new(false);
        DebugLogger::new(false).group("form", || ran.set(true));
        assert!(!ran.get());

        DebugLogger::new(true).group("form", || ran.set(true));
        assert!(ran.get());
    }

    #[traced_test]
    #[test]
    fn test_enabled_logger_emits() {
        let logger = DebugLogger::new(true);

        logger.log("demo request prepared", Some(&json!({"studies": 3})));
        logger.api_call("/api/demo", "POST", None);
        logger.render("DemoPage");

        assert!(logs_contain("[DEBUG] demo request prepared"));
        assert!(logs_contain("[DEBUG API] POST /api/demo"));
        assert!(logs_contain("[DEBUG RENDER] DemoPage rendered at"));
    }

    #[traced_test]
    #[test]
    fn test_disabled_logger_is_silent() {
        let logger = DebugLogger::default();

        logger.log("hidden", None);
        logger.warn("hidden warn", None);
        logger.error("hidden error", Some(&"boom"));

        assert!(!logs_contain("hidden"));
    }

    #[traced_test]
    #[test]
    fn test_form_validation_logs_data_and_errors() {
        let logger = DebugLogger::new(true);

        logger.form_validation(
            &json!({"email": "pi@site-17.example", "studyCount": "many"}),
            &json!({"studyCount": "must be a number"}),
        );

        assert!(logs_contain("[DEBUG FORM VALIDATION]"));
        assert!(logs_contain("Form Data"));
        assert!(logs_contain("pi@site-17.example"));
        assert!(logs_contain("Validation Errors"));
        assert!(logs_contain("must be a number"));
    }

    #[traced_test]
    #[test]
    fn test_form_validation_silent_when_disabled() {
        DebugLogger::new(false).form_validation(
            &json!({"email": "coordinator@site-4.example"}),
            &json!({}),
        );

        assert!(!logs_contain("Form Data"));
        assert!(!logs_contain("coordinator@site-4.example"));
    }

    #[traced_test]
    #[test]
    fn test_performance_logs_timing() {
        DebugLogger::new(true).performance("validate form", || ());
        assert!(logs_contain("[DEBUG PERFORMANCE] validate form:"));
    }
}
