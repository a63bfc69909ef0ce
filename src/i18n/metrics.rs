//! Translation engine metrics.
//!
//! Each engine owns its own counters so that several engines (or tests) never
//! observe each other's numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Bindings successfully written during substitution passes
    applied: AtomicUsize,

    /// Bindings left untouched because their key was missing
    missing: AtomicUsize,

    /// Requests to switch to an unsupported language
    unsupported_requests: AtomicUsize,

    /// Failed attempts to load the translation resource
    resource_failures: AtomicUsize,

    /// Successful language switches
    switches: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&self) {
        self.applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing(&self) {
        self.missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unsupported_request(&self) {
        self.unsupported_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resource_failure(&self) {
        self.resource_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::Relaxed)
    }

    pub fn missing(&self) -> usize {
        self.missing.load(Ordering::Relaxed)
    }

    pub fn unsupported_requests(&self) -> usize {
        self.unsupported_requests.load(Ordering::Relaxed)
    }

    pub fn resource_failures(&self) -> usize {
        self.resource_failures.load(Ordering::Relaxed)
    }

    pub fn switches(&self) -> usize {
        self.switches.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let applied = self.applied();
        let missing = self.missing();
        let total = applied + missing;
        let coverage = if total > 0 {
            (applied as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            applied,
            missing,
            coverage,
            unsupported_requests: self.unsupported_requests(),
            resource_failures: self.resource_failures(),
            switches: self.switches(),
        }
    }
}

/// Snapshot of the engine counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub applied: usize,
    pub missing: usize,

    /// Share of bindings that found a translation, as a percentage (0-100)
    pub coverage: f64,

    pub unsupported_requests: usize,
    pub resource_failures: usize,
    pub switches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = TranslationMetrics::new();
        assert_eq!(metrics.applied(), 0);
        assert_eq!(metrics.missing(), 0);
        assert_eq!(metrics.unsupported_requests(), 0);
        assert_eq!(metrics.resource_failures(), 0);
        assert_eq!(metrics.switches(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = TranslationMetrics::new();
        metrics.record_applied();
        metrics.record_applied();
        metrics.record_missing();
        metrics.record_unsupported_request();
        metrics.record_resource_failure();
        metrics.record_switch();

        assert_eq!(metrics.applied(), 2);
        assert_eq!(metrics.missing(), 1);
        assert_eq!(metrics.unsupported_requests(), 1);
        assert_eq!(metrics.resource_failures(), 1);
        assert_eq!(metrics.switches(), 1);
    }

    #[test]
    fn test_instances_are_independent() {
        let first = TranslationMetrics::new();
        let second = TranslationMetrics::new();
        first.record_missing();
        assert_eq!(second.missing(), 0);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new().report();
        assert_eq!(report.applied, 0);
        assert_eq!(report.coverage, 0.0);
    }

    #[test]
    fn test_report_coverage() {
        let metrics = TranslationMetrics::new();
        // 3 applied, 1 missing = 75% coverage
        metrics.record_applied();
        metrics.record_applied();
        metrics.record_applied();
        metrics.record_missing();

        let report = metrics.report();
        assert_eq!(report.coverage, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_switch();
        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["switches"], 1);
    }
}
