//! Lookup and propagation counters.
//!
//! One `I18nMetrics` lives inside each `TranslationStore`; the controller
//! records switches and fan-out deliveries into the same instance so a single
//! report covers the whole subsystem.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct I18nMetrics {
    /// Lookups that found a non-empty translation
    hits: AtomicUsize,

    /// Lookups that fell back to the raw key
    misses: AtomicUsize,

    /// Successful `set_language` calls
    switches: AtomicUsize,

    /// `set_language` calls rejected for an unsupported code
    rejected_switches: AtomicUsize,

    /// Observer invocations performed by fan-out
    notifications: AtomicUsize,
}

impl I18nMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_switch(&self) {
        self.rejected_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notifications(&self, count: usize) {
        self.notifications.fetch_add(count, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn switches(&self) -> usize {
        self.switches.load(Ordering::Relaxed)
    }

    pub fn rejected_switches(&self) -> usize {
        self.rejected_switches.load(Ordering::Relaxed)
    }

    pub fn notifications(&self) -> usize {
        self.notifications.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let lookups = hits + misses;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            misses,
            hit_rate,
            switches: self.switches(),
            rejected_switches: self.rejected_switches(),
            notifications: self.notifications(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.switches.store(0, Ordering::Relaxed);
        self.rejected_switches.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub hits: usize,
    pub misses: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    pub switches: usize,
    pub rejected_switches: usize,
    pub notifications: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_hit_and_miss() {
        let metrics = I18nMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        assert_eq!(metrics.hits(), 2);
        assert_eq!(metrics.misses(), 1);
    }

    #[test]
    fn test_record_switches() {
        let metrics = I18nMetrics::new();
        metrics.record_switch();
        metrics.record_rejected_switch();
        metrics.record_rejected_switch();
        assert_eq!(metrics.switches(), 1);
        assert_eq!(metrics.rejected_switches(), 2);
    }

    #[test]
    fn test_record_notifications_adds_count() {
        let metrics = I18nMetrics::new();
        metrics.record_notifications(3);
        metrics.record_notifications(0);
        metrics.record_notifications(2);
        assert_eq!(metrics.notifications(), 5);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = I18nMetrics::new().report();
        assert_eq!(report.lookups, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = I18nMetrics::new();
        for _ in 0..3 {
            metrics.record_hit();
        }
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert!((report.hit_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = I18nMetrics::new();
        metrics.record_hit();
        let json = serde_json::to_string(&metrics.report()).expect("Should serialize");
        assert!(json.contains("\"hits\":1"));
        assert!(json.contains("\"hit_rate\":100.0"));
    }

    #[test]
    fn test_reset() {
        let metrics = I18nMetrics::new();
        metrics.record_hit();
        metrics.record_switch();
        metrics.record_notifications(4);
        metrics.reset();
        assert_eq!(metrics.report().lookups, 0);
        assert_eq!(metrics.switches(), 0);
        assert_eq!(metrics.notifications(), 0);
    }
}
