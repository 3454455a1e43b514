//! Cache Metrics Module
//!
//! Hit/miss counters for the product cache, broken down by key pattern.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::keys::key_pattern;

#[derive(Debug, Default)]
struct Counters {
    hits: u64,
    misses: u64,
    per_pattern: BTreeMap<String, u64>,
}

impl Counters {
    fn bump_pattern(&mut self, key: &str) {
        *self
            .per_pattern
            .entry(key_pattern(key).to_string())
            .or_insert(0) += 1;
    }
}

// == Metrics Snapshot ==
/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Reads answered from the cache
    pub hit_count: u64,
    /// Reads that fell through to the product store
    pub miss_count: u64,
    /// hits / (hits + misses), 0.0 before any read
    pub hit_ratio: f64,
    /// Hits plus misses per key pattern, e.g. `product:by-id`
    pub per_pattern_counts: BTreeMap<String, u64>,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

// == Metrics Recorder ==
/// Thread-safe hit/miss counters.
///
/// All counters sit behind one mutex so a snapshot never mixes values from
/// different moments.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    counters: Mutex<Counters>,
}

impl MetricsRecorder {
    // == Constructor ==
    /// Creates a recorder with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Counts a read answered from the cache under `key`.
    pub fn record_hit(&self, key: &str) {
        let mut counters = self.lock();
        counters.hits += 1;
        counters.bump_pattern(key);
    }

    // == Record Miss ==
    /// Counts a read for `key` that had to go to the product store.
    pub fn record_miss(&self, key: &str) {
        let mut counters = self.lock();
        counters.misses += 1;
        counters.bump_pattern(key);
    }

    // == Snapshot ==
    /// Copies every counter under a single lock acquisition.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self.lock();
        let total = counters.hits + counters.misses;
        let hit_ratio = if total == 0 {
            0.0
        } else {
            counters.hits as f64 / total as f64
        };

        MetricsSnapshot {
            hit_count: counters.hits,
            miss_count: counters.misses,
            hit_ratio,
            per_pattern_counts: counters.per_pattern.clone(),
            timestamp: Utc::now(),
        }
    }

    // A panic while holding the lock cannot leave counters half-updated.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recorder_new() {
        let snapshot = MetricsRecorder::new().snapshot();
        assert_eq!(snapshot.hit_count, 0);
        assert_eq!(snapshot.miss_count, 0);
        assert!(snapshot.per_pattern_counts.is_empty());
    }

    #[test]
    fn test_hit_ratio_no_requests() {
        assert_eq!(MetricsRecorder::new().snapshot().hit_ratio, 0.0);
    }

    #[test]
    fn test_hit_ratio_all_hits() {
        let metrics = MetricsRecorder::new();
        metrics.record_hit("product:by-id:1");
        metrics.record_hit("product:by-id:2");
        assert_eq!(metrics.snapshot().hit_ratio, 1.0);
    }

    #[test]
    fn test_hit_ratio_all_misses() {
        let metrics = MetricsRecorder::new();
        metrics.record_miss("product:by-id:1");
        metrics.record_miss("product:by-id:1");
        assert_eq!(metrics.snapshot().hit_ratio, 0.0);
    }

    #[test]
    fn test_hit_miss_hit_scenario() {
        let metrics = MetricsRecorder::new();
        metrics.record_hit("product:by-id:1");
        metrics.record_miss("product:by-id:2");
        metrics.record_hit("product:by-id:1");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.hit_count, 2);
        assert_eq!(snapshot.miss_count, 1);
        assert!((snapshot.hit_ratio - 0.6667).abs() < 1e-4);
        assert_eq!(snapshot.per_pattern_counts["product:by-id"], 3);
    }

    #[test]
    fn test_per_pattern_breakdown() {
        let metrics = MetricsRecorder::new();
        metrics.record_hit("product:by-id:9");
        metrics.record_miss("product:paged:deadbeef");
        metrics.record_miss("product:paged:cafebabe");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.per_pattern_counts.len(), 2);
        assert_eq!(snapshot.per_pattern_counts["product:by-id"], 1);
        assert_eq!(snapshot.per_pattern_counts["product:paged"], 2);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let metrics = MetricsRecorder::new();
        metrics.record_hit("product:by-id:1");

        let json = serde_json::to_string(&metrics.snapshot()).unwrap();
        assert!(json.contains("\"hitCount\":1"));
        assert!(json.contains("\"missCount\":0"));
        assert!(json.contains("\"hitRatio\":1.0"));
        assert!(json.contains("\"perPatternCounts\":{\"product:by-id\":1}"));
        assert!(json.contains("\"timestamp\""));
    }

    #[test]
    fn test_concurrent_recording_loses_nothing() {
        let metrics = Arc::new(MetricsRecorder::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        if i % 2 == 0 {
                            metrics.record_hit("product:by-id:1");
                        } else {
                            metrics.record_miss("product:paged:abc");
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.hit_count, 2000);
        assert_eq!(snapshot.miss_count, 2000);
        assert_eq!(
            snapshot.per_pattern_counts.values().sum::<u64>(),
            snapshot.hit_count + snapshot.miss_count
        );
    }
}
