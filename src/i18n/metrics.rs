//! Translation metrics and observability module.
//!
//! Counts attempts, successes and failures per strategy, plus how fields
//! and lines ended up (translated, catalog hit, fallback, skipped). One
//! instance is owned by each pipeline and shared by reference with its
//! concurrent field translations.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct StrategyCounters {
    attempts: AtomicUsize,
    successes: AtomicUsize,
    failures: AtomicUsize,
}

/// Counters for one pipeline.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    strategies: Mutex<BTreeMap<&'static str, StrategyCounters>>,
    catalog_hits: AtomicUsize,
    fallbacks: AtomicUsize,
    skipped: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_strategy(&self, name: &'static str, f: impl FnOnce(&StrategyCounters)) {
        // A poisoned lock only means another thread panicked mid-increment;
        // the counters themselves are still usable.
        let mut guard = self
            .strategies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(guard.entry(name).or_default());
    }

    /// Record that `strategy` was asked to translate a text.
    pub fn record_attempt(&self, strategy: &'static str) {
        self.with_strategy(strategy, |c| {
            c.attempts.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// Record a validated translation from `strategy`.
    pub fn record_success(&self, strategy: &'static str) {
        self.with_strategy(strategy, |c| {
            c.successes.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// Record a failed or rejected attempt by `strategy`.
    pub fn record_failure(&self, strategy: &'static str) {
        self.with_strategy(strategy, |c| {
            c.failures.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// Record a category resolved from the enumeration without any strategy.
    pub fn record_catalog_hit(&self) {
        self.catalog_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a text that fell back to its source after every strategy failed.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a blank text that was never sent to any strategy.
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let guard = self
            .strategies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let strategies = guard
            .iter()
            .map(|(name, c)| {
                let attempts = c.attempts.load(Ordering::Relaxed);
                let successes = c.successes.load(Ordering::Relaxed);
                let success_rate = if attempts > 0 {
                    (successes as f64 / attempts as f64) * 100.0
                } else {
                    0.0
                };
                StrategyReport {
                    name: (*name).to_string(),
                    attempts,
                    successes,
                    failures: c.failures.load(Ordering::Relaxed),
                    success_rate,
                }
            })
            .collect();

        MetricsReport {
            strategies,
            catalog_hits: self.catalog_hits.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Per-strategy section of a metrics report.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub name: String,
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: f64,
}

/// Snapshot of translation metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub strategies: Vec<StrategyReport>,
    pub catalog_hits: usize,
    pub fallbacks: usize,
    pub skipped: usize,
}

impl MetricsReport {
    /// Report section for one strategy, if it was ever attempted.
    pub fn strategy(&self, name: &str) -> Option<&StrategyReport> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Total attempts across all strategies.
    pub fn total_attempts(&self) -> usize {
        self.strategies.iter().map(|s| s.attempts).sum()
    }
}
