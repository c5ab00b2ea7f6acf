//! Series registry: the lazily-created instrument cache.
//!
//! Owns the one-instrument-per-(canonical-name, kind) invariant. Families are
//! created on first observation and live for the process lifetime; a racing
//! duplicate creation loses inside the `DashMap` entry and is discarded.
//! Observation calls never return errors to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::mapping::MappingTable;
use crate::series::{CounterFamily, Kind, Resolution, Resolver, SummaryFamily};

/// Process-wide metric sink: resolves raw event names and records
/// observations on lazily-created counter/summary families.
///
/// Construct one per process (through the exporter's composition root) and
/// share it by reference; there is no ambient global.
pub struct SeriesRegistry {
    resolver: Resolver,
    counters: DashMap<String, Arc<CounterFamily>>,
    summaries: DashMap<String, Arc<SummaryFamily>>,
    malformed_total: AtomicU64,
}

impl SeriesRegistry {
    pub fn new(namespace: impl Into<String>, table: MappingTable) -> Self {
        Self {
            resolver: Resolver::new(namespace, table),
            counters: DashMap::new(),
            summaries: DashMap::new(),
            malformed_total: AtomicU64::new(0),
        }
    }

    /// Registry over the stock mapping table.
    pub fn with_stock_mapping(namespace: impl Into<String>) -> Self {
        Self::new(namespace, MappingTable::stock())
    }

    /// Record one occurrence of `raw`.
    pub fn record_count(&self, raw: &str) {
        self.record_count_by(raw, 1);
    }

    /// Record `delta` occurrences of `raw`.
    ///
    /// Unmapped names are silently discarded (do-not-emit policy); malformed
    /// names are dropped and counted on the internal diagnostic counter.
    pub fn record_count_by(&self, raw: &str, delta: u64) {
        match self.resolver.resolve(raw, Kind::Counter) {
            Resolution::Unmapped => {}
            Resolution::Malformed => self.note_malformed(raw),
            Resolution::Series(s) => {
                // The entry guard is held for the insert only; the increment
                // runs on a cloned Arc outside the shard lock.
                let family = self
                    .counters
                    .entry(s.name.clone())
                    .or_insert_with(|| {
                        tracing::warn!(series = %s.name, "create counter metric");
                        Arc::new(CounterFamily::new(s.labels))
                    })
                    .clone();
                family.inc_by(s.values, delta);
            }
        }
    }

    /// Record a timing observation for `raw` (unit-agnostic value).
    pub fn record_timing(&self, raw: &str, value: f64) {
        match self.resolver.resolve(raw, Kind::Timer) {
            Resolution::Unmapped => {}
            Resolution::Malformed => self.note_malformed(raw),
            Resolution::Series(s) => {
                let family = self
                    .summaries
                    .entry(s.name.clone())
                    .or_insert_with(|| {
                        tracing::warn!(series = %s.name, "create timing metric");
                        Arc::new(SummaryFamily::new(s.labels))
                    })
                    .clone();
                family.observe(s.values, value);
            }
        }
    }

    fn note_malformed(&self, raw: &str) {
        self.malformed_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(name = %raw, "dropping malformed metric name");
    }

    /// Counter family for a canonical name, if created.
    pub fn counter_family(&self, name: &str) -> Option<Arc<CounterFamily>> {
        self.counters.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Summary family for a canonical name, if created.
    pub fn summary_family(&self, name: &str) -> Option<Arc<SummaryFamily>> {
        self.summaries.get(name).map(|r| Arc::clone(r.value()))
    }

    pub fn counter_family_count(&self) -> usize {
        self.counters.len()
    }

    pub fn summary_family_count(&self) -> usize {
        self.summaries.len()
    }

    /// Observations dropped because their name was malformed.
    pub fn malformed_count(&self) -> u64 {
        self.malformed_total.load(Ordering::Relaxed)
    }

    /// Render every family plus the malformed-name diagnostic in Prometheus
    /// text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for r in self.counters.iter() {
            r.value().render(r.key(), &mut out);
        }
        for r in self.summaries.iter() {
            r.value().render(r.key(), &mut out);
        }
        let diag = format!("{}_malformed_names_total", self.resolver.namespace());
        out.push_str(&format!("# TYPE {diag} counter\n{diag} {}\n", self.malformed_count()));
        out
    }
}
