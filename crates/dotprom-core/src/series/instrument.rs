//! Counter and summary instrument families.
//!
//! A family owns every labeled child series for one canonical name. Children
//! are keyed by their label-value vector in a `DashMap`, so concurrent
//! observations for a previously-unseen label combination converge on a
//! single cell without a registry-wide lock.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Escape a label value for the text exposition format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn format_labels(names: &[String], values: &[String]) -> String {
    names
        .iter()
        .zip(values.iter())
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Monotonic counter family with a label schema fixed at creation.
pub struct CounterFamily {
    labels: Vec<String>,
    series: DashMap<Vec<String>, AtomicU64>,
}

impl CounterFamily {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels, series: DashMap::new() }
    }

    /// Declared label names, in schema order.
    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    /// Increment the child identified by `values` by `delta`.
    ///
    /// `values` must match the schema length exactly; mismatched calls are
    /// dropped (the resolver already guarantees equality on the normal path).
    pub fn inc_by(&self, values: Vec<String>, delta: u64) {
        if values.len() != self.labels.len() {
            return;
        }
        let cell = self.series.entry(values).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(delta, Ordering::Relaxed);
    }

    /// Current value for a label combination, if observed.
    pub fn value(&self, values: &[&str]) -> Option<u64> {
        let key: Vec<String> = values.iter().map(|v| (*v).to_string()).collect();
        self.series.get(&key).map(|c| c.load(Ordering::Relaxed))
    }

    /// Number of distinct label combinations.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.series.iter() {
            let label_str = format_labels(&self.labels, r.key());
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{label_str}}} {val}");
        }
    }
}

struct SummaryCell {
    count: AtomicU64,
    sum_bits: AtomicU64,
}

impl SummaryCell {
    fn new() -> Self {
        Self { count: AtomicU64::new(0), sum_bits: AtomicU64::new(0f64.to_bits()) }
    }

    fn observe(&self, v: f64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        // CAS loop: the sum is an f64 stored as raw bits.
        let mut cur = self.sum_bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + v).to_bits();
            match self.sum_bits.compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    fn snapshot(&self) -> (u64, f64) {
        (self.count.load(Ordering::Relaxed), f64::from_bits(self.sum_bits.load(Ordering::Relaxed)))
    }
}

/// Summary family aggregating observations as count + sum per child.
pub struct SummaryFamily {
    labels: Vec<String>,
    series: DashMap<Vec<String>, SummaryCell>,
}

impl SummaryFamily {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels, series: DashMap::new() }
    }

    /// Declared label names, in schema order.
    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    /// Record one observation on the child identified by `values`.
    pub fn observe(&self, values: Vec<String>, v: f64) {
        if values.len() != self.labels.len() {
            return;
        }
        let cell = self.series.entry(values).or_insert_with(SummaryCell::new);
        cell.observe(v);
    }

    /// `(count, sum)` for a label combination, if observed.
    pub fn snapshot(&self, values: &[&str]) -> Option<(u64, f64)> {
        let key: Vec<String> = values.iter().map(|v| (*v).to_string()).collect();
        self.series.get(&key).map(|c| c.snapshot())
    }

    /// Number of distinct label combinations.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Render in Prometheus text exposition format (`_count` + `_sum`).
    pub fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} summary");
        for r in self.series.iter() {
            let label_str = format_labels(&self.labels, r.key());
            let (count, sum) = r.value().snapshot();
            let _ = writeln!(out, "{name}_count{{{label_str}}} {count}");
            let _ = writeln!(out, "{name}_sum{{{label_str}}} {sum}");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn counter_accumulates_per_label_set() {
        let fam = CounterFamily::new(vec!["statuscode".into()]);
        assert_eq!(fam.label_names(), ["statuscode"]);
        fam.inc_by(vec!["200".into()], 1);
        fam.inc_by(vec!["200".into()], 2);
        fam.inc_by(vec!["404".into()], 1);
        assert_eq!(fam.value(&["200"]), Some(3));
        assert_eq!(fam.value(&["404"]), Some(1));
        assert_eq!(fam.series_count(), 2);
    }

    #[test]
    fn counter_drops_schema_mismatch() {
        let fam = CounterFamily::new(vec!["statuscode".into(), "networklocation".into()]);
        fam.inc_by(vec!["200".into()], 1);
        assert_eq!(fam.series_count(), 0);
    }

    #[test]
    fn summary_tracks_count_and_sum() {
        let fam = SummaryFamily::new(vec!["extension".into()]);
        assert_eq!(fam.label_names(), ["extension"]);
        fam.observe(vec!["jpg".into()], 12.5);
        fam.observe(vec!["jpg".into()], 12.5);
        let (count, sum) = fam.snapshot(&["jpg"]).unwrap();
        assert_eq!(count, 2);
        assert!((sum - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn render_escapes_label_values() {
        let fam = CounterFamily::new(vec!["networklocation".into()]);
        fam.inc_by(vec!["bad\"host".into()], 1);
        let mut out = String::new();
        fam.render("ns_counter_x", &mut out);
        assert!(out.contains("ns_counter_x{networklocation=\"bad\\\"host\"} 1"));
    }
}
