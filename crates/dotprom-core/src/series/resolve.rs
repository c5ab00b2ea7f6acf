//! Raw event name -> (canonical series name, label values).
//!
//! Pure functions over the mapping table and the kind tag; no internal state.

use crate::mapping::MappingTable;
use crate::series::Kind;

/// Outcome of resolving a raw event name.
#[derive(Debug)]
pub enum Resolution {
    /// No mapping entry matched; the event must not be emitted.
    Unmapped,
    /// A base matched but the remainder did not yield one value per declared
    /// label. The observation must be dropped, never emitted partially.
    Malformed,
    /// Fully resolved series.
    Series(ResolvedSeries),
}

/// A resolved series: canonical name plus positional label schema/values.
#[derive(Debug)]
pub struct ResolvedSeries {
    /// Canonical (escaped, namespaced, kind-tagged) series name.
    pub name: String,
    /// Declared label names, in schema order.
    pub labels: Vec<String>,
    /// Label values, positionally matched to `labels`.
    pub values: Vec<String>,
}

/// Resolves raw dot-delimited event names against a mapping table.
#[derive(Debug, Clone)]
pub struct Resolver {
    namespace: String,
    table: MappingTable,
}

impl Resolver {
    pub fn new(namespace: impl Into<String>, table: MappingTable) -> Self {
        Self { namespace: namespace.into(), table }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Canonical series name for `base` under `kind`.
    ///
    /// Escape transform (statsd_exporter convention): `_` -> `__`,
    /// `-` -> `__`, `.` -> `_`. Each substitution runs exactly once, in this
    /// order, so the final dot rule cannot re-trigger the underscore rule.
    pub fn canonical_name(&self, base: &str, kind: Kind) -> String {
        let escaped = base.replace('_', "__").replace('-', "__").replace('.', "_");
        format!("{}_{}_{}", self.namespace, kind.as_str(), escaped)
    }

    /// Resolve `raw` into a series under `kind`.
    ///
    /// The remainder after the matched base is split on `.` into at most one
    /// part per declared label, so the final label absorbs embedded dots
    /// (domain-like values such as `test.com`). A raw name exactly equal to
    /// a mapped base has nothing to strip; the whole name becomes the split
    /// input and is emitted, not dropped.
    pub fn resolve(&self, raw: &str, kind: Kind) -> Resolution {
        let base = self.table.basename(raw);
        let Some(schema) = self.table.labels_for(base) else {
            return Resolution::Unmapped;
        };

        let rest = raw
            .strip_prefix(base)
            .and_then(|r| r.strip_prefix('.'))
            .unwrap_or(raw);

        let values: Vec<String> = rest.splitn(schema.len(), '.').map(str::to_string).collect();
        if values.len() != schema.len() {
            return Resolution::Malformed;
        }

        Resolution::Series(ResolvedSeries {
            name: self.canonical_name(base, kind),
            labels: schema.to_vec(),
            values,
        })
    }
}
