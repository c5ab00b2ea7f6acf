//! Base-name mapping table.
//!
//! Maps a canonical base name (e.g. `original_image.fetch`) to the ordered
//! list of label names its raw event names carry as trailing dot segments.
//! Fixed at construction; never mutated at runtime.

use std::collections::BTreeMap;

use crate::error::{DotpromError, Result};

/// Static `base name -> ordered label names` table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl MappingTable {
    /// Build a table from `(base, labels)` entries.
    ///
    /// Every base must be non-empty and declare at least one non-empty label
    /// name; an unmapped base has no business being in the table at all.
    pub fn new<I, S, L>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: IntoIterator<Item = S>,
    {
        let mut table = BTreeMap::new();
        for (base, labels) in entries {
            let base = base.into();
            if base.is_empty() {
                return Err(DotpromError::BadConfig("mapping base must not be empty".into()));
            }
            let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
            if labels.is_empty() || labels.iter().any(String::is_empty) {
                return Err(DotpromError::BadConfig(format!(
                    "mapping for {base} must declare at least one non-empty label"
                )));
            }
            table.insert(base, labels);
        }
        Ok(Self { entries: table })
    }

    /// The stock table used by the reference deployment (thumbor-style
    /// response/original_image events).
    pub fn stock() -> Self {
        let stock: [(&str, &[&str]); 6] = [
            ("response.status", &["statuscode"]),
            ("response.format", &["extension"]),
            ("response.bytes", &["extension"]),
            ("original_image.status", &["statuscode"]),
            ("original_image.fetch", &["statuscode", "networklocation"]),
            ("response.time", &["statuscode_extension"]),
        ];
        let mut entries = BTreeMap::new();
        for (base, labels) in stock {
            entries.insert(base.to_string(), labels.iter().map(|l| l.to_string()).collect());
        }
        Self { entries }
    }

    /// Resolve the base name of `raw`.
    ///
    /// A key matches when `raw` starts with `key + "."`. When several keys
    /// match, the longest prefix wins (deterministic, independent of table
    /// iteration order). If nothing matches, `raw` itself is returned.
    pub fn basename<'a>(&'a self, raw: &'a str) -> &'a str {
        let mut best: Option<&str> = None;
        for key in self.entries.keys() {
            if raw.len() > key.len()
                && raw.as_bytes()[key.len()] == b'.'
                && raw.starts_with(key.as_str())
                && best.map_or(true, |b| key.len() > b.len())
            {
                best = Some(key);
            }
        }
        best.unwrap_or(raw)
    }

    /// Declared label schema for `base`, or `None` if the base is unmapped.
    pub fn labels_for(&self, base: &str) -> Option<&[String]> {
        self.entries.get(base).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::stock()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn longest_prefix_wins() {
        let table = MappingTable::new([
            ("response", vec!["rest"]),
            ("response.status", vec!["statuscode"]),
        ])
        .unwrap();
        assert_eq!(table.basename("response.status.200"), "response.status");
        assert_eq!(table.basename("response.other"), "response");
    }

    #[test]
    fn no_match_passes_through() {
        let table = MappingTable::stock();
        assert_eq!(table.basename("storage.hit"), "storage.hit");
        // A bare key with no trailing segment is not a match either.
        assert_eq!(table.basename("response.status"), "response.status");
    }

    #[test]
    fn rejects_empty_labels() {
        assert!(MappingTable::new([("x", Vec::<&str>::new())]).is_err());
    }
}
