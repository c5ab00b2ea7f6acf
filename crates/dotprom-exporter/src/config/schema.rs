use std::collections::BTreeMap;

use serde::Deserialize;

use dotprom_core::error::{DotpromError, Result};
use dotprom_core::MappingTable;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    /// `base name -> ordered label names`. Absent means the stock table.
    #[serde(default)]
    pub mapping: Option<BTreeMap<String, Vec<String>>>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DotpromError::UnsupportedVersion);
        }
        self.exporter.validate()?;

        if let Some(mapping) = &self.mapping {
            if mapping.is_empty() {
                return Err(DotpromError::BadConfig(
                    "mapping must not be empty (omit it to use the stock table)".into(),
                ));
            }
        }
        // Entry-level checks (non-empty bases/labels) run in mapping_table().
        self.mapping_table().map(|_| ())
    }

    /// Materialize the mapping table (stock table when none is configured).
    pub fn mapping_table(&self) -> Result<MappingTable> {
        match &self.mapping {
            Some(mapping) => {
                MappingTable::new(mapping.iter().map(|(base, labels)| (base.clone(), labels.clone())))
            }
            None => Ok(MappingTable::stock()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    /// TCP port the metrics HTTP endpoint binds to.
    #[serde(default = "default_scrape_port")]
    pub scrape_port: u16,

    /// Prefix for every canonical series name.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self { scrape_port: default_scrape_port(), namespace: default_namespace() }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if self.scrape_port == 0 {
            return Err(DotpromError::BadConfig("exporter.scrape_port must be non-zero".into()));
        }
        if !valid_namespace(&self.namespace) {
            return Err(DotpromError::BadConfig(
                "exporter.namespace must match [a-zA-Z_][a-zA-Z0-9_]*".into(),
            ));
        }
        Ok(())
    }
}

fn valid_namespace(ns: &str) -> bool {
    let mut chars = ns.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_scrape_port() -> u16 {
    8000
}
fn default_namespace() -> String {
    "dotprom".into()
}
