//! Shared application state: the composition root.
//!
//! Builds the one `SeriesRegistry` for the process from config and hands it
//! to every call site through cheap clones of this handle. Host applications
//! record observations through this type; the router reads from it.

use std::sync::Arc;

use dotprom_core::error::Result;
use dotprom_core::SeriesRegistry;

use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: SeriesRegistry,
}

impl AppState {
    /// Build application state from validated config.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let table = cfg.mapping_table()?;
        let registry = SeriesRegistry::new(cfg.exporter.namespace.clone(), table);
        Ok(Self { inner: Arc::new(AppStateInner { cfg, registry }) })
    }

    /// Build application state and open the scrape endpoint.
    ///
    /// The listener starts on the first construction in the process; later
    /// constructions reuse the already-running endpoint. The registry lives
    /// on the returned handle, so construct once per process and clone the
    /// handle to call sites. Must be called from within a tokio runtime.
    pub fn bootstrap(cfg: ExporterConfig) -> Result<Self> {
        let state = Self::new(cfg)?;
        if !crate::scrape::spawn_scrape_server(state.clone()) {
            tracing::debug!("scrape endpoint already running; reusing it");
        }
        Ok(state)
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.inner.registry
    }

    /// Record one occurrence of `name` (fail-safe, never errors).
    pub fn record_count(&self, name: &str) {
        self.inner.registry.record_count(name);
    }

    /// Record `delta` occurrences of `name`.
    pub fn record_count_by(&self, name: &str, delta: u64) {
        self.inner.registry.record_count_by(name, delta);
    }

    /// Record a timing observation for `name`.
    pub fn record_timing(&self, name: &str, value: f64) {
        self.inner.registry.record_timing(name, value);
    }
}
