//! dotprom core: name resolution, instruments, and the series registry.
//!
//! This crate turns free-form dot-delimited event names (e.g.
//! `response.status.200`) into canonical Prometheus series names plus label
//! sets, and owns the lazily-created counter/summary instruments behind them.
//! It intentionally carries no transport or runtime dependencies so it can be
//! embedded in any host; the scrape endpoint lives in `dotprom-exporter`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Observation calls never fail the caller: unmapped or malformed event
//! names are dropped, not propagated.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod mapping;
pub mod registry;
pub mod series;

/// Shared result type.
pub use error::{DotpromError, Result};
pub use mapping::MappingTable;
pub use registry::SeriesRegistry;
pub use series::{Kind, Resolution, Resolver};
