//! Top-level facade crate for dotprom.
//!
//! Re-exports the core types and the exporter library so hosts can depend on
//! a single crate.

pub mod core {
    pub use dotprom_core::*;
}

pub mod exporter {
    pub use dotprom_exporter::*;
}
