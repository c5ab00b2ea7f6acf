//! dotprom exporter library entry.
//!
//! This crate wires the core series registry into a runnable scrape surface:
//! strict YAML config, shared application state, the axum router serving
//! `/metrics`, and the start-once scrape-server bootstrap. It is consumed by
//! the binary (`main.rs`), by host applications embedding the exporter, and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod scrape;
