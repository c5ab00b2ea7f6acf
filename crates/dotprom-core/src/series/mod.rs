//! Series naming and instruments.

pub mod instrument;
pub mod resolve;

pub use instrument::{CounterFamily, SummaryFamily};
pub use resolve::{Resolution, ResolvedSeries, Resolver};

/// Instrument kind. Fixed per call site, embedded into the canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Monotonic counter.
    Counter,
    /// Timing distribution, backed by a summary instrument.
    Timer,
}

impl Kind {
    /// Tag used inside canonical series names.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Counter => "counter",
            Kind::Timer => "timer",
        }
    }
}
