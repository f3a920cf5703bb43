//! Continuous-time simulation engine for latsim lattices.
//!
//! Tracks every enabled local transition in a [`TransitionIndex`],
//! advances simulated time with exponential waiting times in a
//! [`StochasticDriver`], and accumulates time-averaged occupation and
//! event statistics in a [`StatisticsAccumulator`]. [`simulate()`]
//! composes a full warm-up + measurement run into a [`RunReport`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod active;
pub mod driver;
pub mod metrics;
pub mod run;
pub mod sink;
pub mod stats;
pub mod transitions;

pub use driver::{Phase, StochasticDriver};
pub use metrics::RunMetrics;
pub use run::{simulate, simulate_with_sink, RunError, RunReport};
pub use sink::{EventRecord, EventSink, NullSink, RecordingSink, TraceWriter};
pub use stats::{DensitySummary, StatisticsAccumulator};
pub use transitions::{ActiveTransition, TransitionIndex};
