//! latsim: kinetic Monte Carlo for Markov jump processes on 1D lattices.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all latsim sub-crates, plus the pieces of the `latsim` command-line
//! tool.
//!
//! # Quick start
//!
//! ```rust
//! use latsim::prelude::*;
//!
//! // Particles enter at site 1, hop right, and leave at site 8.
//! let mut hop = vec![vec![0.0; 4]; 4];
//! hop[1][2] = 1.0;
//! let config = SimConfig {
//!     length: 8,
//!     nstates: 2,
//!     transitions: vec![
//!         RuleSpec::new(1, 1, 1, vec![vec![0.0, 0.0], vec![0.5, 0.0]]).counted(),
//!         RuleSpec::new(2, 1, -2, hop),
//!         RuleSpec::new(1, -1, -1, vec![vec![0.0, 0.5], vec![0.0, 0.0]]),
//!     ],
//!     initial_state: Vec::new(),
//!     seed: 42,
//!     verbose: false,
//!     t_max: 100.0,
//!     t_skip: 10.0,
//! };
//! let report = simulate(&config).unwrap();
//! assert!((report.results.total_time - 90.0).abs() < 1e-9);
//! assert!(report.results.count(0, 1, 0) > 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`config`] | `latsim-core` | Configuration, validated rules, `ConfigError` |
//! | [`lattice`] | `latsim-lattice` | `LatticeState` and window encoding |
//! | [`engine`] | `latsim-engine` | Transition index, driver, statistics, runs |
//! | [`cli`] | this crate | Configuration loading and report output |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cli;

/// Configuration types and validated rules (`latsim-core`).
pub use latsim_core as config;

/// Lattice storage and window encoding (`latsim-lattice`).
pub use latsim_lattice as lattice;

/// Simulation engine (`latsim-engine`).
///
/// [`engine::TransitionIndex`] tracks enabled transitions,
/// [`engine::StochasticDriver`] advances time, and
/// [`engine::simulate()`] runs a configuration end to end.
pub use latsim_engine as engine;

/// Common imports for typical latsim usage.
///
/// ```rust
/// use latsim::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use latsim_core::{RateMatrix, RuleSpec, SimConfig, SiteRange, TransitionRule};

    // Errors
    pub use latsim_core::ConfigError;
    pub use latsim_engine::RunError;
    pub use latsim_lattice::LatticeError;

    // Lattice
    pub use latsim_lattice::LatticeState;

    // Engine
    pub use latsim_engine::{
        simulate, simulate_with_sink, ActiveTransition, DensitySummary, EventRecord, EventSink,
        NullSink, Phase, RecordingSink, RunMetrics, RunReport, StatisticsAccumulator,
        StochasticDriver, TraceWriter, TransitionIndex,
    };
}
