//! Configuration fixtures for latsim development.
//!
//! - [`fixtures`] holds the 15-site regression lattice and its reference
//!   active-transition sets.
//! - [`asep`] builds open-boundary exclusion processes and carries the
//!   stationary reference values for their three phases.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod asep;
pub mod fixtures;

pub use asep::{AsepPhase, OpenAsep};
pub use fixtures::{asep_fixture_config, TransitionTuple};

/// `rates[target][source]` for a single-site binary rule:
/// `up` rewrites 0 into 1, `down` rewrites 1 into 0.
pub fn flip_rates(up: f64, down: f64) -> Vec<Vec<f64>> {
    vec![vec![0.0, down], vec![up, 0.0]]
}

/// `rates[target][source]` for a two-site binary hopping rule.
///
/// `right` moves a particle from `10` (code 2) to `01` (code 1), `left`
/// the reverse.
pub fn hop_rates(right: f64, left: f64) -> Vec<Vec<f64>> {
    let mut rates = vec![vec![0.0; 4]; 4];
    rates[1][2] = right;
    rates[2][1] = left;
    rates
}
