//! The 15-site regression lattice.
//!
//! A binary lattice with injection at site 1 (rule 0, counted), hopping
//! on sites 1..14 (rule 1), and extraction at site 15 (rule 2). The
//! reference sets below are the sorted active transitions after each
//! forced event, as `(position, window, rule, target, source, rate)`.

use latsim_core::{RuleSpec, SimConfig};

use crate::{flip_rates, hop_rates};

/// `(position, window, rule, target, source, rate)`, the sort order of
/// the active set.
pub type TransitionTuple = (usize, usize, usize, usize, usize, f64);

/// Initial sites of the regression lattice.
pub const FIXTURE_SITES: [usize; 15] = [0, 1, 1, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 1];

/// Hop `10 -> 01` at position 8.
pub const FORCED_HOP: &str = "(rate=1.0, target=1, position=8, window=2, rule=1, source=2)";

/// Injection at the left boundary.
pub const FORCED_INJECT: &str = "(rate=0.29, target=1, position=0, window=1, rule=0, source=0)";

/// Extraction at the right boundary.
pub const FORCED_EXTRACT: &str = "(rate=0.22, target=0, position=14, window=1, rule=2, source=1)";

/// Sum of the initial active rates.
pub const FIXTURE_TOTAL_RATE: f64 = 5.01;

pub fn asep_fixture_config() -> SimConfig {
    SimConfig {
        length: 15,
        nstates: 2,
        transitions: vec![
            RuleSpec::new(1, 1, 1, flip_rates(0.29, 0.0)).counted(),
            RuleSpec::new(2, 1, 14, hop_rates(1.0, 0.1)),
            RuleSpec::new(1, -1, -1, flip_rates(0.0, 0.22)),
        ],
        initial_state: FIXTURE_SITES.to_vec(),
        seed: 1,
        verbose: false,
        t_max: 10.0,
        t_skip: 0.0,
    }
}

pub fn fixture_initial_set() -> Vec<TransitionTuple> {
    vec![
        (0, 1, 0, 1, 0, 0.29),
        (0, 2, 1, 2, 1, 0.1),
        (2, 2, 1, 1, 2, 1.0),
        (3, 2, 1, 2, 1, 0.1),
        (4, 2, 1, 1, 2, 1.0),
        (6, 2, 1, 2, 1, 0.1),
        (8, 2, 1, 1, 2, 1.0),
        (9, 2, 1, 2, 1, 0.1),
        (10, 2, 1, 1, 2, 1.0),
        (12, 2, 1, 2, 1, 0.1),
        (14, 1, 2, 0, 1, 0.22),
    ]
}

/// After [`FORCED_HOP`].
pub fn fixture_after_hop() -> Vec<TransitionTuple> {
    vec![
        (0, 1, 0, 1, 0, 0.29),
        (0, 2, 1, 2, 1, 0.1),
        (2, 2, 1, 1, 2, 1.0),
        (3, 2, 1, 2, 1, 0.1),
        (4, 2, 1, 1, 2, 1.0),
        (6, 2, 1, 2, 1, 0.1),
        (7, 2, 1, 1, 2, 1.0),
        (8, 2, 1, 2, 1, 0.1),
        (10, 2, 1, 1, 2, 1.0),
        (12, 2, 1, 2, 1, 0.1),
        (14, 1, 2, 0, 1, 0.22),
    ]
}

/// After [`FORCED_INJECT`] on the initial lattice.
pub fn fixture_after_inject() -> Vec<TransitionTuple> {
    fixture_initial_set()
        .into_iter()
        .filter(|&(position, ..)| position != 0)
        .collect()
}

/// After [`FORCED_EXTRACT`] on the initial lattice.
pub fn fixture_after_extract() -> Vec<TransitionTuple> {
    let mut set: Vec<TransitionTuple> = fixture_initial_set()
        .into_iter()
        .filter(|&(position, ..)| position != 14)
        .collect();
    set.push((13, 2, 1, 1, 2, 1.0));
    set
}
