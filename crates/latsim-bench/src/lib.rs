//! Benchmark profiles and utilities for the latsim engine.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 1000-site open exclusion process in the
//!   maximal-current phase
//! - [`stress_profile`]: the same process on 100K sites
//! - [`exchange_profile`]: three-species nearest-neighbour exchange
//! - [`init_sites`]: deterministic initial lattice via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use latsim_core::{RuleSpec, SimConfig};
use latsim_engine::{RunError, TransitionIndex};
use latsim_lattice::LatticeState;

/// Open exclusion process over `length` sites: injection at the left,
/// hopping with `p = 1`, `q = 0.1`, extraction at the right.
fn open_exclusion(length: usize, seed: u64, t_max: f64) -> SimConfig {
    let mut hop = vec![vec![0.0; 4]; 4];
    hop[1][2] = 1.0;
    hop[2][1] = 0.1;
    SimConfig {
        length,
        nstates: 2,
        transitions: vec![
            RuleSpec::new(1, 1, 1, vec![vec![0.0, 0.0], vec![0.9, 0.0]]).counted(),
            RuleSpec::new(2, 1, -2, hop),
            RuleSpec::new(1, -1, -1, vec![vec![0.0, 0.9], vec![0.0, 0.0]]),
        ],
        initial_state: init_sites(length, 2, seed),
        seed,
        verbose: false,
        t_max,
        t_skip: 0.0,
    }
}

/// 1000-site reference profile.
pub fn reference_profile(seed: u64) -> SimConfig {
    open_exclusion(1000, seed, 10.0)
}

/// 100K-site stress profile.
pub fn stress_profile(seed: u64) -> SimConfig {
    open_exclusion(100_000, seed, 0.1)
}

/// Three species on 1000 sites; any two unequal neighbours swap at rate 1.
pub fn exchange_profile(seed: u64) -> SimConfig {
    let n = 3;
    let mut swap = vec![vec![0.0; n * n]; n * n];
    for a in 0..n {
        for b in 0..n {
            if a != b {
                swap[b * n + a][a * n + b] = 1.0;
            }
        }
    }
    SimConfig {
        length: 1000,
        nstates: n,
        transitions: vec![RuleSpec::new(2, 1, -2, swap).counted()],
        initial_state: init_sites(1000, n, seed),
        seed,
        verbose: false,
        t_max: 10.0,
        t_skip: 0.0,
    }
}

/// Deterministic site values in `[0, nstates)` derived from `seed`.
pub fn init_sites(length: usize, nstates: usize, seed: u64) -> Vec<usize> {
    (0..length as u64)
        .map(|i| {
            let h = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(i.wrapping_mul(1442695040888963407));
            ((h >> 33) % nstates as u64) as usize
        })
        .collect()
}

/// Validate a profile and build its transition index.
pub fn build_index(config: &SimConfig) -> Result<TransitionIndex, RunError> {
    let rules = config.resolve_rules()?;
    let lattice = LatticeState::new(config.length, config.nstates, &config.initial_state)?;
    Ok(TransitionIndex::new(lattice, rules)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        for config in [reference_profile(42), stress_profile(42), exchange_profile(42)] {
            config.validate().unwrap();
        }
    }

    #[test]
    fn init_sites_deterministic_and_in_range() {
        let a = init_sites(500, 3, 42);
        assert_eq!(a, init_sites(500, 3, 42));
        assert!(a.iter().all(|&v| v < 3));
        // Every value shows up.
        for s in 0..3 {
            assert!(a.contains(&s));
        }
    }

    #[test]
    fn exchange_conserves_species() {
        let config = exchange_profile(7);
        let mut index = build_index(&config).unwrap();
        let before = index.lattice().state_counts();
        for k in 0..1000 {
            let u = (k as f64 * 0.754_877_666).fract();
            index.sample_and_apply(u * index.total_rate()).unwrap();
        }
        assert_eq!(index.lattice().state_counts(), before);
    }
}
