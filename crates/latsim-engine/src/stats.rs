//! Time-averaged occupation statistics and event counts.

use std::ops::Range;

use latsim_core::TransitionRule;
use latsim_lattice::LatticeState;
use serde::{Deserialize, Serialize};

/// Passive observer fed time intervals and applied events.
///
/// Every bucket accumulates simulated time; [`summarize()`](Self::summarize)
/// divides by the total to produce densities.
#[derive(Clone, Debug)]
pub struct StatisticsAccumulator {
    length: usize,
    nstates: usize,
    total_time: f64,
    // [state * length + site]
    occupied: Vec<f64>,
    // [state * (length + 1) + number of sites in that state]
    species: Vec<f64>,
    // Per rule, [target * size + source]; `None` for uncounted rules.
    counts: Vec<Option<(usize, Vec<u64>)>>,
    scratch: Vec<usize>,
}

impl StatisticsAccumulator {
    /// Empty accumulator for a `length`-site lattice over `nstates` states.
    pub fn new(length: usize, nstates: usize, rules: &[TransitionRule]) -> Self {
        let counts = rules
            .iter()
            .map(|rule| {
                rule.counted.then(|| {
                    let size = rule.code_count();
                    (size, vec![0; size * size])
                })
            })
            .collect();
        Self {
            length,
            nstates,
            total_time: 0.0,
            occupied: vec![0.0; nstates * length],
            species: vec![0.0; nstates * (length + 1)],
            counts,
            scratch: vec![0; nstates],
        }
    }

    /// Credit `dt` of simulated time to the current configuration.
    pub fn update(&mut self, lattice: &LatticeState, dt: f64) {
        debug_assert_eq!(lattice.len(), self.length);
        self.scratch.fill(0);
        for (site, &state) in lattice.sites().iter().enumerate() {
            self.occupied[state * self.length + site] += dt;
            self.scratch[state] += 1;
        }
        for (state, &n) in self.scratch.iter().enumerate() {
            self.species[state * (self.length + 1) + n] += dt;
        }
        self.total_time += dt;
    }

    /// Count one applied `source -> target` event of `rule`.
    ///
    /// Ignored for uncounted rules.
    pub fn count_event(&mut self, rule: usize, target: usize, source: usize) {
        if let Some(Some((size, matrix))) = self.counts.get_mut(rule) {
            matrix[target * *size + source] += 1;
        }
    }

    /// Simulated time accumulated so far.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Normalize every bucket by the total time.
    ///
    /// All densities are zero when no time has been accumulated.
    pub fn summarize(&self) -> DensitySummary {
        let norm = if self.total_time > 0.0 {
            1.0 / self.total_time
        } else {
            0.0
        };
        // One row per state, empty when the lattice is.
        let density = (0..self.nstates)
            .map(|state| {
                let row = &self.occupied[state * self.length..(state + 1) * self.length];
                row.iter().map(|&t| t * norm).collect()
            })
            .collect();
        let species_density = self
            .species
            .chunks(self.length + 1)
            .map(|row| row.iter().map(|&t| t * norm).collect())
            .collect();
        let counts = self
            .counts
            .iter()
            .map(|c| {
                c.as_ref()
                    .map(|(size, matrix)| matrix.chunks(*size).map(<[u64]>::to_vec).collect())
            })
            .collect();

        DensitySummary {
            total_time: self.total_time,
            density,
            species_density,
            counts,
        }
    }
}

/// Normalized end-of-run statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensitySummary {
    /// Simulated time the statistics cover.
    pub total_time: f64,
    /// `density[state][site]`: fraction of time `site` held `state`.
    pub density: Vec<Vec<f64>>,
    /// `species_density[state][n]`: fraction of time exactly `n` sites
    /// held `state`.
    pub species_density: Vec<Vec<f64>>,
    /// `counts[rule][target][source]`, `None` for uncounted rules.
    pub counts: Vec<Option<Vec<Vec<u64>>>>,
}

impl DensitySummary {
    /// Applied `source -> target` events of `rule` (0 if uncounted).
    pub fn count(&self, rule: usize, target: usize, source: usize) -> u64 {
        self.counts
            .get(rule)
            .and_then(Option::as_ref)
            .and_then(|m| m.get(target))
            .and_then(|row| row.get(source))
            .copied()
            .unwrap_or(0)
    }

    /// Net rate of `source -> target` events of `rule` over the reverse
    /// events, per unit time.
    pub fn net_current(&self, rule: usize, source: usize, target: usize) -> f64 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        let forward = self.count(rule, target, source) as f64;
        let backward = self.count(rule, source, target) as f64;
        (forward - backward) / self.total_time
    }

    /// Per-site density of `state`.
    pub fn density_profile(&self, state: usize) -> &[f64] {
        &self.density[state]
    }

    /// Density of `state` averaged over `sites`.
    pub fn mean_density(&self, state: usize, sites: Range<usize>) -> f64 {
        let profile = &self.density[state][sites];
        if profile.is_empty() {
            return 0.0;
        }
        profile.iter().sum::<f64>() / profile.len() as f64
    }
}
