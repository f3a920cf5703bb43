//! Open-boundary asymmetric simple exclusion process.
//!
//! Particles enter at site 1 with rate `alpha` and leave at site `L` with
//! rate `beta`; in the bulk they hop right with rate `p` and left with
//! rate `q`. `gamma` and `delta` are the reverse boundary rates.

use latsim_core::{RuleSpec, SimConfig};

use crate::{flip_rates, hop_rates};

/// Index of the counted left-boundary rule.
pub const LEFT_RULE: usize = 0;
/// Index of the bulk hopping rule.
pub const BULK_RULE: usize = 1;
/// Index of the right-boundary rule.
pub const RIGHT_RULE: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct OpenAsep {
    pub length: usize,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub p: f64,
    pub q: f64,
}

impl OpenAsep {
    /// Totally asymmetric, empty boundary rates.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            delta: 0.0,
            p: 1.0,
            q: 0.0,
        }
    }

    pub fn boundaries(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    pub fn reverse_boundaries(mut self, gamma: f64, delta: f64) -> Self {
        self.gamma = gamma;
        self.delta = delta;
        self
    }

    pub fn hopping(mut self, p: f64, q: f64) -> Self {
        self.p = p;
        self.q = q;
        self
    }

    /// Empty initial lattice, no warm-up.
    pub fn config(&self, t_max: f64, seed: u64) -> SimConfig {
        SimConfig {
            length: self.length,
            nstates: 2,
            transitions: vec![
                RuleSpec::new(1, 1, 1, flip_rates(self.alpha, self.gamma)).counted(),
                RuleSpec::new(2, 1, -2, hop_rates(self.p, self.q)),
                RuleSpec::new(1, -1, -1, flip_rates(self.delta, self.beta)),
            ],
            initial_state: Vec::new(),
            seed,
            verbose: false,
            t_max,
            t_skip: 0.0,
        }
    }
}

/// Stationary phases of the open ASEP with `p = 1`, `q = 0.1` and no
/// reverse boundary rates.
///
/// Bulk density and current in the infinite-lattice limit follow from
/// the effective rates `alpha / (p - q)` and `beta / (p - q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsepPhase {
    LowDensity,
    HighDensity,
    MaximalCurrent,
}

impl AsepPhase {
    pub const ALL: [AsepPhase; 3] = [
        AsepPhase::LowDensity,
        AsepPhase::HighDensity,
        AsepPhase::MaximalCurrent,
    ];

    pub fn model(self, length: usize) -> OpenAsep {
        let (alpha, beta) = match self {
            AsepPhase::LowDensity => (0.225, 0.9),
            AsepPhase::HighDensity => (0.9, 0.18),
            AsepPhase::MaximalCurrent => (0.9, 0.9),
        };
        OpenAsep::new(length)
            .boundaries(alpha, beta)
            .hopping(1.0, 0.1)
    }

    /// Bulk density of occupied sites.
    pub fn density(self) -> f64 {
        match self {
            AsepPhase::LowDensity => 0.25,
            AsepPhase::HighDensity => 0.8,
            AsepPhase::MaximalCurrent => 0.5,
        }
    }

    /// Particle current `(p - q) rho (1 - rho)`.
    pub fn current(self) -> f64 {
        let rho = self.density();
        0.9 * rho * (1.0 - rho)
    }
}
