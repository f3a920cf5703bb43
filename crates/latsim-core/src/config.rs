//! Run configuration and validation.
//!
//! [`SimConfig`] is the deserialized form of the JSON run description.
//! [`validate()`](SimConfig::validate) checks every structural invariant
//! at startup; [`resolve_rules()`](SimConfig::resolve_rules) performs the
//! same checks and returns the [`TransitionRule`]s the engine consumes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rule::{RateMatrix, SiteRange, TransitionRule};

// ── RuleSpec ───────────────────────────────────────────────────────

/// One local transition rule as written in the configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// How many contiguous sites the rule operates on.
    pub window: usize,
    /// First window start site, 1-indexed; negative counts from the right.
    pub from: i64,
    /// Last window start site, 1-indexed; negative counts from the right.
    pub to: i64,
    /// Count every applied event of this rule, aggregated over positions.
    #[serde(default, with = "flag")]
    pub count: bool,
    /// `rates[target][source]`, a `K×K` matrix with `K = nstates^window`.
    pub rates: Vec<Vec<f64>>,
}

impl RuleSpec {
    /// Create an uncounted rule.
    pub fn new(window: usize, from: i64, to: i64, rates: Vec<Vec<f64>>) -> Self {
        Self {
            window,
            from,
            to,
            count: false,
            rates,
        }
    }

    /// Mark the rule as counted.
    pub fn counted(mut self) -> Self {
        self.count = true;
        self
    }

    /// Validate this rule (index `rule` in the list) against a lattice of
    /// `length` sites over `nstates` states.
    pub fn resolve(
        &self,
        rule: usize,
        length: usize,
        nstates: usize,
    ) -> Result<TransitionRule, ConfigError> {
        let window = self.window;
        let size = u32::try_from(window)
            .ok()
            .filter(|&w| w > 0)
            .and_then(|w| nstates.checked_pow(w))
            .ok_or(ConfigError::InvalidWindow { rule, window })?;

        let first = SiteRange::resolve_endpoint(self.from, length).ok_or_else(|| {
            ConfigError::RuleRange {
                rule,
                reason: format!("from {} is outside [1, {length}]", self.from),
            }
        })?;
        let last = SiteRange::resolve_endpoint(self.to, length).ok_or_else(|| {
            ConfigError::RuleRange {
                rule,
                reason: format!("to {} is outside [1, {length}]", self.to),
            }
        })?;
        if first > last {
            return Err(ConfigError::RuleRange {
                rule,
                reason: format!("from resolves to site {} after to site {}", first + 1, last + 1),
            });
        }
        if last + window > length {
            return Err(ConfigError::RuleRange {
                rule,
                reason: format!(
                    "a {window}-site window at site {} runs past site {length}",
                    last + 1
                ),
            });
        }

        if self.rates.len() != size {
            return Err(ConfigError::RateMatrixShape {
                rule,
                expected: size,
                row: None,
                found: self.rates.len(),
            });
        }
        for (target, row) in self.rates.iter().enumerate() {
            if row.len() != size {
                return Err(ConfigError::RateMatrixShape {
                    rule,
                    expected: size,
                    row: Some(target),
                    found: row.len(),
                });
            }
            for (source, &value) in row.iter().enumerate() {
                if source != target && !(value.is_finite() && value >= 0.0) {
                    return Err(ConfigError::InvalidRate {
                        rule,
                        target,
                        source,
                        value,
                    });
                }
            }
        }

        Ok(TransitionRule {
            window,
            range: SiteRange::new(first, last),
            counted: self.count,
            rates: RateMatrix::from_rows(&self.rates),
        })
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete description of one simulation run.
///
/// # Examples
///
/// ```
/// use latsim_core::SimConfig;
///
/// let config: SimConfig = serde_json::from_str(r#"{
///     "L": 4, "nstates": 2, "tMax": 10.0, "seed": 7,
///     "transitions": [
///         {"window": 1, "from": 1, "to": -1, "rates": [[0, 1.0], [1.0, 0]]}
///     ]
/// }"#).unwrap();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.initial_sites(), vec![0, 0, 0, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Lattice length.
    #[serde(rename = "L")]
    pub length: usize,
    /// Alphabet size: each site holds a value in `[0, nstates)`.
    pub nstates: usize,
    /// Local transition rules.
    pub transitions: Vec<RuleSpec>,
    /// Initial site values; shorter than `L` is zero-padded, longer is truncated.
    #[serde(default)]
    pub initial_state: Vec<usize>,
    /// RNG seed. `0` draws a fresh seed for a non-reproducible run.
    #[serde(default)]
    pub seed: u64,
    /// Emit a trace line per applied event.
    #[serde(default, with = "flag")]
    pub verbose: bool,
    /// Total simulated duration.
    pub t_max: f64,
    /// Leading duration discarded before statistics are recorded.
    #[serde(default)]
    pub t_skip: f64,
}

impl SimConfig {
    /// Validate all structural invariants.
    ///
    /// This is a pure validation pass; [`resolve_rules()`](Self::resolve_rules)
    /// runs the same checks and also returns the resolved rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_rules().map(drop)
    }

    /// Validate the configuration and resolve every rule.
    pub fn resolve_rules(&self) -> Result<Vec<TransitionRule>, ConfigError> {
        // 1. Dimensions.
        if self.length == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "L" });
        }
        if self.nstates == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "nstates" });
        }
        // 2. Durations.
        for (name, value) in [("tMax", self.t_max), ("tSkip", self.t_skip)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        // 3. Initial state, only the part that lands on the lattice.
        for (site, &value) in self.initial_state.iter().take(self.length).enumerate() {
            if value >= self.nstates {
                return Err(ConfigError::InitialStateOutOfRange {
                    site,
                    value,
                    nstates: self.nstates,
                });
            }
        }
        // 4. Rules.
        if self.transitions.is_empty() {
            return Err(ConfigError::NoTransitions);
        }
        self.transitions
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.resolve(i, self.length, self.nstates))
            .collect()
    }

    /// Largest window over all rules (0 with no rules).
    pub fn max_window(&self) -> usize {
        self.transitions.iter().map(|t| t.window).max().unwrap_or(0)
    }

    /// Initial lattice contents, zero-padded or truncated to `L`.
    pub fn initial_sites(&self) -> Vec<usize> {
        let mut sites = vec![0; self.length];
        let n = self.initial_state.len().min(self.length);
        sites[..n].copy_from_slice(&self.initial_state[..n]);
        sites
    }

    /// Warm-up duration, clamped so it never exceeds `tMax`.
    pub fn skip_time(&self) -> f64 {
        self.t_skip.min(self.t_max)
    }

    /// Measured duration `tMax - tSkip` after clamping.
    pub fn measure_time(&self) -> f64 {
        self.t_max - self.skip_time()
    }

    /// Whether the run is reproducible from the configured seed.
    pub fn is_seeded(&self) -> bool {
        self.seed != 0
    }
}

/// Boolean flags accept `true`/`false` or an integer (non-zero is true).
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bool(b) => b,
            Repr::Int(n) => n != 0,
        })
    }
}
