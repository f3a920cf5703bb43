//! Full-run composition: configuration in, [`RunReport`] out.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use latsim_core::{ConfigError, SimConfig};
use latsim_lattice::{LatticeError, LatticeState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::driver::StochasticDriver;
use crate::metrics::RunMetrics;
use crate::sink::{EventSink, NullSink};
use crate::stats::{DensitySummary, StatisticsAccumulator};
use crate::transitions::TransitionIndex;

// ── RunError ───────────────────────────────────────────────────────

/// Errors that prevent a run from starting.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The lattice could not be built from the validated configuration.
    Lattice(LatticeError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Lattice(e) => write!(f, "lattice setup failed: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Lattice(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LatticeError> for RunError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

// ── RunReport ──────────────────────────────────────────────────────

/// End-of-run output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The configuration as supplied.
    pub options: SimConfig,
    /// Seed the RNG was actually initialized with.
    pub seed: u64,
    /// Normalized statistics over the measurement phase.
    pub results: DensitySummary,
    /// Final lattice contents.
    pub endconfig: Vec<usize>,
    /// Wall-clock duration of the run, in milliseconds.
    pub runtime: f64,
    /// Event and storage counters.
    pub metrics: RunMetrics,
}

/// Run `config` without observing individual events.
pub fn simulate(config: &SimConfig) -> Result<RunReport, RunError> {
    simulate_with_sink(config, &mut NullSink)
}

/// Run `config`, handing every applied event to `sink`.
///
/// Validates the configuration, builds the lattice and transition index,
/// warms up for `tSkip` (clamped to `tMax`), then measures for the rest
/// of `tMax`. A zero `seed` is replaced by a fresh random one, reported in
/// [`RunReport::seed`].
///
/// ```
/// use latsim_core::{RuleSpec, SimConfig};
///
/// let config = SimConfig {
///     length: 3,
///     nstates: 2,
///     transitions: vec![RuleSpec::new(1, 1, -1, vec![vec![0.0, 1.0], vec![1.0, 0.0]])],
///     initial_state: Vec::new(),
///     seed: 17,
///     verbose: false,
///     t_max: 5.0,
///     t_skip: 1.0,
/// };
/// let report = latsim_engine::simulate(&config).unwrap();
/// assert_eq!(report.seed, 17);
/// assert!((report.results.total_time - 4.0).abs() < 1e-9);
/// assert_eq!(report.endconfig.len(), 3);
/// ```
pub fn simulate_with_sink<S: EventSink + ?Sized>(
    config: &SimConfig,
    sink: &mut S,
) -> Result<RunReport, RunError> {
    let started = Instant::now();
    let rules = config.resolve_rules()?;
    let seed = if config.is_seeded() {
        config.seed
    } else {
        rand::rng().random::<u64>()
    };
    info!(
        length = config.length,
        nstates = config.nstates,
        rules = rules.len(),
        seed,
        t_max = config.t_max,
        t_skip = config.skip_time(),
        "starting run"
    );

    let lattice = LatticeState::new(config.length, config.nstates, &config.initial_state)?;
    let mut stats = StatisticsAccumulator::new(config.length, config.nstates, &rules);
    let index = TransitionIndex::new(lattice, rules)?;
    sink.start(index.lattice());

    let mut driver = StochasticDriver::seeded(index, seed);
    let warmup_events = driver.warm_up(config.skip_time(), sink);
    let measured_events = driver.measure(config.measure_time(), &mut stats, sink);

    let index = driver.into_index();
    let metrics = RunMetrics {
        warmup_events,
        measured_events,
        peak_active: index.peak_len(),
        pool_slots: index.slot_count(),
    };
    let runtime = started.elapsed().as_secs_f64() * 1000.0;
    info!(
        warmup_events = metrics.warmup_events,
        measured_events = metrics.measured_events,
        peak_active = metrics.peak_active,
        pool_slots = metrics.pool_slots,
        runtime_ms = runtime,
        "run complete"
    );

    Ok(RunReport {
        options: config.clone(),
        seed,
        results: stats.summarize(),
        endconfig: index.into_lattice().sites().to_vec(),
        runtime,
        metrics,
    })
}
