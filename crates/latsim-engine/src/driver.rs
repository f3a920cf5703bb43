//! Continuous-time event loop.
//!
//! [`StochasticDriver`] advances a [`TransitionIndex`] through simulated
//! time: it draws an exponential waiting time from the current exit rate,
//! then selects and applies one transition with probability proportional
//! to its rate. Every step consumes exactly two uniform draws from the
//! driver's RNG, so a run is a deterministic function of the seed.
//!
//! A run is split into phases. During [`Phase::WarmUp`] nothing is
//! recorded; during [`Phase::Measure`] each waiting interval is credited
//! to a [`StatisticsAccumulator`] at the configuration it was spent in.

use std::fmt;

use rand::distr::Open01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::sink::{EventRecord, EventSink};
use crate::stats::StatisticsAccumulator;
use crate::transitions::TransitionIndex;

// Compile-time assertion: a driver can be moved to a worker thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<StochasticDriver>();
    }
};

// ── Phase ──────────────────────────────────────────────────────────

/// Stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Statistics suppressed; the final partial interval is discarded.
    WarmUp,
    /// Statistics recorded up to the exact phase end.
    Measure,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WarmUp => write!(f, "warm-up"),
            Self::Measure => write!(f, "measure"),
        }
    }
}

// ── StochasticDriver ───────────────────────────────────────────────

/// Exponential-waiting-time sampler over a [`TransitionIndex`].
///
/// The driver keeps an absolute clock: each phase starts at local time
/// zero and, when it ends, adds its full duration to the clock. Event
/// times handed to sinks are absolute.
#[derive(Debug)]
pub struct StochasticDriver<R = ChaCha8Rng> {
    index: TransitionIndex,
    rng: R,
    clock: f64,
}

impl StochasticDriver<ChaCha8Rng> {
    /// Driver over `index` with a `ChaCha8Rng` seeded from `seed`.
    pub fn seeded(index: TransitionIndex, seed: u64) -> Self {
        Self::new(index, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> StochasticDriver<R> {
    /// Driver over `index` drawing from `rng`.
    pub fn new(index: TransitionIndex, rng: R) -> Self {
        Self {
            index,
            rng,
            clock: 0.0,
        }
    }

    /// The transition index being driven.
    pub fn index(&self) -> &TransitionIndex {
        &self.index
    }

    /// Absolute simulated time at the end of the last completed phase.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Consume the driver, returning the index.
    pub fn into_index(self) -> TransitionIndex {
        self.index
    }

    fn draw(&mut self) -> f64 {
        self.rng.sample(Open01)
    }

    /// Exponential waiting time at `rate`; infinite when nothing is enabled.
    fn waiting_time(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        -self.draw().ln() / rate
    }

    /// Apply one rate-weighted transition and report it to `sink`.
    fn step<S: EventSink + ?Sized>(
        &mut self,
        phase: Phase,
        rate: f64,
        t: f64,
        dt: f64,
        sink: &mut S,
    ) -> Option<EventRecord> {
        let r = self.draw() * rate;
        let transition = self.index.sample_and_apply(r)?;
        let event = EventRecord {
            phase,
            time: self.clock + t,
            dt,
            transition,
        };
        sink.record(&event, self.index.lattice());
        Some(event)
    }

    /// Evolve for `duration` without recording statistics.
    ///
    /// Stops at the first event whose time would pass `duration`; that
    /// event is not applied. Returns the number of events applied.
    pub fn warm_up<S: EventSink + ?Sized>(&mut self, duration: f64, sink: &mut S) -> u64 {
        let mut t = 0.0;
        let mut events = 0;
        loop {
            let rate = self.index.total_rate();
            let dt = self.waiting_time(rate);
            t += dt;
            if t > duration {
                break;
            }
            if self.step(Phase::WarmUp, rate, t, dt, sink).is_none() {
                break;
            }
            events += 1;
        }
        self.clock += duration;
        debug!(phase = %Phase::WarmUp, duration, events, clock = self.clock, "phase complete");
        events
    }

    /// Evolve for `duration`, crediting every interval to `stats`.
    ///
    /// The interval that crosses `duration` is truncated at `duration` and
    /// credited to the configuration before the crossing event, which is
    /// never applied. Returns the number of events applied.
    pub fn measure<S: EventSink + ?Sized>(
        &mut self,
        duration: f64,
        stats: &mut StatisticsAccumulator,
        sink: &mut S,
    ) -> u64 {
        let mut t = 0.0;
        let mut events = 0;
        loop {
            let rate = self.index.total_rate();
            let dt = self.waiting_time(rate);
            if t + dt >= duration {
                stats.update(self.index.lattice(), duration - t);
                break;
            }
            stats.update(self.index.lattice(), dt);
            t += dt;

            let Some(event) = self.step(Phase::Measure, rate, t, dt, sink) else {
                break;
            };
            let applied = event.transition;
            stats.count_event(applied.rule, applied.target, applied.source);
            events += 1;
        }
        self.clock += duration;
        debug!(phase = %Phase::Measure, duration, events, clock = self.clock, "phase complete");
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{NullSink, RecordingSink};
    use latsim_core::{RateMatrix, SiteRange, TransitionRule};
    use latsim_lattice::LatticeState;
    use latsim_test_utils::fixtures::asep_fixture_config;

    fn fixture_driver(seed: u64) -> StochasticDriver {
        let config = asep_fixture_config();
        let rules = config.resolve_rules().unwrap();
        let lattice = LatticeState::new(config.length, 2, &config.initial_state).unwrap();
        StochasticDriver::seeded(TransitionIndex::new(lattice, rules).unwrap(), seed)
    }

    fn stats_for(driver: &StochasticDriver) -> StatisticsAccumulator {
        let index = driver.index();
        StatisticsAccumulator::new(index.lattice().len(), 2, index.rules())
    }

    #[test]
    fn measure_accumulates_exact_duration() {
        let mut driver = fixture_driver(5);
        let mut stats = stats_for(&driver);
        let events = driver.measure(20.0, &mut stats, &mut NullSink);
        assert!(events > 0);
        assert!((stats.total_time() - 20.0).abs() < 1e-9);
        assert_eq!(driver.clock(), 20.0);
    }

    #[test]
    fn warm_up_records_no_statistics() {
        let mut driver = fixture_driver(5);
        let mut sink = RecordingSink::new();
        let events = driver.warm_up(10.0, &mut sink);
        assert_eq!(events as usize, sink.events.len());
        assert!(sink.events.iter().all(|e| e.phase == Phase::WarmUp));
        assert!(sink.events.iter().all(|e| e.time <= 10.0));
        assert_eq!(driver.clock(), 10.0);
    }

    #[test]
    fn event_times_are_absolute_and_increasing() {
        let mut driver = fixture_driver(9);
        let mut stats = stats_for(&driver);
        let mut sink = RecordingSink::new();
        driver.warm_up(3.0, &mut sink);
        driver.measure(3.0, &mut stats, &mut sink);

        let times: Vec<f64> = sink.events.iter().map(|e| e.time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert!(sink
            .phase_events(Phase::Measure)
            .all(|e| e.time >= 3.0 && e.time < 6.0));
        assert_eq!(driver.clock(), 6.0);
    }

    #[test]
    fn counted_events_reach_statistics() {
        let mut driver = fixture_driver(11);
        let mut stats = stats_for(&driver);
        let mut sink = RecordingSink::new();
        driver.measure(50.0, &mut stats, &mut sink);

        let injections = sink
            .events
            .iter()
            .filter(|e| e.transition.rule == 0)
            .count() as u64;
        let summary = stats.summarize();
        assert_eq!(summary.count(0, 1, 0), injections);
        assert!(summary.counts[1].is_none());
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed| {
            let mut driver = fixture_driver(seed);
            let mut stats = stats_for(&driver);
            let mut sink = RecordingSink::new();
            driver.warm_up(2.0, &mut sink);
            driver.measure(5.0, &mut stats, &mut sink);
            (sink, stats.summarize())
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42).0.events, run(43).0.events);
    }

    #[test]
    fn absorbing_state_ends_phase() {
        let rule = TransitionRule {
            window: 1,
            range: SiteRange::new(0, 1),
            counted: true,
            rates: RateMatrix::from_rows(&[vec![0.0, 0.0], vec![3.0, 0.0]]),
        };
        let lattice = LatticeState::new(2, 2, &[]).unwrap();
        let index = TransitionIndex::new(lattice, vec![rule]).unwrap();
        let mut driver = StochasticDriver::seeded(index, 1);
        let mut stats = stats_for(&driver);

        let events = driver.measure(1000.0, &mut stats, &mut NullSink);
        assert_eq!(events, 2);
        assert_eq!(driver.index().lattice().to_string(), "11");
        assert!((stats.total_time() - 1000.0).abs() < 1e-9);
        let summary = stats.summarize();
        assert!(summary.density[1][0] > 0.9);
    }

    #[test]
    fn zero_duration_phases_apply_nothing() {
        let mut driver = fixture_driver(3);
        let mut stats = stats_for(&driver);
        assert_eq!(driver.warm_up(0.0, &mut NullSink), 0);
        assert_eq!(driver.measure(0.0, &mut stats, &mut NullSink), 0);
        assert_eq!(stats.total_time(), 0.0);
        assert_eq!(
            driver.index().lattice().sites(),
            asep_fixture_config().initial_state.as_slice()
        );
    }
}
