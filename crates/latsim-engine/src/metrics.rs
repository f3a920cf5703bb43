//! Per-run counters for the simulation engine.
//!
//! [`RunMetrics`] records how many events each phase applied and how
//! large the active-transition pool grew, for logging and the run report.

use serde::{Deserialize, Serialize};

/// Event and storage counters collected over one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    /// Events applied during warm-up.
    pub warmup_events: u64,
    /// Events applied during measurement.
    pub measured_events: u64,
    /// Largest number of simultaneously active transitions.
    pub peak_active: usize,
    /// Storage slots allocated for active transitions, live or recycled.
    pub pool_slots: usize,
}

impl RunMetrics {
    /// Events applied over the whole run.
    pub fn total_events(&self) -> u64 {
        self.warmup_events + self.measured_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.warmup_events, 0);
        assert_eq!(m.measured_events, 0);
        assert_eq!(m.peak_active, 0);
        assert_eq!(m.pool_slots, 0);
        assert_eq!(m.total_events(), 0);
    }

    #[test]
    fn serializes_camel_case() {
        let m = RunMetrics {
            warmup_events: 3,
            measured_events: 4,
            peak_active: 10,
            pool_slots: 12,
        };
        assert_eq!(m.total_events(), 7);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["warmupEvents"], 3);
        assert_eq!(json["measuredEvents"], 4);
        assert_eq!(json["peakActive"], 10);
        assert_eq!(json["poolSlots"], 12);
    }
}
