//! Property tests: the incrementally maintained active set always equals a
//! full rescan of the lattice it describes.
//!
//! Random rule sets mix window widths, alphabets, sparse rate tables and
//! ranges that touch either end of the lattice, then apply a random
//! sequence of events and compare after every one.

use latsim_core::{RuleSpec, SimConfig};
use latsim_engine::{NullSink, StatisticsAccumulator, StochasticDriver, TransitionIndex};
use latsim_lattice::LatticeState;
use latsim_test_utils::{flip_rates, hop_rates};
use proptest::collection::vec;
use proptest::prelude::*;

fn build(config: &SimConfig) -> TransitionIndex {
    let rules = config.resolve_rules().unwrap();
    let lattice = LatticeState::new(config.length, config.nstates, &config.initial_state).unwrap();
    TransitionIndex::new(lattice, rules).unwrap()
}

fn rule_strategy(length: usize, nstates: usize) -> impl Strategy<Value = RuleSpec> {
    (1usize..=3).prop_flat_map(move |window| {
        let window = window.min(length);
        let size = nstates.pow(window as u32);
        let starts = length - window + 1;
        let rate = prop_oneof![3 => Just(0.0), 2 => 0.05f64..2.0];
        (
            0..starts,
            0..starts,
            vec(vec(rate, size), size),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(move |(a, b, rates, count, from_right)| {
                let (first, last) = (a.min(b), a.max(b));
                let to = if from_right {
                    -((length - last) as i64)
                } else {
                    last as i64 + 1
                };
                RuleSpec {
                    window,
                    from: first as i64 + 1,
                    to,
                    count,
                    rates,
                }
            })
    })
}

fn config_strategy() -> impl Strategy<Value = SimConfig> {
    (2usize..=3, 4usize..=12).prop_flat_map(|(nstates, length)| {
        (
            vec(rule_strategy(length, nstates), 1..=3),
            vec(0..nstates, length),
        )
            .prop_map(move |(transitions, initial_state)| SimConfig {
                length,
                nstates,
                transitions,
                initial_state,
                seed: 1,
                verbose: false,
                t_max: 1.0,
                t_skip: 0.0,
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn incremental_update_matches_rescan(
        config in config_strategy(),
        draws in vec(0.0f64..1.0, 1..80),
    ) {
        let mut index = build(&config);
        prop_assert_eq!(index.active_transitions(), index.rescan());

        for u in draws {
            if index.is_empty() {
                prop_assert_eq!(index.total_rate(), 0.0);
                break;
            }
            let r = u * index.total_rate();
            let applied = index.sample_and_apply(r).unwrap();
            prop_assert!(applied.rate > 0.0);
            prop_assert!(applied.last_site() < config.length);

            prop_assert_eq!(index.active_transitions(), index.rescan());
            let rescanned = index.rescan_total_rate();
            prop_assert!(
                (index.total_rate() - rescanned).abs() <= 1e-9 * rescanned.max(1.0),
                "exit rate {} drifted from rescan {}",
                index.total_rate(),
                rescanned
            );
            prop_assert!(index.lattice().sites().iter().all(|&v| v < config.nstates));
        }
    }

    #[test]
    fn driver_preserves_exit_rate(config in config_strategy(), seed in 1u64..1_000) {
        let index = build(&config);
        let mut stats = StatisticsAccumulator::new(config.length, config.nstates, index.rules());
        let mut driver = StochasticDriver::seeded(index, seed);
        driver.warm_up(2.0, &mut NullSink);
        driver.measure(2.0, &mut stats, &mut NullSink);

        let index = driver.index();
        prop_assert_eq!(index.active_transitions(), index.rescan());
        let rescanned = index.rescan_total_rate();
        prop_assert!((index.total_rate() - rescanned).abs() <= 1e-9 * rescanned.max(1.0));
        prop_assert!((stats.total_time() - 2.0).abs() < 1e-9);
    }
}

#[test]
fn edge_windows_stay_inside_lattice() {
    // Three-site window flush with both ends, plus single-site edge flips.
    let mut shuffle = vec![vec![0.5; 8]; 8];
    for (i, row) in shuffle.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    let config = SimConfig {
        length: 6,
        nstates: 2,
        transitions: vec![
            RuleSpec::new(3, 1, -3, shuffle),
            RuleSpec::new(1, 1, 1, flip_rates(1.0, 1.0)),
            RuleSpec::new(1, -1, -1, flip_rates(1.0, 1.0)),
            RuleSpec::new(2, -2, -2, hop_rates(1.0, 1.0)),
        ],
        initial_state: vec![1, 0, 1],
        seed: 8,
        verbose: false,
        t_max: 1.0,
        t_skip: 0.0,
    };
    let mut index = build(&config);
    for k in 0..5_000 {
        let u = (k as f64 * 0.618_033_988_75).fract();
        let applied = index.sample_and_apply(u * index.total_rate()).unwrap();
        assert!(applied.last_site() < 6);
    }
    assert_eq!(index.active_transitions(), index.rescan());
}
