//! Conformance: forced transitions on the 15-site regression lattice.

use latsim::prelude::*;
use latsim_test_utils::fixtures::{
    asep_fixture_config, fixture_after_hop, fixture_initial_set, TransitionTuple, FORCED_HOP,
};

fn tuples(index: &TransitionIndex) -> Vec<TransitionTuple> {
    index
        .active_transitions()
        .into_iter()
        .map(|t| (t.position, t.window, t.rule, t.target, t.source, t.rate))
        .collect()
}

#[test]
fn forced_hop_reaches_reference_set() {
    let config = asep_fixture_config();
    let rules = config.resolve_rules().unwrap();
    let lattice = LatticeState::new(config.length, config.nstates, &config.initial_state).unwrap();
    let mut index = TransitionIndex::new(lattice, rules).unwrap();
    assert_eq!(tuples(&index), fixture_initial_set());

    let applied = index.force_transition(FORCED_HOP).unwrap();
    assert_eq!((applied.position, applied.target, applied.source), (8, 1, 2));
    assert_eq!(tuples(&index), fixture_after_hop());
    assert_eq!(index.active_transitions(), index.rescan());
}
