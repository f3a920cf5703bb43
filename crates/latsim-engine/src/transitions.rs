//! The set of enabled local transitions and its incremental maintenance.
//!
//! [`TransitionIndex`] owns the lattice and the resolved rules. It scans
//! the whole lattice once at construction; after that every applied event
//! discards and recomputes only the transitions whose windows overlap the
//! rewritten sites, so an update costs `O(window × rules)` regardless of
//! lattice length.

use std::fmt;

use latsim_core::TransitionRule;
use latsim_lattice::{LatticeError, LatticeState};

use crate::active::ActiveSet;

// ── ActiveTransition ───────────────────────────────────────────────

/// One currently enabled local transition.
///
/// Rewrites the `window` sites starting at `position` from local code
/// `source` to `target` with the given `rate` under rule `rule`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTransition {
    /// Rate, always positive.
    pub rate: f64,
    /// Local code written by the transition.
    pub target: usize,
    /// First site of the window.
    pub position: usize,
    /// Number of sites in the window.
    pub window: usize,
    /// Index of the rule that enabled it.
    pub rule: usize,
    /// Local code the window holds now.
    pub source: usize,
}

impl ActiveTransition {
    /// Last site of the window.
    pub fn last_site(&self) -> usize {
        self.position + self.window - 1
    }

    /// Whether the window intersects sites `[lo, hi]`.
    pub fn overlaps(&self, lo: usize, hi: usize) -> bool {
        self.position <= hi && lo <= self.last_site()
    }
}

/// `(rate=.., target=.., position=.., window=.., rule=.., source=..)`.
impl fmt::Display for ActiveTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(rate={:?}, target={}, position={}, window={}, rule={}, source={})",
            self.rate, self.target, self.position, self.window, self.rule, self.source
        )
    }
}

// ── TransitionIndex ────────────────────────────────────────────────

/// Lattice plus the complete set of transitions it currently permits.
///
/// The invariant maintained through every applied event is that
/// [`total_rate()`](Self::total_rate) equals the summed rate of a full
/// rescan of the current lattice, and the active set equals that rescan.
///
/// # Examples
///
/// ```
/// use latsim_core::{RuleSpec, SimConfig};
/// use latsim_engine::TransitionIndex;
/// use latsim_lattice::LatticeState;
///
/// // Single-site flips 0 <-> 1 everywhere.
/// let config = SimConfig {
///     length: 4,
///     nstates: 2,
///     transitions: vec![RuleSpec::new(1, 1, -1, vec![vec![0.0, 2.0], vec![1.0, 0.0]])],
///     initial_state: vec![1],
///     seed: 1,
///     verbose: false,
///     t_max: 1.0,
///     t_skip: 0.0,
/// };
/// let rules = config.resolve_rules().unwrap();
/// let lattice = LatticeState::new(4, 2, &config.initial_sites()).unwrap();
/// let mut index = TransitionIndex::new(lattice, rules).unwrap();
///
/// // One site at rate 2 (down), three at rate 1 (up).
/// assert_eq!(index.total_rate(), 5.0);
///
/// let applied = index.sample_and_apply(0.5).unwrap();
/// assert_eq!((applied.position, applied.target), (0, 0));
/// assert_eq!(index.lattice().to_string(), "0000");
/// assert_eq!(index.total_rate(), 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionIndex {
    lattice: LatticeState,
    rules: Vec<TransitionRule>,
    active: ActiveSet,
}

impl TransitionIndex {
    /// Bind `rules` to `lattice` and enumerate every enabled transition.
    ///
    /// Sizes the lattice power table to the widest rule window. Fails if
    /// a rule's windows would leave the lattice or its rate table does not
    /// match `nstates^window`.
    pub fn new(mut lattice: LatticeState, rules: Vec<TransitionRule>) -> Result<Self, LatticeError> {
        let max_window = rules.iter().map(|r| r.window).max().unwrap_or(1);
        lattice.set_max_window(max_window)?;

        let len = lattice.len();
        for rule in &rules {
            if rule.window == 0 || rule.last_site() >= len {
                return Err(LatticeError::SpanOutOfBounds {
                    first: rule.range.first(),
                    last: rule.range.last() + rule.window.saturating_sub(1),
                    len,
                });
            }
            let expected = u32::try_from(rule.window)
                .ok()
                .and_then(|w| lattice.nstates().checked_pow(w))
                .ok_or(LatticeError::WindowTooWide {
                    window: rule.window,
                })?;
            if rule.code_count() != expected {
                return Err(LatticeError::CodeCountMismatch {
                    window: rule.window,
                    expected,
                    found: rule.code_count(),
                });
            }
        }

        let mut active = ActiveSet::new(len, max_window);
        for (ri, rule) in rules.iter().enumerate() {
            for j in rule.range.positions() {
                enable(&mut active, &lattice, ri, rule, j);
            }
        }

        Ok(Self {
            lattice,
            rules,
            active,
        })
    }

    /// Sum of all active rates.
    pub fn total_rate(&self) -> f64 {
        self.active.exit_rate()
    }

    /// Number of active transitions.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no transition is enabled (an absorbing configuration).
    pub fn is_empty(&self) -> bool {
        self.active.len() == 0
    }

    /// Current lattice.
    pub fn lattice(&self) -> &LatticeState {
        &self.lattice
    }

    /// Resolved rules, in configuration order.
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// Select the first transition whose cumulative rate exceeds `r`.
    ///
    /// `r` should lie in `[0, total_rate())`. Returns `None` only when the
    /// set is empty.
    pub fn select(&self, r: f64) -> Option<ActiveTransition> {
        self.active.select(r)
    }

    /// Apply `transition` to the lattice and recompute the dirty span.
    ///
    /// `transition` must be a member of the current active set.
    fn apply(&mut self, transition: &ActiveTransition) {
        let p = transition.position;
        debug_assert_eq!(
            self.lattice.window_code(p, transition.window),
            transition.source,
            "stale transition {transition}"
        );
        self.lattice
            .write_window(transition.target, p, transition.window);

        let lo = p;
        let hi = transition.last_site();
        self.active.remove_overlapping(lo, hi);

        for (ri, rule) in self.rules.iter().enumerate() {
            if let Some(positions) = rule.range.overlapping(rule.window, lo, hi) {
                for j in positions {
                    enable(&mut self.active, &self.lattice, ri, rule, j);
                }
            }
        }
    }

    /// [`select()`](Self::select), then write the selected transition into
    /// the lattice and recompute the windows it touched.
    pub fn sample_and_apply(&mut self, r: f64) -> Option<ActiveTransition> {
        let transition = self.active.select(r)?;
        self.apply(&transition);
        Some(transition)
    }

    /// The active set sorted by `(position, window, rule, target, source)`.
    pub fn active_transitions(&self) -> Vec<ActiveTransition> {
        let mut all: Vec<ActiveTransition> = self.active.iter().copied().collect();
        sort_transitions(&mut all);
        all
    }

    /// Enumerate the enabled transitions from scratch, sorted like
    /// [`active_transitions()`](Self::active_transitions).
    pub fn rescan(&self) -> Vec<ActiveTransition> {
        let mut scratch = ActiveSet::new(self.lattice.len(), self.lattice.max_window());
        for (ri, rule) in self.rules.iter().enumerate() {
            for j in rule.range.positions() {
                enable(&mut scratch, &self.lattice, ri, rule, j);
            }
        }
        let mut all: Vec<ActiveTransition> = scratch.iter().copied().collect();
        sort_transitions(&mut all);
        all
    }

    /// Exit rate of the current lattice computed by a full scan.
    pub fn rescan_total_rate(&self) -> f64 {
        self.rules
            .iter()
            .map(|rule| {
                rule.range
                    .positions()
                    .map(|j| rule.rates.exit_rate(self.lattice.window_code(j, rule.window)))
                    .sum::<f64>()
            })
            .sum()
    }

    /// Largest number of simultaneously active transitions so far.
    pub fn peak_len(&self) -> usize {
        self.active.peak_len()
    }

    /// Storage slots allocated for active transitions, live or recycled.
    pub fn slot_count(&self) -> usize {
        self.active.slot_count()
    }

    /// Consume the index, returning the lattice.
    pub fn into_lattice(self) -> LatticeState {
        self.lattice
    }

    /// Apply the first active transition whose rendering equals `identity`.
    ///
    /// Does nothing and returns `None` when no transition matches.
    #[cfg(any(test, feature = "test-support"))]
    pub fn force_transition(&mut self, identity: &str) -> Option<ActiveTransition> {
        let transition = self
            .active
            .iter()
            .find(|t| t.to_string() == identity)
            .copied()?;
        self.apply(&transition);
        Some(transition)
    }
}

/// Insert every transition out of the current code of rule `ri` at `j`.
fn enable(
    active: &mut ActiveSet,
    lattice: &LatticeState,
    ri: usize,
    rule: &TransitionRule,
    j: usize,
) {
    let source = lattice.window_code(j, rule.window);
    for &(target, rate) in rule.rates.outgoing(source) {
        active.insert(ActiveTransition {
            rate,
            target,
            position: j,
            window: rule.window,
            rule: ri,
            source,
        });
    }
}

fn sort_transitions(all: &mut [ActiveTransition]) {
    all.sort_by(|a, b| {
        (a.position, a.window, a.rule, a.target, a.source)
            .cmp(&(b.position, b.window, b.rule, b.target, b.source))
            .then(a.rate.total_cmp(&b.rate))
    });
}
