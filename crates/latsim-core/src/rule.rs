//! Validated local transition rules.
//!
//! A [`TransitionRule`] is the resolved, immutable form of a
//! [`RuleSpec`](crate::RuleSpec): 0-indexed absolute site range, a dense
//! [`RateMatrix`] over local codes, and a precomputed table of the
//! non-zero off-diagonal rates out of each source code.

use std::ops::RangeInclusive;

/// Inclusive, 0-indexed range of window start positions covered by a rule.
///
/// # Examples
///
/// ```
/// use latsim_core::SiteRange;
///
/// // 1-indexed `from = 1`, `to = -2` on a 15-site lattice.
/// let first = SiteRange::resolve_endpoint(1, 15).unwrap();
/// let last = SiteRange::resolve_endpoint(-2, 15).unwrap();
/// let range = SiteRange::new(first, last);
/// assert_eq!((range.first(), range.last()), (0, 13));
/// assert_eq!(range.len(), 14);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteRange {
    first: usize,
    last: usize,
}

impl SiteRange {
    /// Create a range. `first` must not exceed `last`.
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "SiteRange first {first} > last {last}");
        Self { first, last }
    }

    /// Resolve a 1-indexed endpoint on a lattice of `length` sites.
    ///
    /// Positive values count from the left (1 = first site), negative
    /// values from the right (-1 = last site). Returns `None` for zero or
    /// for endpoints beyond the lattice.
    pub fn resolve_endpoint(endpoint: i64, length: usize) -> Option<usize> {
        let magnitude = usize::try_from(endpoint.unsigned_abs()).ok()?;
        if magnitude == 0 || magnitude > length {
            return None;
        }
        if endpoint < 0 {
            Some(length - magnitude)
        } else {
            Some(magnitude - 1)
        }
    }

    /// First covered position.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last covered position.
    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of covered positions (always at least one).
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always returns `false`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `position` is covered.
    pub fn contains(&self, position: usize) -> bool {
        self.first <= position && position <= self.last
    }

    /// All covered positions in ascending order.
    pub fn positions(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Covered positions whose `window`-site span `[j, j + window - 1]`
    /// intersects the sites `[lo, hi]`.
    ///
    /// Returns `None` when no covered window touches the span.
    pub fn overlapping(&self, window: usize, lo: usize, hi: usize) -> Option<RangeInclusive<usize>> {
        let start = self.first.max((lo + 1).saturating_sub(window));
        let end = self.last.min(hi);
        (start <= end).then_some(start..=end)
    }
}

/// Dense `K×K` matrix of local transition rates.
///
/// Stored target-major, matching the `rates[target][source]` layout of
/// the configuration file; read it through [`rate()`](Self::rate) with
/// the arguments in `(source, target)` order. Diagonal entries are never
/// read by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RateMatrix {
    size: usize,
    rates: Vec<f64>,
    // CSR table of positive off-diagonal rates per source code.
    offsets: Vec<usize>,
    outgoing: Vec<(usize, f64)>,
}

impl RateMatrix {
    /// Build from `rows[target][source]`.
    ///
    /// Rows must all have length `rows.len()`; this is checked by
    /// [`RuleSpec::resolve`](crate::RuleSpec::resolve) before construction.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let size = rows.len();
        debug_assert!(rows.iter().all(|r| r.len() == size));
        Self::from_fn(size, |source, target| rows[target][source])
    }

    /// Build a `size×size` matrix from a `(source, target) → rate` function.
    ///
    /// ```
    /// use latsim_core::RateMatrix;
    ///
    /// // Two-site window over a binary alphabet: hop "10" -> "01".
    /// let m = RateMatrix::from_fn(4, |s, t| if (s, t) == (2, 1) { 1.0 } else { 0.0 });
    /// assert_eq!(m.rate(2, 1), 1.0);
    /// assert_eq!(m.outgoing(2), &[(1, 1.0)]);
    /// assert!(m.outgoing(1).is_empty());
    /// ```
    pub fn from_fn(size: usize, mut rate: impl FnMut(usize, usize) -> f64) -> Self {
        let mut rates = vec![0.0; size * size];
        for target in 0..size {
            for source in 0..size {
                rates[target * size + source] = rate(source, target);
            }
        }

        let mut offsets = Vec::with_capacity(size + 1);
        let mut outgoing = Vec::new();
        offsets.push(0);
        for source in 0..size {
            for target in 0..size {
                let r = rates[target * size + source];
                if target != source && r > 0.0 {
                    outgoing.push((target, r));
                }
            }
            offsets.push(outgoing.len());
        }

        Self {
            size,
            rates,
            offsets,
            outgoing,
        }
    }

    /// Matrix dimension `K`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rate of rewriting local code `source` into `target`.
    pub fn rate(&self, source: usize, target: usize) -> f64 {
        self.rates[target * self.size + source]
    }

    /// `(target, rate)` pairs with `target != source` and `rate > 0`, in
    /// ascending target order.
    pub fn outgoing(&self, source: usize) -> &[(usize, f64)] {
        &self.outgoing[self.offsets[source]..self.offsets[source + 1]]
    }

    /// Total rate out of `source` (sum of [`outgoing`](Self::outgoing)).
    pub fn exit_rate(&self, source: usize) -> f64 {
        self.outgoing(source).iter().map(|&(_, r)| r).sum()
    }

    /// Convert back to `rows[target][source]`.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rates.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }
}

/// A validated local transition rule.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRule {
    /// Number of contiguous sites the rule examines and rewrites.
    pub window: usize,
    /// Window start positions the rule applies at.
    pub range: SiteRange,
    /// Whether applied events of this rule are counted.
    pub counted: bool,
    /// Local transition rates over `nstates^window` codes.
    pub rates: RateMatrix,
}

impl TransitionRule {
    /// Number of local codes `K = nstates^window`.
    pub fn code_count(&self) -> usize {
        self.rates.size()
    }

    /// Last site touched by any window of this rule.
    pub fn last_site(&self) -> usize {
        self.range.last() + self.window - 1
    }
}
