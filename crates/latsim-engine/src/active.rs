//! Slot storage for the active-transition set.
//!
//! [`ActiveSet`] keeps every live [`ActiveTransition`] in a slot vector.
//! Freed slots go on a free list and are handed out again by the next
//! insertion, so a long run settles into a fixed number of slots. Each
//! start position has a bucket of the slot ids whose window begins there,
//! which bounds removal of a dirty span to the buckets that can overlap it.

use smallvec::SmallVec;

use crate::transitions::ActiveTransition;

type Bucket = SmallVec<[usize; 4]>;

#[derive(Clone, Debug)]
pub(crate) struct ActiveSet {
    /// All slots (live and freed).
    slots: Vec<Option<ActiveTransition>>,
    /// Indices of freed slots available for reuse.
    free_list: Vec<usize>,
    /// Slot ids keyed by window start position.
    buckets: Vec<Bucket>,
    max_window: usize,
    live: usize,
    peak_live: usize,
    exit_rate: f64,
}

impl ActiveSet {
    /// Empty set over a lattice of `len` sites whose widest window is `max_window`.
    pub(crate) fn new(len: usize, max_window: usize) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            buckets: vec![Bucket::new(); len],
            max_window: max_window.max(1),
            live: 0,
            peak_live: 0,
            exit_rate: 0.0,
        }
    }

    pub(crate) fn insert(&mut self, transition: ActiveTransition) {
        debug_assert!(transition.rate > 0.0);
        let id = match self.free_list.pop() {
            Some(id) => {
                self.slots[id] = Some(transition);
                id
            }
            None => {
                self.slots.push(Some(transition));
                self.slots.len() - 1
            }
        };
        self.buckets[transition.position].push(id);
        self.exit_rate += transition.rate;
        self.live += 1;
        self.peak_live = self.peak_live.max(self.live);
    }

    /// Remove every transition whose span intersects sites `[lo, hi]`.
    ///
    /// Returns the number removed.
    pub(crate) fn remove_overlapping(&mut self, lo: usize, hi: usize) -> usize {
        let start = (lo + 1).saturating_sub(self.max_window);
        let Self {
            slots,
            free_list,
            buckets,
            live,
            exit_rate,
            ..
        } = self;

        let mut removed = 0;
        for bucket in &mut buckets[start..=hi] {
            bucket.retain(|id| {
                let id = *id;
                match slots[id] {
                    Some(t) if t.overlaps(lo, hi) => {
                        *exit_rate -= t.rate;
                        slots[id] = None;
                        free_list.push(id);
                        removed += 1;
                        false
                    }
                    _ => true,
                }
            });
        }
        *live -= removed;
        if *live == 0 {
            // No transitions left: drop accumulated rounding drift.
            *exit_rate = 0.0;
        }
        removed
    }

    /// First transition, in slot order, whose cumulative rate exceeds `r`.
    ///
    /// Falls back to the last live transition when rounding leaves `r` at
    /// or above the accumulated total.
    pub(crate) fn select(&self, r: f64) -> Option<ActiveTransition> {
        let mut acc = 0.0;
        let mut last = None;
        for t in self.iter() {
            acc += t.rate;
            if acc > r {
                return Some(*t);
            }
            last = Some(*t);
        }
        last
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ActiveTransition> {
        self.slots.iter().flatten()
    }

    pub(crate) fn exit_rate(&self) -> f64 {
        self.exit_rate
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn peak_len(&self) -> usize {
        self.peak_live
    }

    /// Total slots (live + freed).
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn free_count(&self) -> usize {
        self.free_list.len()
    }
}
