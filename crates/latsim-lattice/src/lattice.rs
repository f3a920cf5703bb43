//! Finite 1D lattice with base-`nstates` window codes.

use crate::error::LatticeError;
use std::fmt;

/// Site values of a finite one-dimensional lattice.
///
/// Each site `i` in `[0, len)` holds a value in `[0, nstates)`. A window
/// of `w` sites starting at `i` is encoded most-significant digit first:
/// `value[i] * nstates^(w-1) + ... + value[i+w-1]`.
///
/// Decoding windows wider than one site needs a power table, sized with
/// [`set_max_window`](Self::set_max_window) whenever the largest window in
/// use changes.
///
/// # Examples
///
/// ```
/// use latsim_lattice::LatticeState;
///
/// let mut lattice = LatticeState::new(5, 2, &[1, 0, 1]).unwrap();
/// lattice.set_max_window(2).unwrap();
/// assert_eq!(lattice.to_string(), "10100");
///
/// // Sites 0 and 1 read "10" = 2.
/// assert_eq!(lattice.window_code(0, 2), 2);
///
/// // Rewrite them to "01".
/// lattice.write_window(1, 0, 2);
/// assert_eq!(lattice.to_string(), "01100");
/// assert_eq!(lattice.count_of_state(1), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeState {
    sites: Vec<usize>,
    nstates: usize,
    // powers[k] = nstates^k for k < max window.
    powers: Vec<usize>,
}

impl LatticeState {
    /// Create a lattice of `length` sites over `nstates` states.
    ///
    /// `initial` is copied into the leading sites; if it is shorter than
    /// `length` the remaining sites are zero, if longer it is truncated.
    /// The power table initially covers single-site windows only.
    pub fn new(length: usize, nstates: usize, initial: &[usize]) -> Result<Self, LatticeError> {
        let mut sites = vec![0; length];
        let n = initial.len().min(length);
        sites[..n].copy_from_slice(&initial[..n]);
        Self::from_sites(sites, nstates)
    }

    /// Create a lattice from its complete site contents.
    pub fn from_sites(sites: Vec<usize>, nstates: usize) -> Result<Self, LatticeError> {
        if sites.is_empty() {
            return Err(LatticeError::EmptyLattice);
        }
        if nstates == 0 {
            return Err(LatticeError::NoStates);
        }
        if let Some((site, &value)) = sites.iter().enumerate().find(|&(_, &v)| v >= nstates) {
            return Err(LatticeError::ValueOutOfRange {
                site,
                value,
                nstates,
            });
        }
        Ok(Self {
            sites,
            nstates,
            powers: vec![1],
        })
    }

    /// Rebuild the power table to cover windows up to `window` sites.
    pub fn set_max_window(&mut self, window: usize) -> Result<(), LatticeError> {
        let window = window.max(1);
        u32::try_from(window)
            .ok()
            .and_then(|w| self.nstates.checked_pow(w))
            .ok_or(LatticeError::WindowTooWide { window })?;

        self.powers.clear();
        self.powers.push(1);
        for k in 1..window {
            let prev = self.powers[k - 1];
            self.powers.push(prev * self.nstates);
        }
        Ok(())
    }

    /// Widest window the power table covers.
    pub fn max_window(&self) -> usize {
        self.powers.len()
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always returns `false`; construction rejects empty lattices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Alphabet size.
    pub fn nstates(&self) -> usize {
        self.nstates
    }

    /// All site values, left to right.
    pub fn sites(&self) -> &[usize] {
        &self.sites
    }

    /// Value at site `i`.
    pub fn value_at(&self, i: usize) -> usize {
        self.sites[i]
    }

    /// Local code of the `window` sites starting at `i`.
    ///
    /// Requires `i + window <= len()`.
    pub fn window_code(&self, i: usize, window: usize) -> usize {
        debug_assert!(window >= 1 && i + window <= self.sites.len());
        let mut code = self.sites[i];
        for j in 1..window {
            code = self.nstates * code + self.sites[i + j];
        }
        code
    }

    /// Overwrite the `window` sites starting at `i` with the digits of `code`.
    ///
    /// Requires `i + window <= len()`, `window <= max_window()` and
    /// `code < nstates^window`.
    pub fn write_window(&mut self, mut code: usize, i: usize, window: usize) {
        debug_assert!(
            window <= self.powers.len(),
            "window {window} exceeds power table ({})",
            self.powers.len()
        );
        debug_assert!(code / self.powers[window - 1] < self.nstates);
        for j in 0..window {
            let p = self.powers[window - j - 1];
            self.sites[i + j] = code / p;
            code %= p;
        }
    }

    /// Number of sites currently holding `state`.
    pub fn count_of_state(&self, state: usize) -> usize {
        self.sites.iter().filter(|&&v| v == state).count()
    }

    /// Number of sites holding each state, indexed by state.
    pub fn state_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.nstates];
        for &v in &self.sites {
            counts[v] += 1;
        }
        counts
    }
}

/// Compact rendering: one digit per site, no separators.
impl fmt::Display for LatticeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.sites {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
