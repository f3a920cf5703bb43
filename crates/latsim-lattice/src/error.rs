//! Error types for lattice construction.

use std::fmt;

/// Errors arising from lattice construction, power-table sizing, or
/// binding rules to a lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Attempted to construct a lattice with zero sites.
    EmptyLattice,
    /// Attempted to construct a lattice over an empty alphabet.
    NoStates,
    /// An initial site value is not in `[0, nstates)`.
    ValueOutOfRange {
        /// 0-indexed site.
        site: usize,
        /// The offending value.
        value: usize,
        /// Alphabet size.
        nstates: usize,
    },
    /// `nstates^window` does not fit in a `usize`.
    WindowTooWide {
        /// The requested window.
        window: usize,
    },
    /// A window span `[first, last]` does not lie inside `[0, len)`.
    SpanOutOfBounds {
        /// First site of the span.
        first: usize,
        /// Last site of the span.
        last: usize,
        /// Lattice length.
        len: usize,
    },
    /// A rate table's dimension does not match `nstates^window`.
    CodeCountMismatch {
        /// Window of the rule.
        window: usize,
        /// `nstates^window`.
        expected: usize,
        /// Dimension found.
        found: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLattice => write!(f, "lattice must have at least one site"),
            Self::NoStates => write!(f, "lattice must have at least one state"),
            Self::ValueOutOfRange {
                site,
                value,
                nstates,
            } => write!(f, "site {site} value {value} is outside [0, {nstates})"),
            Self::WindowTooWide { window } => {
                write!(f, "window {window} overflows the local code range")
            }
            Self::SpanOutOfBounds { first, last, len } => {
                write!(f, "span [{first}, {last}] is outside a {len}-site lattice")
            }
            Self::CodeCountMismatch {
                window,
                expected,
                found,
            } => write!(
                f,
                "{window}-site window has {expected} local codes, rate table has {found}"
            ),
        }
    }
}

impl std::error::Error for LatticeError {}
