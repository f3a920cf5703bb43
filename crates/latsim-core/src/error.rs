//! Configuration error types.
//!
//! Every failure is detected eagerly by
//! [`SimConfig::validate()`](crate::SimConfig::validate) before the first
//! simulation step. Rule-level variants carry the index of the offending
//! entry in the `transitions` list.

use std::error::Error;
use std::fmt;

/// Errors detected while validating a [`SimConfig`](crate::SimConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `L` or `nstates` is zero.
    NonPositiveDimension {
        /// Which dimension (`"L"` or `"nstates"`).
        name: &'static str,
    },
    /// `tMax` or `tSkip` is negative, NaN, or infinite.
    InvalidDuration {
        /// Which duration (`"tMax"` or `"tSkip"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An initial site value is not a valid state.
    InitialStateOutOfRange {
        /// 0-indexed site.
        site: usize,
        /// The rejected value.
        value: usize,
        /// Alphabet size.
        nstates: usize,
    },
    /// The `transitions` list is empty.
    NoTransitions,
    /// A rule's window is zero, or `nstates^window` overflows.
    InvalidWindow {
        /// Index of the rule.
        rule: usize,
        /// The rejected window.
        window: usize,
    },
    /// A rule's `from`/`to` range is invalid for the lattice length.
    RuleRange {
        /// Index of the rule.
        rule: usize,
        /// What went wrong.
        reason: String,
    },
    /// A rule's rate matrix is not `K×K` with `K = nstates^window`.
    RateMatrixShape {
        /// Index of the rule.
        rule: usize,
        /// Expected dimension `K`.
        expected: usize,
        /// Offending row, or `None` if the row count itself is wrong.
        row: Option<usize>,
        /// Dimension actually found.
        found: usize,
    },
    /// An off-diagonal rate is negative or not finite.
    InvalidRate {
        /// Index of the rule.
        rule: usize,
        /// Target local code (matrix row).
        target: usize,
        /// Source local code (matrix column).
        source: usize,
        /// The rejected rate.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { name } => {
                write!(f, "{name} must be greater than zero")
            }
            Self::InvalidDuration { name, value } => {
                write!(f, "{name} must be finite and >= 0, got {value}")
            }
            Self::InitialStateOutOfRange {
                site,
                value,
                nstates,
            } => write!(
                f,
                "initialState[{site}] = {value} is not a state in [0, {nstates})"
            ),
            Self::NoTransitions => write!(f, "some transitions must be specified"),
            Self::InvalidWindow { rule, window } => {
                write!(f, "transitions[{rule}]: window {window} is invalid")
            }
            Self::RuleRange { rule, reason } => {
                write!(f, "transitions[{rule}]: invalid range: {reason}")
            }
            Self::RateMatrixShape {
                rule,
                expected,
                row,
                found,
            } => match row {
                Some(row) => write!(
                    f,
                    "transitions[{rule}]: rates[{row}] has {found} entries, expected {expected}"
                ),
                None => write!(
                    f,
                    "transitions[{rule}]: rates has {found} rows, expected {expected}"
                ),
            },
            Self::InvalidRate {
                rule,
                target,
                source,
                value,
            } => write!(
                f,
                "transitions[{rule}]: rates[{target}][{source}] = {value} must be finite and >= 0"
            ),
        }
    }
}

impl Error for ConfigError {}

impl ConfigError {
    /// Index of the rule this error refers to, if it is rule-specific.
    pub fn rule(&self) -> Option<usize> {
        match self {
            Self::InvalidWindow { rule, .. }
            | Self::RuleRange { rule, .. }
            | Self::RateMatrixShape { rule, .. }
            | Self::InvalidRate { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}
