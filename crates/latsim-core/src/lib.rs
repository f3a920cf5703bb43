//! Core types for the latsim lattice simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the run configuration as read from JSON, the validated form of the
//! local transition rules that drive a simulation, and the configuration
//! error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod rule;

pub use config::{RuleSpec, SimConfig};
pub use error::ConfigError;
pub use rule::{RateMatrix, SiteRange, TransitionRule};
