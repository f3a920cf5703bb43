//! Lattice storage for latsim simulations.
//!
//! [`LatticeState`] owns the site values of a finite one-dimensional
//! lattice and encodes contiguous windows of sites as base-`nstates`
//! integers ("local codes"), which is how transition rules address
//! local configurations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;

pub use error::LatticeError;
pub use lattice::LatticeState;
