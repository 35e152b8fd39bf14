//! Core types and numeric helpers for the wallet usability analysis
//!
//! This crate holds the pieces shared by every other crate in the workspace:
//!
//! - [`Error`] and [`Result`]: the error type used by the statistical layer
//! - [`utils`]: slice helpers (mean, median, tie-aware ranking, rounding)
//! - [`math`]: tail probabilities of the normal, χ² and F distributions
//!
//! # Example
//!
//! ```rust
//! use usability_core::utils::{average_ranks, mean};
//! use usability_core::math::distributions::chi_squared;
//!
//! let data = [3.0, 1.0, 2.0, 2.0];
//! assert_eq!(mean(&data), 2.0);
//! assert_eq!(average_ranks(&data), vec![4.0, 1.0, 2.5, 2.5]);
//!
//! let p = chi_squared::sf(0.0, 2.0).unwrap();
//! assert_eq!(p, 1.0);
//! ```

pub mod error;
pub mod math;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};
