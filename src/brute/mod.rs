//! Brute-force enumeration.
//!
//! Checks every integer point of the box `{0..=U}^n` against the
//! constraints and keeps the best feasible one. Exponential in `n`; meant
//! as a correctness oracle for [`bnb`](crate::bnb) on small instances.

mod config;
mod runner;

pub use config::BruteForceConfig;
pub use runner::{BruteForceResult, BruteForceRunner};
