//! Small integer linear programs solved by branch-and-bound.
//!
//! Solves problems of the form
//!
//! ```text
//! max | min   c·x
//! subject to  A x <= b,  x >= 0,  x integer
//! ```
//!
//! - [`problem`] (Problem model): [`LpProblem`](problem::LpProblem),
//!   direction, JSON input record.
//! - [`simplex`] (LP relaxation): tableau simplex behind the
//!   [`LpSolver`](simplex::LpSolver) trait.
//! - [`bnb`] (Branch-and-Bound): depth-first splitting on the first
//!   fractional variable, per-branch pruning of infeasible or unbounded
//!   subproblems, best-of-pool selection.
//! - [`brute`] (Brute force): exhaustive enumeration oracle.
//! - [`generate`] (Instances): seeded random bounded programs.
//!
//! # Example
//!
//! ```
//! use u_ilp::bnb::{BnbConfig, BnbRunner};
//! use u_ilp::problem::ProblemFile;
//!
//! let problem = ProblemFile::from_json_str(r#"{
//!     "obj_func_coffs": [5, 8],
//!     "constraint_system_lhs": [[1, 1], [5, 9]],
//!     "constraint_system_rhs": [6, 45],
//!     "func_direction": "max"
//! }"#)?.into_problem()?;
//!
//! let result = BnbRunner::run(&problem, &BnbConfig::default())?;
//! assert_eq!(result.best.objective, 40.0);
//! # Ok::<(), u_ilp::error::IlpError>(())
//! ```

pub mod bnb;
pub mod brute;
pub mod error;
pub mod generate;
pub mod problem;
pub mod report;
pub mod simplex;

pub use error::{IlpError, IlpResult, SimplexError};
