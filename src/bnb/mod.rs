//! Branch-and-Bound (B&B) over LP relaxations.
//!
//! Solves an integer linear program by recursively splitting the feasible
//! region on a fractional decision variable. Each split adds one bound
//! row (`x_k <= floor(v)` on the down branch, `x_k >= ceil(v)` on the up
//! branch), re-solves the LP relaxation of each half, and collects every
//! integer-feasible leaf into a [`SolutionPool`] from which the best is
//! selected.
//!
//! # Key Components
//!
//! - **Inspector**: [`is_integer_feasible`], [`select_branch_variable`]
//! - **Constraint bookkeeping**: [`ExtraConstraintSet`] (push/pop per branch)
//! - **Engine**: [`BnbRunner`] with [`BnbConfig`]
//! - **Selection**: [`SolutionPool::best`]
//!
//! A child whose relaxation is infeasible or unbounded is pruned locally;
//! the sibling is still explored. Only root failures and an empty pool
//! reach the caller.
//!
//! # References
//!
//! Land & Doig (1960), "An Automatic Method of Solving Discrete
//! Programming Problems", *Econometrica* 28(3), 497-520.

mod config;
mod constraints;
mod inspect;
mod pool;
mod runner;

pub use config::{BnbConfig, Integrality};
pub use constraints::{ExtraConstraint, ExtraConstraintSet};
pub use inspect::{is_integer_feasible, select_branch_variable, BranchVariable};
pub use pool::{best, Solution, SolutionPool};
pub use runner::{BnbResult, BnbRunner, BnbStats};
