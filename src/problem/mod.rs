//! Integer linear program description.
//!
//! An [`LpProblem`] holds an objective `c`, a constraint matrix `A`, a
//! right-hand side `b` and a [`Direction`]. Every constraint is in `<=`
//! form and every decision variable is implicitly non-negative:
//!
//! ```text
//! max | min   c·x
//! subject to  A x <= b
//!             x >= 0, x integer
//! ```
//!
//! [`ProblemFile`] is the on-disk JSON record the binary reads.

mod input;
mod model;

pub use input::ProblemFile;
pub use model::{Direction, LpProblem};
