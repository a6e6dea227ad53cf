//! LP relaxation solver (tableau simplex).
//!
//! Solves the continuous relaxation of an [`LpProblem`](crate::problem::LpProblem)
//! with the textbook tableau method and Jordan-exception pivoting:
//!
//! 1. **Reference solution**: pivot negative free terms away until the
//!    basic solution is feasible, or report [`SimplexError::Infeasible`].
//! 2. **Optimal solution**: pivot on improving objective-row columns until
//!    none remain, or report [`SimplexError::Unbounded`].
//!
//! The branch-and-bound search only talks to this module through the
//! [`LpSolver`] trait and the read API of [`Tableau`].
//!
//! [`SimplexError::Infeasible`]: crate::error::SimplexError::Infeasible
//! [`SimplexError::Unbounded`]: crate::error::SimplexError::Unbounded
//!
//! # References
//!
//! Dantzig (1963), "Linear Programming and Extensions"

mod config;
mod solver;
mod tableau;
mod types;

pub use config::SimplexConfig;
pub use solver::SimplexSolver;
pub use tableau::Tableau;
pub use types::{LpSolver, VarLabel};
