//! Tableau simplex solver.

use super::config::SimplexConfig;
use super::tableau::Tableau;
use super::types::LpSolver;
use crate::error::SimplexError;
use crate::problem::LpProblem;

/// Two-phase tableau simplex: reference solution, then optimal solution.
///
/// # Examples
///
/// ```
/// use u_ilp::problem::{Direction, LpProblem};
/// use u_ilp::simplex::{LpSolver, SimplexSolver};
///
/// let problem = LpProblem::new(
///     vec![2.0, 3.0],
///     vec![vec![1.0, 1.0], vec![1.0, 0.0]],
///     vec![4.0, 3.0],
///     Direction::Max,
/// ).unwrap();
/// let tableau = SimplexSolver::default().solve(&problem).unwrap();
/// assert_eq!(tableau.objective(), 12.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimplexSolver {
    config: SimplexConfig,
}

impl SimplexSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SimplexConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SimplexConfig {
        &self.config
    }
}

impl LpSolver for SimplexSolver {
    fn solve(&self, problem: &LpProblem) -> Result<Tableau, SimplexError> {
        let mut tableau = Tableau::new(problem)?;
        let reference_pivots = tableau.reference_solution(&self.config)?;
        let optimal_pivots = tableau.optimal_solution(problem.direction, &self.config)?;
        log::trace!(
            "LP solved with {} reference and {} optimal pivots, F = {}",
            reference_pivots,
            optimal_pivots,
            tableau.objective()
        );
        Ok(tableau)
    }
}
