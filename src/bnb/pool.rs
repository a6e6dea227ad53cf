//! Integer-feasible leaves and best-solution selection.

use serde::Serialize;

use crate::error::{IlpError, IlpResult};
use crate::problem::Direction;
use crate::simplex::Tableau;

/// An integer-feasible leaf: objective value and decision variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Objective value at the leaf.
    pub objective: f64,
    /// Decision variable values, `x1..xn`.
    pub values: Vec<f64>,
}

impl Solution {
    /// Creates a solution.
    pub fn new(objective: f64, values: Vec<f64>) -> Self {
        Self { objective, values }
    }

    /// Reads the objective and the first `num_vars` decision variables.
    pub fn from_tableau(tableau: &Tableau, num_vars: usize) -> Self {
        Self {
            objective: tableau.objective(),
            values: tableau.decision_values(num_vars),
        }
    }
}

/// Append-only, ordered collection of integer-feasible leaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPool {
    solutions: Vec<Solution>,
}

impl SolutionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a leaf.
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Appends every leaf of `other`, preserving its order.
    pub fn append(&mut self, other: SolutionPool) {
        self.solutions.extend(other.solutions);
    }

    /// Number of recorded leaves.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether no leaf was recorded.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Leaves in discovery order.
    pub fn as_slice(&self) -> &[Solution] {
        &self.solutions
    }

    /// Consumes the pool into its leaves.
    pub fn into_vec(self) -> Vec<Solution> {
        self.solutions
    }

    /// Best leaf for `direction`; the first one wins ties.
    ///
    /// Fails with [`IlpError::EmptyPool`] when no leaf was recorded.
    pub fn best(&self, direction: Direction) -> IlpResult<&Solution> {
        best(&self.solutions, direction)
    }
}

impl FromIterator<Solution> for SolutionPool {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}

/// Linear scan for the strictly best objective; the first one wins ties.
pub fn best(solutions: &[Solution], direction: Direction) -> IlpResult<&Solution> {
    let mut iter = solutions.iter();
    let mut chosen = iter.next().ok_or(IlpError::EmptyPool)?;
    for candidate in iter {
        if direction.improves(candidate.objective, chosen.objective) {
            chosen = candidate;
        }
    }
    Ok(chosen)
}
