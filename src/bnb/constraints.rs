//! Extra branching constraints accumulated along one search path.

use std::fmt;

/// One `coefficients · x <= bound` row added by branching.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraConstraint {
    /// One coefficient per decision variable.
    pub coefficients: Vec<f64>,
    /// Right-hand side.
    pub bound: f64,
}

impl ExtraConstraint {
    /// `x_var <= bound` (the down branch).
    pub fn upper(var: usize, bound: f64, num_vars: usize) -> Self {
        let mut coefficients = vec![0.0; num_vars];
        coefficients[var] = 1.0;
        Self {
            coefficients,
            bound,
        }
    }

    /// `x_var >= bound`, stored as `-x_var <= -bound` (the up branch).
    pub fn lower(var: usize, bound: f64, num_vars: usize) -> Self {
        let mut coefficients = vec![0.0; num_vars];
        coefficients[var] = -1.0;
        Self {
            coefficients,
            bound: -bound,
        }
    }

    /// The row as a `(coefficients, bound)` pair.
    pub fn as_row(&self) -> (&[f64], f64) {
        (&self.coefficients, self.bound)
    }
}

impl fmt::Display for ExtraConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonzero: Vec<(usize, f64)> = self
            .coefficients
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, c)| c != 0.0)
            .collect();
        match nonzero.as_slice() {
            [(j, c)] if *c == 1.0 => write!(f, "x{} <= {}", j + 1, self.bound),
            [(j, c)] if *c == -1.0 => write!(f, "x{} >= {}", j + 1, -self.bound + 0.0),
            _ => {
                let terms: Vec<String> = nonzero
                    .iter()
                    .map(|(j, c)| format!("{c}*x{}", j + 1))
                    .collect();
                write!(f, "{} <= {}", terms.join(" + "), self.bound)
            }
        }
    }
}

/// Ordered extra rows valid for the current search node.
///
/// The search pushes one row before exploring a child and pops it after,
/// so a sibling never sees constraints from the branch explored before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraConstraintSet {
    rows: Vec<ExtraConstraint>,
}

impl ExtraConstraintSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row for the branch about to be explored.
    pub fn push(&mut self, constraint: ExtraConstraint) {
        self.rows.push(constraint);
    }

    /// Removes and returns the most recent row.
    pub fn pop(&mut self) -> Option<ExtraConstraint> {
        self.rows.pop()
    }

    /// Number of rows, equal to the depth of the current node.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set holds no rows (the root).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtraConstraint> {
        self.rows.iter()
    }

    /// Rows as a slice.
    pub fn as_slice(&self) -> &[ExtraConstraint] {
        &self.rows
    }

    /// `(coefficients, bound)` pairs, ready for
    /// [`LpProblem::with_extra_rows`](crate::problem::LpProblem::with_extra_rows).
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], f64)> {
        self.rows.iter().map(ExtraConstraint::as_row)
    }
}

impl<'a> IntoIterator for &'a ExtraConstraintSet {
    type Item = &'a ExtraConstraint;
    type IntoIter = std::slice::Iter<'a, ExtraConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
