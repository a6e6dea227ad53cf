//! Simplex tableau and pivoting.

// Indexed loops are clearer for tableau operations
#![allow(clippy::needless_range_loop)]

use std::fmt;

use super::config::SimplexConfig;
use super::types::VarLabel;
use crate::error::SimplexError;
use crate::problem::{Direction, LpProblem};

/// Solved (or in-progress) state of an LP relaxation.
///
/// Row `i` reads `basic_i = s_i0 - Σ_j a_ij · free_j`, where `s_i0` is the
/// free-term column. The last row is the objective row,
/// `F = s_m0 - Σ_j a_mj · free_j`, so at any basic solution the current
/// value of every basic variable is its free term and the objective value
/// is `s_m0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    /// `(rows + 1) x (free + 1)`; column 0 is the free term.
    table: Vec<Vec<f64>>,
    /// Row labels (basic variables).
    basic: Vec<VarLabel>,
    /// Column labels (free variables), excluding the free-term column.
    free: Vec<VarLabel>,
}

impl Tableau {
    /// Builds the initial tableau: slacks basic, decision variables free.
    pub fn new(problem: &LpProblem) -> Result<Self, SimplexError> {
        let n = problem.num_vars();
        let m = problem.num_constraints();
        if problem.b.len() != m {
            return Err(SimplexError::Malformed(format!(
                "{m} constraint rows but {} right-hand side entries",
                problem.b.len()
            )));
        }

        let mut table = Vec::with_capacity(m + 1);
        for (row, &rhs) in problem.a.iter().zip(&problem.b) {
            if row.len() != n {
                return Err(SimplexError::Malformed(format!(
                    "constraint row has {} coefficients, expected {n}",
                    row.len()
                )));
            }
            let mut line = Vec::with_capacity(n + 1);
            line.push(rhs);
            line.extend_from_slice(row);
            table.push(line);
        }

        let mut objective = Vec::with_capacity(n + 1);
        objective.push(0.0);
        objective.extend(problem.c.iter().map(|&c| -c));
        table.push(objective);

        Ok(Self {
            table,
            basic: (n..n + m).map(VarLabel::Slack).collect(),
            free: (0..n).map(VarLabel::Decision).collect(),
        })
    }

    /// Builds a tableau already sitting at a given basic solution.
    ///
    /// Only the free-term column is populated; there are no free columns,
    /// so no further pivoting is possible. Useful for solvers that compute
    /// the optimum by other means, and for tests.
    pub fn from_basis(rows: Vec<(VarLabel, f64)>, objective: f64) -> Self {
        let mut table: Vec<Vec<f64>> = rows.iter().map(|&(_, v)| vec![v]).collect();
        table.push(vec![objective]);
        Self {
            table,
            basic: rows.into_iter().map(|(label, _)| label).collect(),
            free: Vec::new(),
        }
    }

    /// Number of constraint rows (excluding the objective row).
    pub fn num_rows(&self) -> usize {
        self.basic.len()
    }

    /// Label of the basic variable in `row`.
    pub fn label(&self, row: usize) -> VarLabel {
        self.basic[row]
    }

    /// Current value of the basic variable in `row`.
    pub fn value(&self, row: usize) -> f64 {
        self.table[row][0] + 0.0
    }

    /// Current objective value.
    pub fn objective(&self) -> f64 {
        self.table[self.num_rows()][0] + 0.0
    }

    /// Labels of the free (non-basic) columns.
    pub fn free_labels(&self) -> &[VarLabel] {
        &self.free
    }

    /// `(label, value)` of every basic row, in row order.
    pub fn rows(&self) -> impl Iterator<Item = (VarLabel, f64)> + '_ {
        (0..self.num_rows()).map(move |i| (self.label(i), self.value(i)))
    }

    /// Values of the first `n` decision variables.
    ///
    /// Decision variables outside the basis are zero.
    pub fn decision_values(&self, n: usize) -> Vec<f64> {
        let mut values = vec![0.0; n];
        for (label, value) in self.rows() {
            if let VarLabel::Decision(j) = label {
                if j < n {
                    values[j] = value;
                }
            }
        }
        values
    }

    /// Jordan-exception pivot on `(row, col)`; `col` indexes free columns.
    ///
    /// Swaps the row's basic variable with the column's free variable.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let k = col + 1;
        let p = self.table[row][k];
        let width = self.table[row].len();
        let pivot_row: Vec<f64> = self.table[row].clone();

        for i in 0..self.table.len() {
            if i == row {
                continue;
            }
            let factor = self.table[i][k];
            for j in 0..width {
                if j == k {
                    self.table[i][j] = -factor / p;
                } else {
                    self.table[i][j] -= factor * pivot_row[j] / p;
                }
            }
        }
        for j in 0..width {
            self.table[row][j] = if j == k { 1.0 / p } else { pivot_row[j] / p };
        }

        std::mem::swap(&mut self.basic[row], &mut self.free[col]);
    }

    /// Pivots until every free term is non-negative.
    ///
    /// Returns the number of pivots performed. Fails with
    /// [`SimplexError::Infeasible`] when a negative row has no negative
    /// coefficient to pivot on.
    pub fn reference_solution(&mut self, config: &SimplexConfig) -> Result<usize, SimplexError> {
        let tol = config.pivot_tolerance;
        let m = self.num_rows();

        for iteration in 0..=config.max_iterations {
            let Some(i) = (0..m).find(|&i| self.table[i][0] < -tol) else {
                return Ok(iteration);
            };
            if iteration == config.max_iterations {
                break;
            }

            let Some(col) = (0..self.free.len()).find(|&j| self.table[i][j + 1] < -tol) else {
                return Err(SimplexError::Infeasible { row: i });
            };

            let mut best: Option<(usize, f64)> = None;
            for r in 0..m {
                let s = self.table[r][0];
                let a = self.table[r][col + 1];
                let blocking = (s >= 0.0 && a > tol) || (s < 0.0 && a < -tol);
                if !blocking {
                    continue;
                }
                let ratio = s / a;
                if best.map_or(true, |(_, b)| ratio < b) {
                    best = Some((r, ratio));
                }
            }
            // Row `i` itself always blocks, so a candidate exists.
            let (r, _) = best.unwrap_or((i, 0.0));
            log::trace!("reference pivot: row {} ({}), column {}", r, self.basic[r], self.free[col]);
            self.pivot(r, col);
        }

        Err(SimplexError::IterationLimit {
            limit: config.max_iterations,
        })
    }

    /// Pivots a feasible tableau to optimality for `direction`.
    ///
    /// Returns the number of pivots performed. Fails with
    /// [`SimplexError::Unbounded`] when an improving column has no blocking
    /// row.
    pub fn optimal_solution(
        &mut self,
        direction: Direction,
        config: &SimplexConfig,
    ) -> Result<usize, SimplexError> {
        let tol = config.pivot_tolerance;
        let m = self.num_rows();

        for iteration in 0..=config.max_iterations {
            let Some(col) = self.entering_column(direction, tol) else {
                return Ok(iteration);
            };
            if iteration == config.max_iterations {
                break;
            }

            let mut best: Option<(usize, f64)> = None;
            for r in 0..m {
                let a = self.table[r][col + 1];
                if a <= tol {
                    continue;
                }
                let ratio = self.table[r][0] / a;
                if best.map_or(true, |(_, b)| ratio < b) {
                    best = Some((r, ratio));
                }
            }
            let Some((r, _)) = best else {
                return Err(SimplexError::Unbounded {
                    column: self.free[col].to_string(),
                });
            };
            log::trace!("optimal pivot: row {} ({}), column {}", r, self.basic[r], self.free[col]);
            self.pivot(r, col);
        }

        Err(SimplexError::IterationLimit {
            limit: config.max_iterations,
        })
    }

    /// Most improving objective-row column, first on ties.
    fn entering_column(&self, direction: Direction, tol: f64) -> Option<usize> {
        let objective = &self.table[self.num_rows()];
        let mut best: Option<(usize, f64)> = None;
        for j in 0..self.free.len() {
            let a = objective[j + 1];
            let improving = match direction {
                Direction::Max => a < -tol,
                Direction::Min => a > tol,
            };
            if improving && best.map_or(true, |(_, b)| a.abs() > b) {
                best = Some((j, a.abs()));
            }
        }
        best.map(|(j, _)| j)
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}{:>10}", "", "S0")?;
        for label in &self.free {
            write!(f, "{:>10}", label.to_string())?;
        }
        writeln!(f)?;
        for (i, line) in self.table.iter().enumerate() {
            let name = match self.basic.get(i) {
                Some(label) => label.to_string(),
                None => "F".to_string(),
            };
            write!(f, "{name:>6}")?;
            for v in line {
                write!(f, "{:>10.3}", v + 0.0)?;
            }
            if i < self.table.len() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
