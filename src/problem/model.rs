//! Problem model and structural validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IlpError, IlpResult};

/// Optimization direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Maximize the objective.
    Max,
    /// Minimize the objective.
    Min,
}

impl Direction {
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Max => candidate > incumbent,
            Direction::Min => candidate < incumbent,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Max => write!(f, "max"),
            Direction::Min => write!(f, "min"),
        }
    }
}

/// Immutable description of one linear program.
///
/// The number of decision variables is `c.len()`; it is fixed for the
/// lifetime of the problem and shared by every branch derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LpProblem {
    /// Objective coefficients.
    pub c: Vec<f64>,
    /// Constraint matrix, one row per constraint.
    pub a: Vec<Vec<f64>>,
    /// Right-hand side, one entry per constraint.
    pub b: Vec<f64>,
    /// Optimization direction.
    pub direction: Direction,
}

impl LpProblem {
    /// Creates a root problem, rejecting malformed input.
    ///
    /// Besides dimension checks, a root system with more constraints than
    /// variables is rejected as over-determined.
    pub fn new(
        c: Vec<f64>,
        a: Vec<Vec<f64>>,
        b: Vec<f64>,
        direction: Direction,
    ) -> IlpResult<Self> {
        let problem = Self { c, a, b, direction };
        problem.validate_root()?;
        Ok(problem)
    }

    /// Checks a problem that is about to be solved as a search root.
    ///
    /// Runs [`validate`](Self::validate) and rejects systems with more
    /// constraints than variables.
    pub fn validate_root(&self) -> IlpResult<()> {
        self.validate()?;
        if self.a.len() > self.c.len() {
            return Err(IlpError::MalformedProblem(format!(
                "over-determined system: {} constraints for {} variables",
                self.a.len(),
                self.c.len()
            )));
        }
        Ok(())
    }

    /// Checks dimensions and finiteness.
    ///
    /// Does not apply the over-determination rule, which only binds the
    /// root problem.
    pub fn validate(&self) -> IlpResult<()> {
        let n = self.c.len();
        if n == 0 {
            return Err(IlpError::MalformedProblem(
                "objective has no coefficients".into(),
            ));
        }
        if self.a.len() != self.b.len() {
            return Err(IlpError::MalformedProblem(format!(
                "constraint matrix has {} rows but right-hand side has {} entries",
                self.a.len(),
                self.b.len()
            )));
        }
        for (i, row) in self.a.iter().enumerate() {
            if row.len() != n {
                return Err(IlpError::MalformedProblem(format!(
                    "constraint row {} has {} coefficients, expected {n}",
                    i + 1,
                    row.len()
                )));
            }
        }
        let all_finite = self
            .c
            .iter()
            .chain(self.b.iter())
            .chain(self.a.iter().flatten())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(IlpError::MalformedProblem(
                "coefficients must be finite numbers".into(),
            ));
        }
        Ok(())
    }

    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.a.len()
    }

    /// Builds the combined system `original rows ++ extra rows`.
    ///
    /// Used for branch subproblems, which may hold more rows than
    /// variables. Every extra row must have `num_vars()` coefficients.
    pub fn with_extra_rows<'a, I>(&self, extra: I) -> IlpResult<Self>
    where
        I: IntoIterator<Item = (&'a [f64], f64)>,
    {
        let mut combined = self.clone();
        for (row, bound) in extra {
            if row.len() != self.num_vars() {
                return Err(IlpError::MalformedProblem(format!(
                    "extra constraint has {} coefficients, expected {}",
                    row.len(),
                    self.num_vars()
                )));
            }
            combined.a.push(row.to_vec());
            combined.b.push(bound);
        }
        Ok(combined)
    }

    /// Objective value `c·x`.
    pub fn objective_at(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    /// Whether `x` satisfies every row `a_i·x <= b_i`.
    pub fn is_satisfied_by(&self, x: &[f64]) -> bool {
        self.a.iter().zip(&self.b).all(|(row, &rhs)| {
            let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
            lhs <= rhs
        })
    }
}

impl fmt::Display for LpProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F = ")?;
        write_linear(f, &self.c)?;
        writeln!(f, " -> {}", self.direction)?;
        for (row, rhs) in self.a.iter().zip(&self.b) {
            write!(f, "  ")?;
            write_linear(f, row)?;
            writeln!(f, " <= {rhs}")?;
        }
        let vars: Vec<String> = (1..=self.num_vars()).map(|j| format!("x{j}")).collect();
        write!(f, "  {} >= 0, integer", vars.join(", "))
    }
}

fn write_linear(f: &mut fmt::Formatter<'_>, coeffs: &[f64]) -> fmt::Result {
    let mut first = true;
    for (j, &coef) in coeffs.iter().enumerate() {
        if coef == 0.0 {
            continue;
        }
        let sign = if coef < 0.0 { "-" } else { "+" };
        if first {
            if coef < 0.0 {
                write!(f, "-")?;
            }
        } else {
            write!(f, " {sign} ")?;
        }
        write!(f, "{}*x{}", coef.abs(), j + 1)?;
        first = false;
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}
