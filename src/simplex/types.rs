//! Solver seam and variable labels.

use std::fmt;

use super::tableau::Tableau;
use crate::error::SimplexError;
use crate::problem::LpProblem;

/// Label of a tableau row or column.
///
/// Indices are absolute and 0-based: with `n` decision variables,
/// `Decision(0..n)` are the original variables and `Slack(n..n+m)` the
/// slack variables of the `m` constraint rows. Both render as `x{index+1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarLabel {
    /// An original decision variable.
    Decision(usize),
    /// A slack variable introduced for a `<=` row.
    Slack(usize),
}

impl VarLabel {
    /// Whether this label names an original decision variable.
    pub fn is_decision(self) -> bool {
        matches!(self, VarLabel::Decision(_))
    }

    /// Absolute 0-based variable index.
    pub fn index(self) -> usize {
        match self {
            VarLabel::Decision(i) | VarLabel::Slack(i) => i,
        }
    }
}

impl fmt::Display for VarLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.index() + 1)
    }
}

/// Solves LP relaxations for the branch-and-bound search.
///
/// Implementors return the solved (optimal) tableau, or a classified
/// [`SimplexError`]. The search treats every error at a branch node as
/// "prune this branch".
pub trait LpSolver: Send + Sync {
    /// Solves the relaxation of `problem` to optimality.
    fn solve(&self, problem: &LpProblem) -> Result<Tableau, SimplexError>;
}
