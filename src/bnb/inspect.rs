//! Read-only predicates over a solved tableau.

use super::config::Integrality;
use crate::simplex::{Tableau, VarLabel};

/// A fractional decision variable chosen to split the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchVariable {
    /// 0-based decision variable index.
    pub index: usize,
    /// Tableau row the variable was read from.
    pub row: usize,
    /// Its fractional relaxed value.
    pub value: f64,
}

/// Whether every decision variable in the basis is integral.
///
/// Slack rows are ignored; decision variables outside the basis are zero
/// and therefore integral.
pub fn is_integer_feasible(tableau: &Tableau, integrality: Integrality) -> bool {
    tableau
        .rows()
        .filter(|(label, _)| label.is_decision())
        .all(|(_, value)| integrality.is_integral(value))
}

/// The first decision-variable row, in row order, with a fractional value.
///
/// Returns `None` exactly when [`is_integer_feasible`] holds. The row-order
/// tie-break keeps search trees reproducible.
pub fn select_branch_variable(tableau: &Tableau, integrality: Integrality) -> Option<BranchVariable> {
    tableau.rows().enumerate().find_map(|(row, (label, value))| match label {
        VarLabel::Decision(index) if !integrality.is_integral(value) => Some(BranchVariable {
            index,
            row,
            value,
        }),
        _ => None,
    })
}
