//! Error types for LP relaxation and integer search.

use thiserror::Error;

/// Failure of a single LP relaxation solve.
///
/// Raised by an [`LpSolver`](crate::simplex::LpSolver). Inside the
/// branch-and-bound search these are caught per branch and turn into
/// pruning; only at the root do they reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    /// No basic feasible solution exists for the constraint system.
    #[error("LP relaxation is infeasible: no feasible basic solution (row {row})")]
    Infeasible {
        /// Tableau row whose free term could not be made non-negative.
        row: usize,
    },

    /// The objective grows without bound on the feasible region.
    #[error("LP relaxation is unbounded: objective unbounded along {column}")]
    Unbounded {
        /// Label of the entering variable with no blocking row.
        column: String,
    },

    /// Pivoting did not terminate within the configured iteration budget.
    #[error("simplex exceeded {limit} pivots without terminating")]
    IterationLimit {
        /// The configured pivot budget.
        limit: usize,
    },

    /// The LP handed to the solver has inconsistent dimensions.
    #[error("malformed LP: {0}")]
    Malformed(String),
}

/// Errors surfaced by the public solving entry points.
#[derive(Error, Debug)]
pub enum IlpError {
    /// Structural input error, detected before any solving.
    #[error("malformed problem: {0}")]
    MalformedProblem(String),

    /// The root LP relaxation has no feasible point.
    #[error("problem has no feasible solution: {0}")]
    Infeasible(SimplexError),

    /// The root LP relaxation is unbounded.
    #[error("problem objective is unbounded: {0}")]
    Unbounded(SimplexError),

    /// Any other root relaxation failure.
    #[error("LP relaxation failed: {0}")]
    Simplex(SimplexError),

    /// The search finished without a single integer-feasible leaf.
    #[error("no integer solution exists within the explored region")]
    EmptyPool,

    /// Invalid solver configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Problem file could not be parsed.
    #[error("failed to parse problem: {0}")]
    Parse(#[from] serde_json::Error),

    /// Problem file could not be read.
    #[error("failed to read problem file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SimplexError> for IlpError {
    fn from(err: SimplexError) -> Self {
        match err {
            SimplexError::Infeasible { .. } => IlpError::Infeasible(err),
            SimplexError::Unbounded { .. } => IlpError::Unbounded(err),
            SimplexError::Malformed(msg) => IlpError::MalformedProblem(msg),
            SimplexError::IterationLimit { .. } => IlpError::Simplex(err),
        }
    }
}

/// Result type for integer programming operations.
pub type IlpResult<T> = Result<T, IlpError>;
