//! JSON problem record.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{Direction, LpProblem};
use crate::error::{IlpError, IlpResult};

/// On-disk problem record.
///
/// ```
/// use u_ilp::problem::ProblemFile;
///
/// let file = ProblemFile::from_json_str(r#"{
///     "obj_func_coffs": [2, 3],
///     "constraint_system_lhs": [[1, 1], [1, 0]],
///     "constraint_system_rhs": [4, 3],
///     "func_direction": "max"
/// }"#).unwrap();
/// let problem = file.into_problem().unwrap();
/// assert_eq!(problem.num_vars(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    /// Objective coefficients `c`.
    pub obj_func_coffs: Vec<f64>,
    /// Constraint matrix `A`.
    pub constraint_system_lhs: Vec<Vec<f64>>,
    /// Right-hand side `b`.
    pub constraint_system_rhs: Vec<f64>,
    /// `"max"` or `"min"`.
    pub func_direction: Direction,
}

impl ProblemFile {
    /// Parses a record from JSON text.
    pub fn from_json_str(text: &str) -> IlpResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a record from a file.
    pub fn load(path: impl AsRef<Path>) -> IlpResult<Self> {
        let path = path.as_ref();
        log::debug!("reading problem from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validates the record and converts it into a root [`LpProblem`].
    pub fn into_problem(self) -> IlpResult<LpProblem> {
        LpProblem::try_from(self)
    }
}

impl TryFrom<ProblemFile> for LpProblem {
    type Error = IlpError;

    fn try_from(file: ProblemFile) -> IlpResult<Self> {
        LpProblem::new(
            file.obj_func_coffs,
            file.constraint_system_lhs,
            file.constraint_system_rhs,
            file.func_direction,
        )
    }
}

impl From<&LpProblem> for ProblemFile {
    fn from(problem: &LpProblem) -> Self {
        Self {
            obj_func_coffs: problem.c.clone(),
            constraint_system_lhs: problem.a.clone(),
            constraint_system_rhs: problem.b.clone(),
            func_direction: problem.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "obj_func_coffs": [3, 1, 3],
        "constraint_system_lhs": [[2, 1, 1], [1, 2, 3], [2, 2, 1]],
        "constraint_system_rhs": [2, 5, 6],
        "func_direction": "max"
    }"#;

    #[test]
    fn test_parse_sample() {
        let file = ProblemFile::from_json_str(SAMPLE).unwrap();
        assert_eq!(file.obj_func_coffs, vec![3.0, 1.0, 3.0]);
        assert_eq!(file.func_direction, Direction::Max);
        let problem = file.into_problem().unwrap();
        assert_eq!(problem.num_constraints(), 3);
    }

    #[test]
    fn test_parse_min_direction() {
        let text = SAMPLE.replace("\"max\"", "\"min\"");
        let file = ProblemFile::from_json_str(&text).unwrap();
        assert_eq!(file.func_direction, Direction::Min);
    }

    #[test]
    fn test_unknown_direction_is_parse_error() {
        let text = SAMPLE.replace("\"max\"", "\"maximize\"");
        let err = ProblemFile::from_json_str(&text).unwrap_err();
        assert!(matches!(err, IlpError::Parse(_)));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = ProblemFile::from_json_str(r#"{"obj_func_coffs": [1]}"#).unwrap_err();
        assert!(matches!(err, IlpError::Parse(_)));
    }

    #[test]
    fn test_mismatched_record_is_malformed() {
        let text = SAMPLE.replace("[2, 5, 6]", "[2, 5]");
        let err = ProblemFile::from_json_str(&text)
            .unwrap()
            .into_problem()
            .unwrap_err();
        assert!(matches!(err, IlpError::MalformedProblem(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ProblemFile::load("/nonexistent/u-ilp/input.json").unwrap_err();
        assert!(matches!(err, IlpError::Io(_)));
    }

    #[test]
    fn test_from_problem_round_trips_fields() {
        let problem = ProblemFile::from_json_str(SAMPLE)
            .unwrap()
            .into_problem()
            .unwrap();
        let file = ProblemFile::from(&problem);
        assert_eq!(file.constraint_system_rhs, vec![2.0, 5.0, 6.0]);
    }
}
