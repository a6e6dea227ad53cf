//! Exhaustive enumeration of the integer box.

use serde::Serialize;

use super::config::BruteForceConfig;
use crate::error::{IlpError, IlpResult};
use crate::problem::LpProblem;

/// Result of a brute-force run.
#[derive(Debug, Clone, Serialize)]
pub struct BruteForceResult {
    /// Every feasible point, in enumeration order (last variable fastest).
    pub feasible: Vec<Vec<i64>>,
    /// Best feasible point; the first one wins ties.
    pub best: Vec<i64>,
    /// Objective value at `best`.
    pub best_objective: f64,
    /// Per-variable upper bound of the enumerated box.
    pub upper_bound: u64,
}

/// Enumerates every integer point in `{0..=U}^n`.
pub struct BruteForceRunner;

impl BruteForceRunner {
    /// Runs the enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_ilp::brute::{BruteForceConfig, BruteForceRunner};
    /// use u_ilp::problem::{Direction, LpProblem};
    ///
    /// let problem = LpProblem::new(
    ///     vec![2.0, 3.0],
    ///     vec![vec![1.0, 1.0], vec![1.0, 0.0]],
    ///     vec![4.0, 3.0],
    ///     Direction::Max,
    /// ).unwrap();
    /// let result = BruteForceRunner::run(&problem, &BruteForceConfig::default()).unwrap();
    /// assert_eq!(result.best, vec![0, 4]);
    /// assert_eq!(result.best_objective, 12.0);
    /// ```
    pub fn run(problem: &LpProblem, config: &BruteForceConfig) -> IlpResult<BruteForceResult> {
        config.validate().map_err(IlpError::InvalidConfig)?;
        problem.validate_root()?;

        let n = problem.num_vars();
        let upper = config
            .upper_bound
            .unwrap_or_else(|| default_upper_bound(problem));
        let points = box_size(upper, n).filter(|&p| p <= config.max_points).ok_or_else(|| {
            IlpError::MalformedProblem(format!(
                "enumeration box {{0..={upper}}}^{n} exceeds {} points",
                config.max_points
            ))
        })?;
        log::debug!("enumerating {points} points in {{0..={upper}}}^{n}");

        let mut feasible = Vec::new();
        let mut best: Option<(usize, f64)> = None;
        let mut point = vec![0u64; n];
        let mut x = vec![0.0; n];

        loop {
            for (xi, &pi) in x.iter_mut().zip(&point) {
                *xi = pi as f64;
            }
            if problem.is_satisfied_by(&x) {
                let objective = problem.objective_at(&x);
                if best.map_or(true, |(_, b)| problem.direction.improves(objective, b)) {
                    best = Some((feasible.len(), objective));
                }
                feasible.push(point.iter().map(|&p| p as i64).collect::<Vec<i64>>());
            }
            if !advance(&mut point, upper) {
                break;
            }
        }

        let (index, best_objective) = best.ok_or(IlpError::EmptyPool)?;
        log::info!(
            "brute force finished: {} feasible of {points} points, best F = {best_objective}",
            feasible.len()
        );
        Ok(BruteForceResult {
            best: feasible[index].clone(),
            feasible,
            best_objective,
            upper_bound: upper,
        })
    }
}

/// Largest right-hand side, floored, never negative.
fn default_upper_bound(problem: &LpProblem) -> u64 {
    problem
        .b
        .iter()
        .copied()
        .fold(0.0_f64, f64::max)
        .floor() as u64
}

fn box_size(upper: u64, n: usize) -> Option<u64> {
    let side = upper.checked_add(1)?;
    (0..n).try_fold(1u64, |acc, _| acc.checked_mul(side))
}

/// Odometer step with the last coordinate fastest; `false` after the last point.
fn advance(point: &mut [u64], upper: u64) -> bool {
    for digit in point.iter_mut().rev() {
        if *digit < upper {
            *digit += 1;
            return true;
        }
        *digit = 0;
    }
    false
}
