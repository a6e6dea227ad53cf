//! Random bounded integer programs.
//!
//! Produces small `max` instances with non-negative integer coefficients
//! and positive right-hand sides. Every variable carries a positive
//! coefficient in at least one row, so the feasible region is a bounded
//! polytope containing the origin and both [`BnbRunner`](crate::bnb::BnbRunner)
//! and [`BruteForceRunner`](crate::brute::BruteForceRunner) always find an
//! optimum.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{IlpError, IlpResult};
use crate::problem::{Direction, LpProblem};

/// Generator of random bounded integer programs.
///
/// # Examples
///
/// ```
/// use u_ilp::generate::ProblemGenerator;
///
/// let problem = ProblemGenerator::new(3, 2).with_seed(7).generate().unwrap();
/// assert_eq!(problem.num_vars(), 3);
/// assert_eq!(problem.num_constraints(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemGenerator {
    /// Number of decision variables.
    pub num_vars: usize,
    /// Number of constraint rows (at most `num_vars`).
    pub num_constraints: usize,
    /// Inclusive range of constraint coefficients.
    pub coefficient_range: (u32, u32),
    /// Inclusive range of objective coefficients.
    pub objective_range: (u32, u32),
    /// Inclusive range of right-hand sides.
    pub rhs_range: (u32, u32),
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl ProblemGenerator {
    /// Creates a generator for `num_vars` variables and `num_constraints` rows.
    pub fn new(num_vars: usize, num_constraints: usize) -> Self {
        Self {
            num_vars,
            num_constraints,
            coefficient_range: (0, 9),
            objective_range: (1, 9),
            rhs_range: (5, 30),
            seed: None,
        }
    }

    /// Sets the inclusive range of constraint coefficients.
    pub fn with_coefficient_range(mut self, lo: u32, hi: u32) -> Self {
        self.coefficient_range = (lo, hi);
        self
    }

    /// Sets the inclusive range of objective coefficients.
    pub fn with_objective_range(mut self, lo: u32, hi: u32) -> Self {
        self.objective_range = (lo, hi);
        self
    }

    /// Sets the inclusive range of right-hand sides.
    pub fn with_rhs_range(mut self, lo: u32, hi: u32) -> Self {
        self.rhs_range = (lo, hi);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the generator parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_vars == 0 {
            return Err("num_vars must be at least 1".into());
        }
        if self.num_constraints == 0 || self.num_constraints > self.num_vars {
            return Err(format!(
                "num_constraints must be in 1..={}, got {}",
                self.num_vars, self.num_constraints
            ));
        }
        for (name, (lo, hi)) in [
            ("coefficient_range", self.coefficient_range),
            ("objective_range", self.objective_range),
            ("rhs_range", self.rhs_range),
        ] {
            if lo > hi {
                return Err(format!("{name} is empty: {lo} > {hi}"));
            }
        }
        if self.rhs_range.0 == 0 {
            return Err("rhs_range must start at 1 or above".into());
        }
        Ok(())
    }

    /// Generates one instance from the configured seed.
    pub fn generate(&self) -> IlpResult<LpProblem> {
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        self.generate_with(&mut rng)
    }

    /// Generates one instance from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> IlpResult<LpProblem> {
        self.validate().map_err(IlpError::InvalidConfig)?;
        let n = self.num_vars;
        let m = self.num_constraints;
        let (c_lo, c_hi) = self.coefficient_range;

        let mut a: Vec<Vec<f64>> = (0..m)
            .map(|_| (0..n).map(|_| rng.random_range(c_lo..=c_hi) as f64).collect())
            .collect();
        for j in 0..n {
            if a.iter().all(|row| row[j] <= 0.0) {
                a[j % m][j] = c_hi.max(1) as f64;
            }
        }

        let (o_lo, o_hi) = self.objective_range;
        let c = (0..n).map(|_| rng.random_range(o_lo..=o_hi) as f64).collect();
        let (r_lo, r_hi) = self.rhs_range;
        let b = (0..m).map(|_| rng.random_range(r_lo..=r_hi) as f64).collect();

        LpProblem::new(c, a, b, Direction::Max)
    }
}
