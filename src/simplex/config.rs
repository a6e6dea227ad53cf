//! Simplex configuration.

/// Configuration for the tableau simplex.
///
/// # Examples
///
/// ```
/// use u_ilp::simplex::SimplexConfig;
///
/// let config = SimplexConfig::default().with_max_iterations(200);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexConfig {
    /// Pivot budget for each phase (reference and optimal).
    pub max_iterations: usize,

    /// Magnitude below which a tableau coefficient counts as zero when
    /// choosing pivots.
    pub pivot_tolerance: f64,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            pivot_tolerance: 1e-12,
        }
    }
}

impl SimplexConfig {
    /// Sets the pivot budget per phase.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the zero tolerance for pivot selection.
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(self.pivot_tolerance >= 0.0 && self.pivot_tolerance.is_finite()) {
            return Err(format!(
                "pivot_tolerance must be a finite non-negative number, got {}",
                self.pivot_tolerance
            ));
        }
        Ok(())
    }
}
