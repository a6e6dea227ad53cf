//! Brute-force configuration.

/// Configuration for brute-force enumeration.
///
/// # Examples
///
/// ```
/// use u_ilp::brute::BruteForceConfig;
///
/// let config = BruteForceConfig::default().with_upper_bound(5);
/// assert_eq!(config.upper_bound, Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceConfig {
    /// Largest value tried for every variable.
    ///
    /// `None` uses the largest right-hand side of the problem.
    pub upper_bound: Option<u64>,

    /// Maximum number of points the box may contain.
    pub max_points: u64,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            upper_bound: None,
            max_points: 10_000_000,
        }
    }
}

impl BruteForceConfig {
    /// Sets an explicit per-variable upper bound.
    pub fn with_upper_bound(mut self, bound: u64) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    /// Sets the maximum box size.
    pub fn with_max_points(mut self, n: u64) -> Self {
        self.max_points = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_points == 0 {
            return Err("max_points must be at least 1".into());
        }
        Ok(())
    }
}
