//! Branch-and-bound configuration.

use crate::simplex::SimplexConfig;

/// Rule deciding whether a relaxed value counts as an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Integrality {
    /// The value must equal its own floor exactly.
    ///
    /// Floating-point residue left by pivoting (e.g. `2.0000000000000004`)
    /// makes a value fractional under this rule. A negative residue such
    /// as `-1e-16` branches on `x <= -1` and a redundant `x >= 0`, which
    /// repeats until `max_depth`; check [`BnbStats::is_complete`] before
    /// trusting the best solution.
    ///
    /// [`BnbStats::is_complete`]: crate::bnb::BnbStats::is_complete
    Exact,

    /// The value must lie within `eps` of the nearest integer.
    ///
    /// Recorded solutions are rounded to the nearest integer.
    Tolerance(f64),
}

impl Default for Integrality {
    fn default() -> Self {
        Integrality::Tolerance(1e-9)
    }
}

impl Integrality {
    /// Whether `value` is integral under this rule.
    pub fn is_integral(self, value: f64) -> bool {
        match self {
            Integrality::Exact => value == value.floor(),
            Integrality::Tolerance(eps) => (value - value.round()).abs() <= eps,
        }
    }

    /// The value recorded for an integral `value`.
    pub fn settle(self, value: f64) -> f64 {
        match self {
            Integrality::Exact => value,
            Integrality::Tolerance(_) => value.round() + 0.0,
        }
    }
}

/// Configuration for the branch-and-bound search.
///
/// # Examples
///
/// ```
/// use u_ilp::bnb::{BnbConfig, Integrality};
///
/// let config = BnbConfig::default()
///     .with_integrality(Integrality::Exact)
///     .with_max_depth(32)
///     .with_parallel(true);
/// assert_eq!(config.max_depth, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BnbConfig {
    /// Integrality rule for decision variables.
    pub integrality: Integrality,

    /// Maximum number of extra constraints along one path.
    ///
    /// A fractional node at this depth is dropped instead of branched.
    pub max_depth: usize,

    /// Whether to explore the two children of each node in parallel
    /// using rayon. The resulting solution pool is identical to the
    /// sequential one.
    pub parallel: bool,

    /// Configuration of the LP relaxation solver.
    pub simplex: SimplexConfig,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            integrality: Integrality::default(),
            max_depth: 64,
            parallel: false,
            simplex: SimplexConfig::default(),
        }
    }
}

impl BnbConfig {
    /// Sets the integrality rule.
    pub fn with_integrality(mut self, integrality: Integrality) -> Self {
        self.integrality = integrality;
        self
    }

    /// Sets the maximum branching depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enables or disables parallel branch exploration.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the LP relaxation solver configuration.
    pub fn with_simplex(mut self, simplex: SimplexConfig) -> Self {
        self.simplex = simplex;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Integrality::Tolerance(eps) = self.integrality {
            if !(0.0..0.5).contains(&eps) {
                return Err(format!("integrality tolerance must be in [0, 0.5), got {eps}"));
            }
        }
        self.simplex.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert_eq!(config.integrality, Integrality::Tolerance(1e-9));
        assert_eq!(config.max_depth, 64);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_tolerance() {
        let config = BnbConfig::default().with_integrality(Integrality::Tolerance(0.5));
        assert!(config.validate().is_err());
        let config = BnbConfig::default().with_integrality(Integrality::Tolerance(-1e-3));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_propagates_simplex() {
        let config =
            BnbConfig::default().with_simplex(SimplexConfig::default().with_max_iterations(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_exact_integrality() {
        assert!(Integrality::Exact.is_integral(3.0));
        assert!(Integrality::Exact.is_integral(-2.0));
        assert!(!Integrality::Exact.is_integral(2.5));
        assert!(!Integrality::Exact.is_integral(2.000_000_000_000_000_4));
        assert_eq!(Integrality::Exact.settle(3.0), 3.0);
    }

    #[test]
    fn test_tolerance_integrality() {
        let rule = Integrality::Tolerance(1e-9);
        assert!(rule.is_integral(2.000_000_000_000_000_4));
        assert!(rule.is_integral(2.999_999_999_99));
        assert!(!rule.is_integral(2.5));
        assert_eq!(rule.settle(2.999_999_999_99), 3.0);
        assert_eq!(rule.settle(-0.000_000_000_01), 0.0);
    }
}
