//! Branch-and-bound execution engine.
//!
//! # Algorithm
//!
//! 1. Solve the root LP relaxation (failure here is fatal)
//! 2. If the root is integer-feasible, it is the answer
//! 3. Otherwise, at each fractional node:
//!    a. Pick the first fractional decision variable `x_k = v`
//!    b. Down branch: push `x_k <= floor(v)`, solve, record or recurse, pop
//!    c. Up branch: push `-x_k <= -ceil(v)`, solve, record or recurse, pop
//!    d. A failed child solve prunes that child only
//! 4. Select the best leaf from the solution pool

use rayon::join;
use serde::Serialize;

use super::config::{BnbConfig, Integrality};
use super::constraints::{ExtraConstraint, ExtraConstraintSet};
use super::inspect::{is_integer_feasible, select_branch_variable};
use super::pool::{Solution, SolutionPool};
use crate::error::{IlpError, IlpResult, SimplexError};
use crate::problem::LpProblem;
use crate::simplex::{LpSolver, SimplexSolver, Tableau};

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BnbStats {
    /// LP relaxations solved successfully, root included.
    pub nodes_solved: u64,
    /// Integer-feasible leaves recorded.
    pub integer_leaves: u64,
    /// Branches pruned because their relaxation was infeasible.
    pub pruned_infeasible: u64,
    /// Branches pruned because their relaxation was unbounded.
    pub pruned_unbounded: u64,
    /// Branches pruned for any other solver failure.
    pub pruned_other: u64,
    /// Fractional nodes dropped at the depth limit.
    pub depth_limited: u64,
    /// Deepest node visited.
    pub max_depth_reached: usize,
}

impl BnbStats {
    fn absorb(&mut self, other: BnbStats) {
        self.nodes_solved += other.nodes_solved;
        self.integer_leaves += other.integer_leaves;
        self.pruned_infeasible += other.pruned_infeasible;
        self.pruned_unbounded += other.pruned_unbounded;
        self.pruned_other += other.pruned_other;
        self.depth_limited += other.depth_limited;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }

    /// Whether no fractional node was dropped at the depth limit.
    ///
    /// When `false` the best solution may not be optimal.
    pub fn is_complete(&self) -> bool {
        self.depth_limited == 0
    }

    /// Total number of pruned branches.
    pub fn pruned(&self) -> u64 {
        self.pruned_infeasible + self.pruned_unbounded + self.pruned_other
    }
}

/// Result of a branch-and-bound run.
#[derive(Debug, Clone, Serialize)]
pub struct BnbResult {
    /// Best integer solution.
    pub best: Solution,
    /// Every integer-feasible leaf, in discovery order.
    pub solutions: Vec<Solution>,
    /// Optimum of the root LP relaxation (possibly fractional).
    pub relaxation: Solution,
    /// Search statistics.
    pub stats: BnbStats,
}

/// Executes branch-and-bound over LP relaxations.
///
/// # Examples
///
/// ```
/// use u_ilp::bnb::{BnbConfig, BnbRunner};
/// use u_ilp::problem::{Direction, LpProblem};
///
/// // max 5x1 + 8x2, x1 + x2 <= 6, 5x1 + 9x2 <= 45
/// let problem = LpProblem::new(
///     vec![5.0, 8.0],
///     vec![vec![1.0, 1.0], vec![5.0, 9.0]],
///     vec![6.0, 45.0],
///     Direction::Max,
/// ).unwrap();
///
/// let result = BnbRunner::run(&problem, &BnbConfig::default()).unwrap();
/// assert_eq!(result.best.objective, 40.0);
/// assert_eq!(result.best.values, vec![0.0, 5.0]);
/// ```
pub struct BnbRunner;

impl BnbRunner {
    /// Runs the search with the tableau simplex as LP solver.
    pub fn run(problem: &LpProblem, config: &BnbConfig) -> IlpResult<BnbResult> {
        let solver = SimplexSolver::new(config.simplex);
        Self::run_with_solver(problem, config, &solver)
    }

    /// Runs the search with a caller-supplied LP solver.
    pub fn run_with_solver<S: LpSolver>(
        problem: &LpProblem,
        config: &BnbConfig,
        solver: &S,
    ) -> IlpResult<BnbResult> {
        config.validate().map_err(IlpError::InvalidConfig)?;
        problem.validate_root()?;

        let root = solver.solve(problem)?;
        let search = Search {
            problem,
            config,
            solver,
        };
        let relaxation = Solution::from_tableau(&root, problem.num_vars());
        log::debug!(
            "root relaxation: F = {}, x = {:?}",
            relaxation.objective,
            relaxation.values
        );

        let mut frontier = Frontier::default();
        frontier.stats.nodes_solved = 1;
        if is_integer_feasible(&root, config.integrality) {
            search.record(&root, &mut frontier);
        } else {
            let mut extra = ExtraConstraintSet::new();
            search.branch(&root, &mut extra, &mut frontier);
        }

        let Frontier { pool, stats } = frontier;
        log::info!(
            "branch-and-bound finished: {} nodes, {} integer leaves, {} pruned, max depth {}",
            stats.nodes_solved,
            stats.integer_leaves,
            stats.pruned(),
            stats.max_depth_reached
        );

        if !stats.is_complete() {
            log::warn!(
                "{} node(s) dropped at depth limit {}; best solution may not be optimal",
                stats.depth_limited,
                config.max_depth
            );
        }

        let best = pool.best(problem.direction)?.clone();
        Ok(BnbResult {
            best,
            solutions: pool.into_vec(),
            relaxation,
            stats,
        })
    }
}

/// Leaves and counters of one explored subtree.
#[derive(Debug, Default)]
struct Frontier {
    pool: SolutionPool,
    stats: BnbStats,
}

impl Frontier {
    fn absorb(&mut self, other: Frontier) {
        self.pool.append(other.pool);
        self.stats.absorb(other.stats);
    }
}

/// Invariant state shared by every node of one search.
struct Search<'a, S> {
    problem: &'a LpProblem,
    config: &'a BnbConfig,
    solver: &'a S,
}

impl<S: LpSolver> Search<'_, S> {
    /// Splits a fractional node into its down and up children.
    ///
    /// `extra` holds the constraints of this node and is returned
    /// unchanged.
    fn branch(&self, tableau: &Tableau, extra: &mut ExtraConstraintSet, out: &mut Frontier) {
        let Some(var) = select_branch_variable(tableau, self.config.integrality) else {
            return;
        };
        let n = self.problem.num_vars();
        if var.index >= n {
            log::warn!("branch variable x{} outside the problem, node dropped", var.index + 1);
            out.stats.pruned_other += 1;
            return;
        }
        if extra.len() >= self.config.max_depth {
            log::warn!(
                "depth limit {} reached with x{} = {}, node dropped",
                self.config.max_depth,
                var.index + 1,
                var.value
            );
            out.stats.depth_limited += 1;
            return;
        }

        let down = ExtraConstraint::upper(var.index, var.value.floor(), n);
        let up = ExtraConstraint::lower(var.index, var.value.ceil(), n);
        log::debug!(
            "depth {}: branching on x{} = {:.3}: {} | {}",
            extra.len(),
            var.index + 1,
            var.value,
            down,
            up
        );

        if self.config.parallel {
            let mut down_set = extra.clone();
            down_set.push(down);
            let mut up_set = extra.clone();
            up_set.push(up);
            let (left, right) = join(
                || self.child(&mut down_set),
                || self.child(&mut up_set),
            );
            out.absorb(left);
            out.absorb(right);
        } else {
            extra.push(down);
            self.explore(extra, out);
            extra.pop();

            extra.push(up);
            self.explore(extra, out);
            extra.pop();
        }
    }

    fn child(&self, extra: &mut ExtraConstraintSet) -> Frontier {
        let mut frontier = Frontier::default();
        self.explore(extra, &mut frontier);
        frontier
    }

    /// Solves the node described by `extra` and records or branches it.
    fn explore(&self, extra: &mut ExtraConstraintSet, out: &mut Frontier) {
        let depth = extra.len();
        out.stats.max_depth_reached = out.stats.max_depth_reached.max(depth);

        let subproblem = match self.problem.with_extra_rows(extra.rows()) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("depth {depth}: cannot build subproblem: {err}");
                out.stats.pruned_other += 1;
                return;
            }
        };

        match self.solver.solve(&subproblem) {
            Ok(tableau) => {
                out.stats.nodes_solved += 1;
                if is_integer_feasible(&tableau, self.config.integrality) {
                    self.record(&tableau, out);
                } else {
                    self.branch(&tableau, extra, out);
                }
            }
            Err(err) => {
                log::debug!("depth {depth}: branch {} pruned: {err}", describe_last(extra));
                match err {
                    SimplexError::Infeasible { .. } => out.stats.pruned_infeasible += 1,
                    SimplexError::Unbounded { .. } => out.stats.pruned_unbounded += 1,
                    _ => out.stats.pruned_other += 1,
                }
            }
        }
    }

    /// Appends the leaf solution of an integer-feasible tableau.
    fn record(&self, tableau: &Tableau, out: &mut Frontier) {
        let integrality = self.config.integrality;
        let raw = Solution::from_tableau(tableau, self.problem.num_vars());
        // Rounded values get an objective recomputed from `c`, free of pivot residue.
        let solution = match integrality {
            Integrality::Exact => raw,
            Integrality::Tolerance(_) => {
                let values: Vec<f64> = raw.values.iter().map(|&v| integrality.settle(v)).collect();
                Solution::new(self.problem.objective_at(&values), values)
            }
        };
        log::debug!("integer leaf: F = {}, x = {:?}", solution.objective, solution.values);
        out.stats.integer_leaves += 1;
        out.pool.push(solution);
    }
}

fn describe_last(extra: &ExtraConstraintSet) -> String {
    extra
        .as_slice()
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| "root".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Direction;
    use crate::simplex::VarLabel;
    use std::sync::Mutex;

    fn problem(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>, direction: Direction) -> LpProblem {
        LpProblem::new(c, a, b, direction).unwrap()
    }

    fn textbook() -> LpProblem {
        // LP optimum (2.25, 3.75), integer optimum (0, 5) with F = 40
        problem(
            vec![5.0, 8.0],
            vec![vec![1.0, 1.0], vec![5.0, 9.0]],
            vec![6.0, 45.0],
            Direction::Max,
        )
    }

    /// LP solver answering from a script keyed on the extra rows.
    struct ScriptedSolver<F> {
        base_rows: usize,
        script: F,
        calls: Mutex<Vec<Vec<(Vec<f64>, f64)>>>,
    }

    impl<F> ScriptedSolver<F>
    where
        F: Fn(&[(Vec<f64>, f64)]) -> Result<Tableau, SimplexError> + Send + Sync,
    {
        fn new(base_rows: usize, script: F) -> Self {
            Self {
                base_rows,
                script,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<(Vec<f64>, f64)>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl<F> LpSolver for ScriptedSolver<F>
    where
        F: Fn(&[(Vec<f64>, f64)]) -> Result<Tableau, SimplexError> + Send + Sync,
    {
        fn solve(&self, problem: &LpProblem) -> Result<Tableau, SimplexError> {
            let extra: Vec<(Vec<f64>, f64)> = problem.a[self.base_rows..]
                .iter()
                .cloned()
                .zip(problem.b[self.base_rows..].iter().copied())
                .collect();
            self.calls.lock().unwrap().push(extra.clone());
            (self.script)(&extra)
        }
    }

    fn leaf(x1: f64, x2: f64) -> Result<Tableau, SimplexError> {
        Ok(Tableau::from_basis(
            vec![(VarLabel::Decision(0), x1), (VarLabel::Decision(1), x2)],
            x1 + x2,
        ))
    }

    fn unit_square() -> LpProblem {
        problem(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![10.0], Direction::Max)
    }

    #[test]
    fn test_textbook_optimum() {
        let p = textbook();
        let result = BnbRunner::run(&p, &BnbConfig::default()).unwrap();

        assert_eq!(result.best.objective, 40.0);
        assert_eq!(result.best.values, vec![0.0, 5.0]);
        assert!((result.relaxation.objective - 41.25).abs() < 1e-9);
        assert!(result.solutions.len() >= 2);
        assert_eq!(result.stats.integer_leaves, result.solutions.len() as u64);
        for s in &result.solutions {
            assert!(p.is_satisfied_by(&s.values), "leaf {s:?} violates constraints");
            assert!(s.values.iter().all(|v| v.fract() == 0.0));
            assert_eq!(s.objective, p.objective_at(&s.values));
            assert!(s.objective <= 40.0);
        }
    }

    #[test]
    fn test_integral_root_skips_branching() {
        // max 2x1 + 3x2, x1 + x2 <= 4, x1 <= 3: the relaxation is already (0, 4)
        let p = problem(
            vec![2.0, 3.0],
            vec![vec![1.0, 1.0], vec![1.0, 0.0]],
            vec![4.0, 3.0],
            Direction::Max,
        );
        let result = BnbRunner::run(&p, &BnbConfig::default()).unwrap();
        assert_eq!(result.best.objective, 12.0);
        assert_eq!(result.best.values, vec![0.0, 4.0]);
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(result.stats.nodes_solved, 1);
        assert_eq!(result.stats.max_depth_reached, 0);
    }

    #[test]
    fn test_min_direction() {
        // min x1 + x2, x1 + x2 >= 1.5, x1 <= 4
        let p = problem(
            vec![1.0, 1.0],
            vec![vec![-2.0, -2.0], vec![1.0, 0.0]],
            vec![-3.0, 4.0],
            Direction::Min,
        );
        let result = BnbRunner::run(&p, &BnbConfig::default()).unwrap();
        assert_eq!(result.best.objective, 2.0);
        assert!(p.is_satisfied_by(&result.best.values));
        for s in &result.solutions {
            assert!(s.objective >= 2.0);
        }
    }

    #[test]
    fn test_root_infeasible_is_fatal() {
        let p = problem(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![-1.0], Direction::Max);
        let err = BnbRunner::run(&p, &BnbConfig::default()).unwrap_err();
        assert!(matches!(err, IlpError::Infeasible(_)), "got {err:?}");
    }

    #[test]
    fn test_root_unbounded_is_fatal() {
        let p = problem(vec![1.0, 1.0], vec![vec![1.0, -1.0]], vec![1.0], Direction::Max);
        let err = BnbRunner::run(&p, &BnbConfig::default()).unwrap_err();
        assert!(matches!(err, IlpError::Unbounded(_)), "got {err:?}");
    }

    #[test]
    fn test_over_determined_root_rejected_before_solving() {
        let p = LpProblem {
            c: vec![1.0],
            a: vec![vec![1.0], vec![2.0]],
            b: vec![3.5, 9.0],
            direction: Direction::Max,
        };
        let err = BnbRunner::run(&p, &BnbConfig::default()).unwrap_err();
        assert!(matches!(err, IlpError::MalformedProblem(_)), "got {err:?}");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BnbConfig::default().with_integrality(Integrality::Tolerance(0.7));
        let err = BnbRunner::run(&textbook(), &config).unwrap_err();
        assert!(matches!(err, IlpError::InvalidConfig(_)));
    }

    #[test]
    fn test_depth_limit_empties_pool() {
        let config = BnbConfig::default().with_max_depth(0);
        let err = BnbRunner::run(&textbook(), &config).unwrap_err();
        assert!(matches!(err, IlpError::EmptyPool));
    }

    #[test]
    fn test_infeasible_branch_does_not_abort_search() {
        let solver = ScriptedSolver::new(1, |extra: &[(Vec<f64>, f64)]| match extra {
            [] => Ok(Tableau::from_basis(vec![(VarLabel::Decision(0), 1.5)], 1.5)),
            [(row, _)] if row[0] > 0.0 => Err(SimplexError::Infeasible { row: 1 }),
            [_] => leaf(2.0, 0.0),
            _ => unreachable!("no deeper nodes expected"),
        });

        let result =
            BnbRunner::run_with_solver(&unit_square(), &BnbConfig::default(), &solver).unwrap();

        assert_eq!(result.solutions, vec![Solution::new(2.0, vec![2.0, 0.0])]);
        assert_eq!(result.stats.pruned_infeasible, 1);
        assert_eq!(solver.calls().len(), 3);
    }

    #[test]
    fn test_all_branches_failing_yields_empty_pool() {
        let solver = ScriptedSolver::new(1, |extra: &[(Vec<f64>, f64)]| match extra {
            [] => Ok(Tableau::from_basis(vec![(VarLabel::Decision(1), 0.5)], 0.5)),
            [(row, _)] if row[1] > 0.0 => Err(SimplexError::Infeasible { row: 0 }),
            _ => Err(SimplexError::Unbounded { column: "x1".into() }),
        });

        let err = BnbRunner::run_with_solver(&unit_square(), &BnbConfig::default(), &solver)
            .unwrap_err();
        assert!(matches!(err, IlpError::EmptyPool));
    }

    fn nested_script(extra: &[(Vec<f64>, f64)]) -> Result<Tableau, SimplexError> {
        let ups: Vec<bool> = extra.iter().map(|(row, _)| row.iter().any(|&c| c < 0.0)).collect();
        match ups.as_slice() {
            [] => Ok(Tableau::from_basis(vec![(VarLabel::Decision(0), 1.5)], 1.5)),
            [false] => Ok(Tableau::from_basis(
                vec![(VarLabel::Decision(0), 1.0), (VarLabel::Decision(1), 0.5)],
                1.5,
            )),
            [false, false] => leaf(1.0, 0.0),
            [false, true] => leaf(1.0, 1.0),
            [true] => leaf(2.0, 0.0),
            other => unreachable!("unexpected path {other:?}"),
        }
    }

    #[test]
    fn test_sibling_sees_only_its_own_constraints() {
        let solver = ScriptedSolver::new(1, nested_script);
        let result =
            BnbRunner::run_with_solver(&unit_square(), &BnbConfig::default(), &solver).unwrap();

        let calls = solver.calls();
        assert_eq!(
            calls,
            vec![
                vec![],
                vec![(vec![1.0, 0.0], 1.0)],
                vec![(vec![1.0, 0.0], 1.0), (vec![0.0, 1.0], 0.0)],
                vec![(vec![1.0, 0.0], 1.0), (vec![0.0, -1.0], -1.0)],
                vec![(vec![-1.0, 0.0], -2.0)],
            ]
        );

        let objectives: Vec<f64> = result.solutions.iter().map(|s| s.objective).collect();
        assert_eq!(objectives, vec![1.0, 2.0, 2.0]);
        // Ties go to the first leaf found.
        assert_eq!(result.best.values, vec![1.0, 1.0]);
        assert_eq!(result.stats.max_depth_reached, 2);
    }

    #[test]
    fn test_branch_restores_constraint_set() {
        let p = unit_square();
        let config = BnbConfig::default();
        let solver = ScriptedSolver::new(1, |extra: &[(Vec<f64>, f64)]| {
            // Below the pre-seeded row, reuse the nested script.
            nested_script(&extra[1..])
        });
        let search = Search {
            problem: &p,
            config: &config,
            solver: &solver,
        };

        let mut extra = ExtraConstraintSet::new();
        extra.push(ExtraConstraint::upper(1, 9.0, 2));
        let before = extra.clone();

        let root = Tableau::from_basis(vec![(VarLabel::Decision(0), 1.5)], 1.5);
        let mut frontier = Frontier::default();
        search.branch(&root, &mut extra, &mut frontier);

        assert_eq!(extra, before);
        assert_eq!(frontier.pool.len(), 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = textbook();
        let sequential = BnbRunner::run(&p, &BnbConfig::default()).unwrap();
        let parallel = BnbRunner::run(&p, &BnbConfig::default().with_parallel(true)).unwrap();

        assert_eq!(parallel.solutions, sequential.solutions);
        assert_eq!(parallel.best, sequential.best);
        assert_eq!(parallel.stats, sequential.stats);
    }

    #[test]
    fn test_parallel_scripted_order() {
        let solver = ScriptedSolver::new(1, nested_script);
        let config = BnbConfig::default().with_parallel(true);
        let result = BnbRunner::run_with_solver(&unit_square(), &config, &solver).unwrap();
        let objectives: Vec<f64> = result.solutions.iter().map(|s| s.objective).collect();
        assert_eq!(objectives, vec![1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_negative_residue_hits_depth_limit_under_exact_rule() {
        let residue = -1e-16;
        let solver = ScriptedSolver::new(1, move |extra: &[(Vec<f64>, f64)]| match extra {
            [] => Ok(Tableau::from_basis(
                vec![(VarLabel::Decision(1), 0.5), (VarLabel::Decision(0), residue)],
                0.5,
            )),
            [(first, _), ..] if first[1] > 0.0 => leaf(0.0, 0.0),
            _ if extra.iter().any(|(row, _)| row[0] > 0.0) => {
                Err(SimplexError::Infeasible { row: 0 })
            }
            _ => Ok(Tableau::from_basis(
                vec![(VarLabel::Decision(0), residue), (VarLabel::Decision(1), 1.0)],
                1.0,
            )),
        });

        let exact = BnbConfig::default()
            .with_integrality(Integrality::Exact)
            .with_max_depth(4);
        let strict = BnbRunner::run_with_solver(&unit_square(), &exact, &solver).unwrap();
        assert_eq!(strict.stats.depth_limited, 1);
        assert!(!strict.stats.is_complete());
        assert_eq!(strict.best.objective, 0.0);

        let loose_config = BnbConfig::default().with_max_depth(4);
        let loose = BnbRunner::run_with_solver(&unit_square(), &loose_config, &solver).unwrap();
        assert!(loose.stats.is_complete());
        assert_eq!(loose.best, Solution::new(1.0, vec![0.0, 1.0]));
    }

    #[test]
    fn test_exact_rule_branches_on_residue() {
        let solver = ScriptedSolver::new(1, |extra: &[(Vec<f64>, f64)]| match extra {
            [] => Ok(Tableau::from_basis(
                vec![(VarLabel::Decision(0), 2.000_000_000_000_000_4)],
                2.000_000_000_000_000_4,
            )),
            [(row, _)] if row[0] > 0.0 => leaf(2.0, 0.0),
            _ => Err(SimplexError::Infeasible { row: 0 }),
        });

        let loose = BnbRunner::run_with_solver(&unit_square(), &BnbConfig::default(), &solver)
            .unwrap();
        assert_eq!(loose.solutions, vec![Solution::new(2.0, vec![2.0, 0.0])]);
        assert_eq!(loose.stats.nodes_solved, 1);

        let exact = BnbConfig::default().with_integrality(Integrality::Exact);
        let strict = BnbRunner::run_with_solver(&unit_square(), &exact, &solver).unwrap();
        assert_eq!(strict.stats.nodes_solved, 2);
        assert_eq!(strict.stats.pruned_infeasible, 1);
        assert_eq!(strict.best.values, vec![2.0, 0.0]);
    }
}
