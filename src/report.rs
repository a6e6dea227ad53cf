//! Human-readable renderings of solver results.

use std::fmt;

use crate::bnb::{BnbResult, Solution};
use crate::brute::BruteForceResult;

const RULE: &str = "-------------------";

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F = {}", self.objective)?;
        for (j, v) in self.values.iter().enumerate() {
            let sep = if j == 0 { "; " } else { ", " };
            write!(f, "{sep}x{} = {v}", j + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for BnbResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LP relaxation: {}", self.relaxation)?;
        writeln!(
            f,
            "Branch-and-bound found {} integer solution(s):",
            self.solutions.len()
        )?;
        for solution in &self.solutions {
            writeln!(f, "  {solution}")?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Best integer solution:")?;
        writeln!(f, "  {}", self.best)?;
        if !self.stats.is_complete() {
            writeln!(f, "  (depth limit reached; may not be optimal)")?;
        }
        writeln!(f, "{RULE}")?;
        write!(
            f,
            "nodes solved: {}, pruned: {} (infeasible {}, unbounded {}, other {}), depth-limited: {}, max depth: {}",
            self.stats.nodes_solved,
            self.stats.pruned(),
            self.stats.pruned_infeasible,
            self.stats.pruned_unbounded,
            self.stats.pruned_other,
            self.stats.depth_limited,
            self.stats.max_depth_reached
        )
    }
}

impl fmt::Display for BruteForceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Brute force over {{0..={}}}:", self.upper_bound)?;
        writeln!(f, "{} feasible integer point(s):", self.feasible.len())?;
        for point in &self.feasible {
            let coords: Vec<String> = point.iter().map(ToString::to_string).collect();
            writeln!(f, "  ({})", coords.join(", "))?;
        }
        writeln!(f, "{RULE}")?;
        write!(f, "Best point: ")?;
        for (j, v) in self.best.iter().enumerate() {
            write!(f, "x{} = {v}, ", j + 1)?;
        }
        write!(f, "F = {}", self.best_objective)
    }
}
