//! u-ilp command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use u_ilp::bnb::{BnbConfig, BnbResult, BnbRunner, Integrality};
use u_ilp::brute::{BruteForceConfig, BruteForceResult, BruteForceRunner};
use u_ilp::problem::{LpProblem, ProblemFile};
use u_ilp::simplex::{SimplexConfig, Tableau};
use u_ilp::IlpResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Branch-and-bound only
    Bnb,
    /// Brute-force enumeration only
    Brute,
    /// Both, brute force first
    Both,
}

/// Solve a small integer linear program read from a JSON file.
#[derive(Debug, Parser)]
#[command(name = "u-ilp", version, about)]
struct Cli {
    /// Problem file with obj_func_coffs, constraint_system_lhs,
    /// constraint_system_rhs and func_direction
    input: PathBuf,

    /// Solution method
    #[arg(short, long, value_enum, default_value_t = Method::Both)]
    method: Method,

    /// Use exact equality-to-floor integrality checks
    #[arg(long, conflicts_with = "tolerance")]
    strict: bool,

    /// Integrality tolerance
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,

    /// Maximum branching depth
    #[arg(long, default_value_t = 64)]
    max_depth: usize,

    /// Pivot budget per simplex phase
    #[arg(long, default_value_t = 500)]
    max_pivots: usize,

    /// Explore branches in parallel
    #[arg(long)]
    parallel: bool,

    /// Largest value tried per variable by brute force
    #[arg(long)]
    upper_bound: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn bnb_config(&self) -> BnbConfig {
        let integrality = if self.strict {
            Integrality::Exact
        } else {
            Integrality::Tolerance(self.tolerance)
        };
        BnbConfig::default()
            .with_integrality(integrality)
            .with_max_depth(self.max_depth)
            .with_parallel(self.parallel)
            .with_simplex(SimplexConfig::default().with_max_iterations(self.max_pivots))
    }

    fn brute_config(&self) -> BruteForceConfig {
        let config = BruteForceConfig::default();
        match self.upper_bound {
            Some(bound) => config.with_upper_bound(bound),
            None => config,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    problem: &'a LpProblem,
    brute_force: Option<&'a BruteForceResult>,
    branch_and_bound: Option<&'a BnbResult>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> IlpResult<()> {
    let problem = ProblemFile::load(&cli.input)?.into_problem()?;
    let bnb_config = cli.bnb_config();

    if !cli.json {
        println!("Problem:\n{problem}\n");
        let mut relaxation = Tableau::new(&problem)?;
        relaxation.reference_solution(&bnb_config.simplex)?;
        relaxation.optimal_solution(problem.direction, &bnb_config.simplex)?;
        println!("LP relaxation tableau:\n{relaxation}\n");
    }

    let brute = match cli.method {
        Method::Brute | Method::Both => Some(BruteForceRunner::run(&problem, &cli.brute_config())?),
        Method::Bnb => None,
    };
    let bnb = match cli.method {
        Method::Bnb | Method::Both => Some(BnbRunner::run(&problem, &bnb_config)?),
        Method::Brute => None,
    };

    if cli.json {
        let report = Report {
            problem: &problem,
            brute_force: brute.as_ref(),
            branch_and_bound: bnb.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(result) = &brute {
        println!("{result}\n");
    }
    if let Some(result) = &bnb {
        println!("{result}");
    }
    if let (Some(brute), Some(bnb)) = (&brute, &bnb) {
        if brute.best_objective != bnb.best.objective {
            log::warn!(
                "brute force (F = {}) and branch-and-bound (F = {}) disagree",
                brute.best_objective,
                bnb.best.objective
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
