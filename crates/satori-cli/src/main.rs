//! Satori CLI - command-line driver for the SAT solver cores.
//!
//! Reference invocation: `satori <log> <decider> <restarter> <input.cnf>`.
//! Prints `SAT`, `UNSAT` or `TIMEOUT` on stdout and writes the statistics
//! report (plus the assignment report on SAT) into the working directory.

mod report;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use satori_cdcl::{CdclConfig, CdclSolver, Decider, RestartPolicy, SatResult};
use satori_dpll::{DpllConfig, DpllSolver, Selection};
use satori_format::DimacsCnf;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "satori")]
#[command(author, version, about = "CDCL SAT solver with pluggable heuristics and restarts", long_about = None)]
struct Cli {
    /// Per-step solver logging (True/False)
    #[arg(value_parser = parse_bool)]
    log: bool,

    /// Decision heuristic
    #[arg(ignore_case = true)]
    decider: DeciderArg,

    /// Restart strategy
    #[arg(ignore_case = true)]
    restarter: RestarterArg,

    /// DIMACS CNF input file
    input: PathBuf,

    /// Wall-clock timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Engine to run; the DPLL baselines exist for comparison
    #[arg(long, default_value = "cdcl", ignore_case = true)]
    engine: EngineArg,

    /// Cap on live learned clauses (CDCL engine)
    #[arg(long, default_value_t = 5_000)]
    learned_cap: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeciderArg {
    Ordered,
    Vsids,
    Minisat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RestarterArg {
    None,
    Geometric,
    Luby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    Cdcl,
    DpllFirst,
    DpllDlis,
    DpllDlcs,
    DpllMom,
    DpllJw,
    DpllRandom,
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("expected True or False, got '{raw}'")),
    }
}

impl From<DeciderArg> for Decider {
    fn from(arg: DeciderArg) -> Self {
        match arg {
            DeciderArg::Ordered => Decider::Ordered,
            DeciderArg::Vsids => Decider::Vsids,
            DeciderArg::Minisat => Decider::Minisat,
        }
    }
}

impl From<RestarterArg> for RestartPolicy {
    fn from(arg: RestarterArg) -> Self {
        match arg {
            RestarterArg::None => RestartPolicy::Never,
            RestarterArg::Geometric => RestartPolicy::Geometric,
            RestarterArg::Luby => RestartPolicy::Luby,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.log {
        "warn,satori_cdcl=trace,satori_dpll=trace,satori_cli=info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let read_start = Instant::now();
    let cnf = DimacsCnf::from_path(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let read_time = read_start.elapsed();
    tracing::info!(
        vars = cnf.num_vars,
        clauses = cnf.clauses.len(),
        "loaded formula"
    );

    match cli.engine {
        EngineArg::Cdcl => run_cdcl(&cli, &cnf, read_time),
        _ => run_dpll(&cli, &cnf),
    }
}

fn run_cdcl(cli: &Cli, cnf: &DimacsCnf, read_time: Duration) -> anyhow::Result<()> {
    let config = CdclConfig {
        decider: cli.decider.into(),
        restart: cli.restarter.into(),
        learned_cap: cli.learned_cap,
        timeout: cli.timeout.map(Duration::from_secs),
    };
    let mut solver = CdclSolver::with_config(cnf, config)?;
    solver.stats_mut().input_file = cli.input.display().to_string();
    solver.stats_mut().read_time = read_time;

    let result = solver.solve()?;
    println!("{}", solver.stats().result);

    let stats_path = report::stats_path(&cli.input);
    report::write_text(&stats_path, &solver.stats().render())?;
    if cli.log {
        eprint!("{}", solver.stats().render());
    }
    tracing::info!(path = %stats_path.display(), "statistics written");

    if let SatResult::Sat(model) = &result {
        let assgn_path = report::assignment_path(&cli.input);
        report::write_model(&assgn_path, model)?;
        tracing::info!(path = %assgn_path.display(), "assignment written");
    }
    Ok(())
}

fn run_dpll(cli: &Cli, cnf: &DimacsCnf) -> anyhow::Result<()> {
    let selection = match cli.engine {
        EngineArg::Cdcl => unreachable!("dispatched in main"),
        EngineArg::DpllFirst => Selection::First,
        EngineArg::DpllDlis => Selection::Dlis,
        EngineArg::DpllDlcs => Selection::Dlcs,
        EngineArg::DpllMom => Selection::Mom,
        EngineArg::DpllJw => Selection::Jw,
        EngineArg::DpllRandom => Selection::Random,
    };
    let config = DpllConfig {
        selection,
        timeout: cli.timeout.map(Duration::from_secs),
        ..DpllConfig::default()
    };
    let mut solver = DpllSolver::with_config(cnf, config)?;

    let started = Instant::now();
    let result = solver.solve();
    let elapsed = started.elapsed();

    let verdict = match &result {
        SatResult::Sat(_) => "SAT",
        SatResult::Unsat => "UNSAT",
        SatResult::Unknown(_) => "TIMEOUT",
    };
    println!("{verdict}");

    let stats = solver.stats();
    let mut out = String::new();
    let _ = writeln!(out, "Input file: {}", cli.input.display());
    let _ = writeln!(out, "Engine: {:?}", selection);
    let _ = writeln!(out, "Decisions: {}", stats.decisions);
    let _ = writeln!(out, "Backtracks: {}", stats.backtracks);
    let _ = writeln!(out, "Max depth: {}", stats.max_depth);
    let _ = writeln!(out, "Total time: {:.6}s", elapsed.as_secs_f64());
    let _ = writeln!(out, "RESULT: {verdict}");
    report::write_text(&report::stats_path(&cli.input), &out)?;

    if let SatResult::Sat(model) = &result {
        report::write_model(&report::assignment_path(&cli.input), model)?;
    }
    Ok(())
}
