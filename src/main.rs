//! Corner Solver
//!
//! Scrambles the corners of a cube puzzle and solves them back with IDA*
//! search. The search is guided by a pattern database that is cached on disk
//! between runs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use corner_solver::moves::{format_sequence, parse_sequence, Move};
use corner_solver::persistence::{self, DEFAULT_DB_PATH};
use corner_solver::scramble::{random_scramble, verify_solution};
use corner_solver::{
    CornerHeuristic, IdaStar, MovePruning, PatternDatabase, PuzzleState, SearchOutcome,
    SolverError,
};

/// Solves the corners of a scrambled cube with IDA* search.
#[derive(Parser, Debug)]
#[command(name = "corner-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Scramble the cube (or use a given scramble) and solve it.
    Solve(SolveArgs),
    /// Build the pattern database and save it to disk.
    BuildDb(DatabaseArgs),
    /// Show the number of entries in the saved pattern database.
    Count {
        /// Location of the cached pattern database.
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: PathBuf,
    },
}

#[derive(clap::Args, Debug, PartialEq)]
struct DatabaseArgs {
    /// Maximum depth explored when building the pattern database.
    #[arg(long, default_value_t = 7)]
    db_depth: u8,
    /// Location of the cached pattern database.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,
}

#[derive(clap::Args, Debug, PartialEq)]
struct SolveArgs {
    /// Moves to scramble with, e.g. "R U F'". Random if omitted.
    #[arg(long)]
    scramble: Option<String>,
    /// Length of the random scramble.
    #[arg(long, default_value_t = 8)]
    length: usize,
    /// Seed for the random scramble.
    #[arg(long)]
    seed: Option<u64>,
    /// Hard ceiling on the solution length.
    #[arg(long, default_value_t = 15)]
    max_depth: u32,
    /// Ignore the cached pattern database and do not write one.
    #[arg(long)]
    no_cache: bool,
    /// Which moves to skip after the previous move.
    #[arg(long, value_enum, default_value_t = PruningArg::InverseOnly)]
    pruning: PruningArg,
    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PruningArg {
    InverseOnly,
    SameFace,
}

impl From<PruningArg> for MovePruning {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::InverseOnly => MovePruning::InverseOnly,
            PruningArg::SameFace => MovePruning::SameFace,
        }
    }
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            scramble: None,
            length: 8,
            seed: None,
            max_depth: 15,
            no_cache: false,
            pruning: PruningArg::InverseOnly,
            database: DatabaseArgs {
                db_depth: 7,
                db_path: PathBuf::from(DEFAULT_DB_PATH),
            },
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::BuildDb(args)) => run_build_db(&args),
        Some(Command::Count { db_path }) => run_count(&db_path),
        // default: solve a random scramble
        None => run_solve(&SolveArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Errors that end the program with a failure status.
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("Solution verification failed: {0}")]
    VerificationFailed(String),
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Solves a given or random scramble and prints the result.
///
/// Failing to find a solution within the depth ceiling is reported but is
/// not an error.
fn run_solve(args: &SolveArgs) -> Result<(), CliError> {
    let scramble = resolve_scramble(args)?;
    println!("Scramble: {}", format_sequence(&scramble));

    let state = PuzzleState::new().apply_sequence(&scramble);
    if state.is_solved() {
        println!("Scramble leaves the cube solved; nothing to do");
        return Ok(());
    }

    let database = load_database(&args.database, args.no_cache)?;
    println!("Pattern DB entries: {}", database.len());

    let heuristic = CornerHeuristic::new(&database)?;
    let solver = IdaStar::new(&heuristic, args.max_depth).with_pruning(args.pruning.into());
    let report = solver.solve(&state);

    match report.outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution: {}", format_sequence(&solution));
            println!("Move count: {}", solution.len());
            println!(
                "IDA* iterations: {}, nodes explored: {}",
                report.stats.iterations, report.stats.nodes_explored
            );
            if !verify_solution(&scramble, &solution) {
                return Err(CliError::VerificationFailed(format_sequence(&solution)));
            }
            println!("Solution verified: cube is solved");
        }
        SearchOutcome::NoSolutionWithinDepth => {
            println!("No solution found within depth {}", args.max_depth);
            println!(
                "IDA* iterations: {}, nodes explored: {}",
                report.stats.iterations, report.stats.nodes_explored
            );
        }
    }

    Ok(())
}

/// Parses `--scramble`, or draws a random one.
fn resolve_scramble(args: &SolveArgs) -> Result<Vec<Move>, SolverError> {
    if let Some(text) = &args.scramble {
        return parse_sequence(text);
    }

    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    Ok(random_scramble(args.length, &mut rng))
}

fn load_database(args: &DatabaseArgs, no_cache: bool) -> Result<PatternDatabase, SolverError> {
    if no_cache {
        let database = PatternDatabase::build(args.db_depth);
        database.validate()?;
        Ok(database)
    } else {
        persistence::load_or_build(&args.db_path, args.db_depth)
    }
}

/// Builds and saves the pattern database, then prints entries per depth.
fn run_build_db(args: &DatabaseArgs) -> Result<(), CliError> {
    let database = PatternDatabase::build(args.db_depth);
    database.validate()?;

    persistence::save(&args.db_path, &database).map_err(|source| CliError::Save {
        path: args.db_path.clone(),
        source,
    })?;
    info!("Wrote {}", args.db_path.display());

    println!("Pattern DB entries: {}", database.len());
    for (depth, count) in database.depth_histogram().iter().enumerate() {
        println!("  depth {depth}: {count}");
    }
    Ok(())
}

/// Prints the count of saved entries.
fn run_count(db_path: &Path) -> Result<(), CliError> {
    match persistence::count(db_path) {
        Some(count) => println!("{count} entries"),
        None => eprintln!(
            "No pattern database found at {}. Run 'corner-solver build-db' first.",
            db_path.display()
        ),
    }
    Ok(())
}
