//! Multicolor Triangular Peg Solitaire Solver
//!
//! Finds a jump sequence that leaves at most one peg on a triangular board
//! whose pegs carry colors. Solves single boards, runs batches over every
//! peg coloring of a board size, and prints parity diagnostics.

mod animation;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pegjump::batch::{run_batch, symmetric_holes, BatchConfig, RegistryPolicy};
use pegjump::parity::{parity_vector, sax_count_t5};
use pegjump::report::{JsonLinesReport, ReportSink, TextReport};
use pegjump::{BatchError, Board, Coord, SearchEngine, SearchOptions, VisitedRegistry};

/// Side-5 triangle with the apex empty.
const CLASSIC_BOARD: &str = "0/11/111/1111/11111";

/// Solves multicolor triangular peg solitaire boards.
#[derive(Parser)]
#[command(name = "pegjump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct BoardArgs {
    /// Board rows separated by '/', e.g. 0/11/111, or the bare code 011111.
    #[arg(short, long)]
    board: String,
    /// Number of colors, including 0 for empty.
    #[arg(short, long, default_value_t = 2)]
    colors: u8,
}

#[derive(Args)]
struct ReportArgs {
    /// Append a text report to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Append a JSON-lines report to this file.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single board.
    Solve {
        #[command(flatten)]
        board: BoardArgs,
        /// Forbid jumps between equal colors other than 1.
        #[arg(long)]
        restrict: bool,
        /// Print the board after every move.
        #[arg(long)]
        animate: bool,
        /// Print the parity vector with each animated board.
        #[arg(long)]
        vector: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Solve every peg coloring of a board size.
    Batch {
        /// Side length of the triangle.
        #[arg(long)]
        side: usize,
        /// Number of colors, including 0 for empty.
        #[arg(short, long, default_value_t = 3)]
        colors: u8,
        /// Vacancy as ROW,COL; repeatable. Defaults to one per symmetry class.
        #[arg(long = "hole", value_parser = parse_coord)]
        holes: Vec<Coord>,
        /// Keep one visited registry across all boards.
        #[arg(long)]
        shared_registry: bool,
        /// Forbid jumps between equal colors other than 1.
        #[arg(long)]
        restrict: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Print parity diagnostics for a board.
    Parity {
        #[command(flatten)]
        board: BoardArgs,
    },
}

fn parse_coord(text: &str) -> Result<Coord, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{text}'"))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("bad row '{row}': {e}"))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("bad column '{col}': {e}"))?;
    Ok((row, col))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve {
            board,
            restrict,
            animate,
            vector,
            report,
        }) => {
            let options = SearchOptions {
                restrict_to_n_jumps: restrict,
            };
            run_solve(&board, options, animate, vector, &report)
        }
        Some(Command::Batch {
            side,
            colors,
            holes,
            shared_registry,
            restrict,
            report,
        }) => {
            let config = BatchConfig {
                side,
                colors,
                holes: if holes.is_empty() { symmetric_holes(side) } else { holes },
                options: SearchOptions {
                    restrict_to_n_jumps: restrict,
                },
                policy: if shared_registry {
                    RegistryPolicy::Shared
                } else {
                    RegistryPolicy::PerBoard
                },
            };
            run_batch_command(&config, &report)
        }
        Some(Command::Parity { board }) => run_parity(&board),
        None => {
            // default: solve and animate the classic board
            let board = BoardArgs {
                board: CLASSIC_BOARD.to_string(),
                colors: 2,
            };
            run_solve(&board, SearchOptions::default(), true, false, &ReportArgs::none())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

impl ReportArgs {
    fn none() -> Self {
        Self {
            output: None,
            json: None,
        }
    }

    /// Opens every requested report file for appending.
    fn open_sinks(&self) -> io::Result<Vec<Box<dyn ReportSink>>> {
        let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
        if let Some(path) = &self.output {
            sinks.push(Box::new(TextReport::append(path)?));
        }
        if let Some(path) = &self.json {
            sinks.push(Box::new(JsonLinesReport::append(path)?));
        }
        Ok(sinks)
    }
}

/// Solves one board, prints the outcome and writes any requested reports.
fn run_solve(
    args: &BoardArgs,
    options: SearchOptions,
    animate: bool,
    show_vector: bool,
    report: &ReportArgs,
) -> Result<(), BatchError> {
    let board = Board::parse(&args.board, args.colors)?;
    let mut sinks = report.open_sinks()?;

    println!("Beginning solution of board {}", board.code());

    let mut registry = VisitedRegistry::new();
    let mut engine = SearchEngine::new(options, &mut registry);
    let solution = engine.solve(&board)?;
    let stats = engine.stats();
    info!(
        nodes = stats.nodes,
        pruned = stats.pruned,
        max_depth = stats.max_depth,
        "search statistics"
    );

    match &solution {
        Some(moves) => {
            println!("Solution found ({} moves)", moves.len());
            if animate {
                animation::play(&board, moves, show_vector);
            }
            animation::print_solution(moves);
        }
        None => println!("No solution found."),
    }

    sinks.record(&board, solution.as_deref())?;
    sinks.finish()?;
    Ok(())
}

/// Runs a batch and prints its totals.
fn run_batch_command(config: &BatchConfig, report: &ReportArgs) -> Result<(), BatchError> {
    let mut sinks = report.open_sinks()?;
    let summary = run_batch(config, &mut sinks)?;

    println!(
        "{} boards: {} solved, {} unsolved",
        summary.boards,
        summary.solved,
        summary.boards - summary.solved
    );
    Ok(())
}

/// Prints the parity vector and, for side-5 boards, the SAX count.
fn run_parity(args: &BoardArgs) -> Result<(), BatchError> {
    let board = Board::parse(&args.board, args.colors)?;

    println!("{board}");
    println!("parity vector: {:?}", parity_vector(&board));
    if let Some(count) = sax_count_t5(&board) {
        println!("SAX count: {count}");
    }
    Ok(())
}
