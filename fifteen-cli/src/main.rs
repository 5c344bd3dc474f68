mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fifteen_common::{board::Board, goal::Goal, moves::format_moves};
use fifteen_solver::{SearchConfig, Strategy, solve};
use log::info;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// [BOARD] STRATEGY [OPTION]: 16 labels such as "123456789ABCDE F" (left out
    /// with --scramble), then BFS, DFS, GBFS, AStar or DLS, then h1/h2 for
    /// GBFS/AStar or the depth limit for DLS
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
    /// Time limit in seconds, 0 disables it [default: 120 for BFS/DFS/DLS, 90 for GBFS, 60 for AStar]
    #[arg(short, long, value_name = "SECS")]
    time_limit: Option<u64>,
    /// Max nodes to expand
    #[arg(short, long, value_name = "NUM")]
    max_expanded: Option<u64>,
    /// Leave the blank out of h1/h2 and stop A* at the first provably optimal goal
    #[arg(short, long)]
    admissible: bool,
    /// Also print the solution moves
    #[arg(short, long)]
    path: bool,
    /// Start from a random walk of MOVES steps instead of a BOARD
    #[arg(short, long, value_name = "MOVES")]
    scramble: Option<usize>,
    /// Seed for --scramble
    #[arg(long, default_value_t = 0, value_name = "SEED")]
    seed: u64,
    /// Print the initial board and its goal without solving
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Cli {
        args,
        time_limit,
        max_expanded,
        admissible,
        path,
        scramble,
        seed,
        preview,
    } = Cli::parse();

    let (board, strategy) = parse_positionals(args, scramble, seed)?;
    if preview {
        let goal = Goal::classify(&board);
        println!(
            "{}\n\nGoal #{}:\n{}",
            board.pretty_print(),
            goal.index() + 1,
            goal.board().pretty_print()
        );
        return Ok(());
    }
    let Some(strategy) = strategy else {
        bail!("No STRATEGY provided (BFS, DFS, GBFS, AStar or DLS).");
    };

    let mut config = SearchConfig::for_strategy(&strategy)
        .with_max_expanded(max_expanded)
        .with_trace_path(path)
        .with_admissible(admissible);
    if let Some(secs) = time_limit {
        config = config.with_time_limit((secs > 0).then(|| Duration::from_secs(secs)));
    }

    info!("Solving '{board}' with {strategy}");
    let report = with_spinner(&format!("Searching with {strategy}..."), || {
        solve(board, strategy, &config)
    });
    info!(
        "{strategy} stopped ({:?}) in {}",
        report.termination,
        format_elapsed(report.elapsed)
    );

    println!("{report}");
    if path && let Some(moves) = report.solution.as_ref().and_then(|s| s.moves.as_deref()) {
        println!("{}", format_moves(moves));
    }

    Ok(())
}

/// Splits `[BOARD] STRATEGY [OPTION]`. The board comes from the scramble
/// generator instead when `scramble` is set.
fn parse_positionals(
    args: Vec<String>,
    scramble: Option<usize>,
    seed: u64,
) -> Result<(Board, Option<Strategy>)> {
    let mut args = args.into_iter();
    let board = match scramble {
        Some(moves) => Board::scrambled(moves, seed),
        None => {
            let board = args
                .next()
                .context("No BOARD or `--scramble` provided.")?;
            Board::parse(&board).context("Failed to parse board")?
        }
    };
    let Some(name) = args.next() else {
        return Ok((board, None));
    };
    let option = args.next();
    if let Some(extra) = args.next() {
        bail!("Unexpected argument '{extra}'");
    }
    let strategy = Strategy::parse(&name, option.as_deref())?;
    Ok((board, Some(strategy)))
}
