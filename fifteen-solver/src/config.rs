use fifteen_common::board::Board;

use anyhow::{Context, Result, bail};
use std::{fmt, time::Duration};

/// Heuristic used by greedy best-first and A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Misplaced cells.
    H1,
    /// Manhattan distance.
    #[default]
    H2,
}

impl Heuristic {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Ok(Heuristic::H1),
            "h2" => Ok(Heuristic::H2),
            _ => bail!("Unknown heuristic '{name}', expected h1 or h2"),
        }
    }

    /// With `admissible` the blank is left out of the estimate.
    pub fn evaluate(self, board: &Board, goal: &Board, admissible: bool) -> u32 {
        match (self, admissible) {
            (Heuristic::H1, false) => board.h1(goal),
            (Heuristic::H2, false) => board.h2(goal),
            (Heuristic::H1, true) => board.misplaced_tiles(goal),
            (Heuristic::H2, true) => board.manhattan_distance(goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::H1 => f.write_str("h1"),
            Heuristic::H2 => f.write_str("h2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    /// Depth-limited when `limit` is set: only nodes with `depth < limit` are
    /// expanded.
    DepthFirst { limit: Option<u32> },
    GreedyBestFirst(Heuristic),
    AStar(Heuristic),
}

impl Strategy {
    /// Parses the launcher's `STRATEGY [OPTION]` pair, e.g. `("AStar",
    /// Some("h1"))` or `("DLS", Some("12"))`.
    pub fn parse(name: &str, option: Option<&str>) -> Result<Self> {
        let heuristic = || -> Result<Heuristic> {
            match option {
                Some(option) => Heuristic::parse(option),
                None => Ok(Heuristic::default()),
            }
        };
        let strategy = match name.to_ascii_lowercase().as_str() {
            "bfs" => Strategy::BreadthFirst,
            "dfs" => Strategy::DepthFirst { limit: None },
            "dls" => {
                let option = option.context("DLS requires a depth limit")?;
                let limit = option
                    .parse::<u32>()
                    .with_context(|| format!("Invalid depth limit '{option}'"))?;
                Strategy::DepthFirst { limit: Some(limit) }
            }
            "gbfs" => Strategy::GreedyBestFirst(heuristic()?),
            "astar" | "a*" => Strategy::AStar(heuristic()?),
            _ => bail!("Unknown strategy '{name}', expected BFS, DFS, GBFS, AStar or DLS"),
        };
        Ok(strategy)
    }

    pub fn default_time_limit(&self) -> Duration {
        match self {
            Strategy::BreadthFirst | Strategy::DepthFirst { .. } => Duration::from_secs(120),
            Strategy::GreedyBestFirst(_) => Duration::from_secs(90),
            Strategy::AStar(_) => Duration::from_secs(60),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => f.write_str("BFS"),
            Strategy::DepthFirst { limit: None } => f.write_str("DFS"),
            Strategy::DepthFirst { limit: Some(limit) } => write!(f, "DLS({limit})"),
            Strategy::GreedyBestFirst(h) => write!(f, "GBFS({h})"),
            Strategy::AStar(h) => write!(f, "AStar({h})"),
        }
    }
}

/// Budget and bookkeeping options for one search run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Wall-clock budget, checked once per loop iteration.
    pub time_limit: Option<Duration>,
    /// Hard cap on node expansions.
    pub max_expanded: Option<u64>,
    /// Keep parent links so the solution's move sequence can be rebuilt.
    pub trace_path: bool,
    /// Leave the blank out of both heuristics and stop A* with the textbook
    /// `best.f <= node.f` test.
    pub admissible: bool,
}

impl SearchConfig {
    pub fn for_strategy(strategy: &Strategy) -> Self {
        Self {
            time_limit: Some(strategy.default_time_limit()),
            ..Self::unbounded()
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_max_expanded(mut self, max_expanded: Option<u64>) -> Self {
        self.max_expanded = max_expanded;
        self
    }

    pub fn with_trace_path(mut self, trace_path: bool) -> Self {
        self.trace_path = trace_path;
        self
    }

    pub fn with_admissible(mut self, admissible: bool) -> Self {
        self.admissible = admissible;
        self
    }
}
