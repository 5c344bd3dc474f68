use super::*;

use crate::config::{Heuristic, SearchConfig, Strategy};

use fifteen_common::{
    board::{Board, BoardKey},
    goal::Goal,
    moves::Move,
};
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Solves `board` towards whichever goal it can reach.
pub fn solve(board: Board, strategy: Strategy, config: &SearchConfig) -> SearchReport {
    let goal = Goal::classify(&board);
    debug!("{board} classified towards goal {}", goal.index() + 1);
    let goal = goal.board();
    match strategy {
        Strategy::BreadthFirst => breadth_first(board, &goal, config),
        Strategy::DepthFirst { limit } => depth_first(board, &goal, limit, config),
        Strategy::GreedyBestFirst(heuristic) => greedy_best_first(board, &goal, heuristic, config),
        Strategy::AStar(heuristic) => a_star(board, &goal, heuristic, config),
    }
}

pub fn breadth_first(initial: Board, goal: &Board, config: &SearchConfig) -> SearchReport {
    let mut ctx = SearchContext::new(Strategy::BreadthFirst, initial, goal, config);
    let mut frontier = FifoFrontier::default();
    frontier.push(ctx.root(initial, 0));
    ctx.run_to_goal(frontier, None, |_, _| 0)
}

/// Depth-first search; with `limit` only nodes shallower than the limit are
/// expanded.
pub fn depth_first(
    initial: Board,
    goal: &Board,
    limit: Option<u32>,
    config: &SearchConfig,
) -> SearchReport {
    let mut ctx = SearchContext::new(Strategy::DepthFirst { limit }, initial, goal, config);
    let mut frontier = LifoFrontier::default();
    frontier.push(ctx.root(initial, 0));
    ctx.run_to_goal(frontier, limit, |_, _| 0)
}

/// Best-first on the heuristic alone; depth plays no part in the ordering.
pub fn greedy_best_first(
    initial: Board,
    goal: &Board,
    heuristic: Heuristic,
    config: &SearchConfig,
) -> SearchReport {
    let admissible = config.admissible;
    let evaluate = |board: &Board, _depth: u32| heuristic.evaluate(board, goal, admissible);
    let mut ctx = SearchContext::new(Strategy::GreedyBestFirst(heuristic), initial, goal, config);
    let mut frontier = PriorityFrontier::default();
    frontier.push(ctx.root(initial, evaluate(&initial, 0)));
    ctx.run_to_goal(frontier, None, evaluate)
}

/// A* search.
///
/// The root is keyed on its heuristic, children on `heuristic + depth`.
/// Popped goal nodes are parked in a second queue, and the loop stops once
/// the best parked key is no greater than the popped node's key plus its
/// depth. In admissible mode the stop test is the usual `best <= key`.
pub fn a_star(
    initial: Board,
    goal: &Board,
    heuristic: Heuristic,
    config: &SearchConfig,
) -> SearchReport {
    let admissible = config.admissible;
    let evaluate = |board: &Board| heuristic.evaluate(board, goal, admissible);
    let mut ctx = SearchContext::new(Strategy::AStar(heuristic), initial, goal, config);
    let mut frontier = PriorityFrontier::default();
    let mut solutions = PriorityFrontier::default();
    frontier.push(ctx.root(initial, evaluate(&initial)));

    let mut termination = Termination::Exhausted;
    while !frontier.is_empty() {
        if let Some(reason) = ctx.budget_exceeded() {
            termination = reason;
            break;
        }
        ctx.record_fringe(frontier.len());
        let Some(node) = frontier.pop() else {
            break;
        };
        ctx.stats.expanded += 1;

        if let Some(best) = solutions.peek() {
            let bound = if admissible {
                node.heuristic
            } else {
                node.heuristic + node.depth
            };
            if best.heuristic <= bound {
                termination = Termination::GoalReached;
                break;
            }
        }

        if node.board == *goal {
            solutions.push(node);
        } else {
            ctx.mark_visited(&node.board);
            let children = ctx.expand(&node, |board, depth| evaluate(board) + depth);
            frontier.push_children(children);
        }
    }

    let best = solutions.pop();
    if best.is_some() && termination == Termination::Exhausted {
        termination = Termination::GoalReached;
    }
    ctx.finish(best, termination)
}

/// Why a search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    GoalReached,
    /// The frontier ran dry.
    Exhausted,
    TimedOut,
    ExpansionLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes built, the root included.
    pub created: u64,
    pub expanded: u64,
    /// Largest frontier seen right before a removal.
    pub max_fringe: u64,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            created: 1,
            expanded: 0,
            max_fringe: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub depth: u32,
    /// Only recorded when [`SearchConfig::trace_path`] is set.
    pub moves: Option<Vec<Move>>,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub solution: Option<Solution>,
    pub stats: SearchStats,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    pub fn depth(&self) -> Option<u32> {
        self.solution.as_ref().map(|s| s.depth)
    }
}

/// `depth, created, expanded, max_fringe` on success, `-1, 0, 0, 0`
/// otherwise.
impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.solution {
            Some(solution) => write!(
                f,
                "{}, {}, {}, {}",
                solution.depth, self.stats.created, self.stats.expanded, self.stats.max_fringe
            ),
            None => f.write_str("-1, 0, 0, 0"),
        }
    }
}

/// State owned by a single search run.
struct SearchContext<'a> {
    strategy: Strategy,
    goal: &'a Board,
    config: &'a SearchConfig,
    visited: FxHashSet<BoardKey>,
    stats: SearchStats,
    arena: PathArena,
    timer: Instant,
}

impl<'a> SearchContext<'a> {
    fn new(strategy: Strategy, initial: Board, goal: &'a Board, config: &'a SearchConfig) -> Self {
        debug!("{strategy}: searching from '{initial}' to '{goal}' ({config:?})");
        Self {
            strategy,
            goal,
            config,
            visited: FxHashSet::default(),
            stats: SearchStats::default(),
            arena: PathArena::default(),
            timer: Instant::now(),
        }
    }

    fn root(&mut self, board: Board, heuristic: u32) -> SearchNode {
        let trace = self.config.trace_path.then(|| self.arena.push(0, None));
        SearchNode::root(board, heuristic, trace)
    }

    /// Shared loop of the strategies that stop at the first goal they pop.
    fn run_to_goal<F, H>(
        mut self,
        mut frontier: F,
        depth_limit: Option<u32>,
        heuristic: H,
    ) -> SearchReport
    where
        F: Frontier,
        H: Fn(&Board, u32) -> u32,
    {
        let mut termination = Termination::Exhausted;
        let mut found = None;
        while !frontier.is_empty() {
            if let Some(reason) = self.budget_exceeded() {
                termination = reason;
                break;
            }
            self.record_fringe(frontier.len());
            let Some(node) = frontier.pop() else {
                break;
            };
            self.stats.expanded += 1;
            self.mark_visited(&node.board);

            if node.board == *self.goal {
                termination = Termination::GoalReached;
                found = Some(node);
                break;
            }
            if depth_limit.is_none_or(|limit| node.depth < limit) {
                let children = self.expand(&node, &heuristic);
                frontier.push_children(children);
            }
        }
        self.finish(found, termination)
    }

    fn budget_exceeded(&self) -> Option<Termination> {
        if let Some(limit) = self.config.time_limit
            && self.timer.elapsed() >= limit
        {
            warn!("{}: time limit of {limit:?} reached", self.strategy);
            return Some(Termination::TimedOut);
        }
        if let Some(max) = self.config.max_expanded
            && self.stats.expanded >= max
        {
            warn!("{}: expansion limit of {max} reached", self.strategy);
            return Some(Termination::ExpansionLimit);
        }
        None
    }

    fn record_fringe(&mut self, len: usize) {
        self.stats.max_fringe = self.stats.max_fringe.max(len as u64);
    }

    fn mark_visited(&mut self, board: &Board) {
        self.visited.insert(board.key());
    }

    /// Builds every legal, not yet visited child of `node` in move order.
    fn expand<H>(&mut self, node: &SearchNode, heuristic: H) -> Children
    where
        H: Fn(&Board, u32) -> u32,
    {
        let mut children = Children::new();
        let depth = node.depth + 1;
        for mov in Move::ALL {
            if !node.board.is_legal_move(mov) {
                continue;
            }
            let Some(board) = node.board.move_space_tile(mov) else {
                continue;
            };
            if self.visited.contains(&board.key()) {
                continue;
            }
            self.stats.created += 1;
            let trace = node
                .trace
                .map(|parent| self.arena.push(parent, Some(mov)));
            children.push(SearchNode {
                board,
                depth,
                heuristic: heuristic(&board, depth),
                trace,
            });
        }
        children
    }

    fn finish(self, found: Option<SearchNode>, termination: Termination) -> SearchReport {
        let elapsed = self.timer.elapsed();
        let solution = found.map(|node| Solution {
            depth: node.depth,
            moves: node.trace.map(|index| self.arena.moves_to(index)),
        });
        let SearchStats {
            created,
            expanded,
            max_fringe,
        } = self.stats;
        info!(
            "{}: {termination:?} after {expanded} expansions, {created} created, max fringe {max_fringe}, {} visited, {} traced, {elapsed:?}",
            self.strategy,
            self.visited.len(),
            self.arena.len(),
        );
        SearchReport {
            strategy: self.strategy,
            solution,
            stats: self.stats,
            termination,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fifteen_common::moves::apply_moves;

    const SOLVED: &str = "123456789ABCDEF ";
    const ONE_MOVE: &str = "123456789ABCDE F";

    fn board(label: &str) -> Board {
        Board::parse(label).unwrap()
    }

    fn all_strategies() -> Vec<Strategy> {
        vec![
            Strategy::BreadthFirst,
            Strategy::DepthFirst { limit: None },
            Strategy::DepthFirst { limit: Some(0) },
            Strategy::DepthFirst { limit: Some(5) },
            Strategy::GreedyBestFirst(Heuristic::H1),
            Strategy::GreedyBestFirst(Heuristic::H2),
            Strategy::AStar(Heuristic::H1),
            Strategy::AStar(Heuristic::H2),
        ]
    }

    #[test]
    fn test_solved_board() {
        for strategy in all_strategies() {
            let config = SearchConfig::for_strategy(&strategy);
            let report = solve(board(SOLVED), strategy, &config);
            assert_eq!(report.to_string(), "0, 1, 1, 1", "{strategy}");
            assert_eq!(report.termination, Termination::GoalReached, "{strategy}");
        }
    }

    #[test]
    fn test_breadth_first_one_move() {
        let config = SearchConfig::for_strategy(&Strategy::BreadthFirst);
        let report = solve(board(ONE_MOVE), Strategy::BreadthFirst, &config);
        assert_eq!(report.to_string(), "1, 4, 2, 3");
        assert_eq!(report.depth(), Some(1));
    }

    #[test]
    fn test_depth_first_one_move() {
        let config = SearchConfig::unbounded();
        for limit in [None, Some(1), Some(3)] {
            let report = solve(board(ONE_MOVE), Strategy::DepthFirst { limit }, &config);
            assert_eq!(report.to_string(), "1, 4, 2, 3", "{limit:?}");
        }
    }

    #[test]
    fn test_depth_limit_zero_fails() {
        let strategy = Strategy::DepthFirst { limit: Some(0) };
        let report = solve(board(ONE_MOVE), strategy, &SearchConfig::unbounded());
        assert_eq!(report.to_string(), "-1, 0, 0, 0");
        assert_eq!(report.termination, Termination::Exhausted);
        assert_eq!(report.stats.expanded, 1);
        assert_eq!(report.stats.created, 1);
    }

    #[test]
    fn test_depth_limit_too_shallow() {
        let scrambled = board("123456789A CDEBF");
        let strategy = Strategy::DepthFirst { limit: Some(1) };
        let report = solve(scrambled, strategy, &SearchConfig::unbounded());
        assert!(!report.is_solved());

        let strategy = Strategy::DepthFirst { limit: Some(2) };
        let report = solve(scrambled, strategy, &SearchConfig::unbounded());
        assert_eq!(report.depth(), Some(2));
    }

    #[test]
    fn test_greedy_one_move() {
        for heuristic in [Heuristic::H1, Heuristic::H2] {
            let strategy = Strategy::GreedyBestFirst(heuristic);
            let config = SearchConfig::for_strategy(&strategy);
            let report = solve(board(ONE_MOVE), strategy, &config);
            assert_eq!(report.to_string(), "1, 4, 2, 3", "{heuristic}");
        }
    }

    #[test]
    fn test_a_star_one_move() {
        for heuristic in [Heuristic::H1, Heuristic::H2] {
            let strategy = Strategy::AStar(heuristic);
            let config = SearchConfig::for_strategy(&strategy);
            let report = solve(board(ONE_MOVE), strategy, &config);
            // the goal is parked on the second pop and confirmed on the third
            assert_eq!(report.to_string(), "1, 4, 3, 3", "{heuristic}");
            assert_eq!(report.termination, Termination::GoalReached);
        }
    }

    #[test]
    fn test_swapped_goal() {
        let report = solve(
            board("123456789ABCDF E"),
            Strategy::BreadthFirst,
            &SearchConfig::unbounded(),
        );
        assert_eq!(report.depth(), Some(1));
    }

    #[test]
    fn test_a_star_matches_breadth_first_on_short_scrambles() {
        for seed in 0..10 {
            let initial = Board::scrambled(2, seed);
            let bfs = solve(initial, Strategy::BreadthFirst, &SearchConfig::unbounded());
            for heuristic in [Heuristic::H1, Heuristic::H2] {
                let report = solve(initial, Strategy::AStar(heuristic), &SearchConfig::unbounded());
                assert_eq!(report.depth(), bfs.depth(), "{initial} {heuristic}");
            }
        }
    }

    #[test]
    fn test_admissible_a_star_is_optimal() {
        let config = SearchConfig::unbounded().with_admissible(true);
        for seed in 0..6 {
            let initial = Board::scrambled(10, seed);
            let bfs = solve(initial, Strategy::BreadthFirst, &config);
            assert!(bfs.is_solved(), "{initial}");
            for heuristic in [Heuristic::H1, Heuristic::H2] {
                let report = solve(initial, Strategy::AStar(heuristic), &config);
                assert_eq!(report.depth(), bfs.depth(), "{initial} {heuristic}");
            }
        }
    }

    #[test]
    fn test_greedy_finds_a_solution() {
        for seed in 0..6 {
            let initial = Board::scrambled(8, seed);
            for heuristic in [Heuristic::H1, Heuristic::H2] {
                let strategy = Strategy::GreedyBestFirst(heuristic);
                let report = solve(initial, strategy, &SearchConfig::for_strategy(&strategy));
                let depth = report.depth().unwrap();
                // blank parity fixes the parity of every solution
                assert_eq!(depth % 2, 0, "{initial} {heuristic}");
            }
        }
    }

    #[test]
    fn test_trace_path() {
        let config = SearchConfig::unbounded().with_trace_path(true);
        let initial = Board::scrambled(8, 5);
        let goal = Goal::Standard.board();
        for strategy in [
            Strategy::BreadthFirst,
            Strategy::GreedyBestFirst(Heuristic::H2),
            Strategy::AStar(Heuristic::H2),
        ] {
            let report = solve(initial, strategy, &config);
            let solution = report.solution.unwrap();
            let moves = solution.moves.unwrap();
            assert_eq!(moves.len(), solution.depth as usize, "{strategy}");
            assert_eq!(apply_moves(&initial, &moves), Some(goal), "{strategy}");
        }
    }

    #[test]
    fn test_trace_path_depth_limited() {
        let config = SearchConfig::unbounded().with_trace_path(true);
        let initial = board("123456789A CDEBF");
        let report = solve(initial, Strategy::DepthFirst { limit: Some(2) }, &config);
        let moves = report.solution.and_then(|s| s.moves).unwrap();
        assert_eq!(moves, vec![Move::Down, Move::Right]);
    }

    #[test]
    fn test_no_trace_by_default() {
        let report = solve(
            board(ONE_MOVE),
            Strategy::BreadthFirst,
            &SearchConfig::unbounded(),
        );
        assert_eq!(report.solution.unwrap().moves, None);
    }

    #[test]
    fn test_time_limit() {
        let config = SearchConfig::unbounded().with_time_limit(Some(Duration::ZERO));
        for strategy in all_strategies() {
            let report = solve(board(ONE_MOVE), strategy, &config);
            assert_eq!(report.to_string(), "-1, 0, 0, 0", "{strategy}");
            assert_eq!(report.termination, Termination::TimedOut, "{strategy}");
            assert_eq!(report.stats.expanded, 0);
        }
    }

    #[test]
    fn test_expansion_limit() {
        let config = SearchConfig::unbounded().with_max_expanded(Some(5));
        let report = solve(board(" FEDCBA987654321"), Strategy::BreadthFirst, &config);
        assert_eq!(report.termination, Termination::ExpansionLimit);
        assert_eq!(report.stats.expanded, 5);
        assert_eq!(report.to_string(), "-1, 0, 0, 0");
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let config = SearchConfig::unbounded();
        let initial = Board::scrambled(6, 2);
        let first = solve(initial, Strategy::BreadthFirst, &config);
        let second = solve(initial, Strategy::BreadthFirst, &config);
        assert_eq!(first.to_string(), second.to_string());
    }
}
