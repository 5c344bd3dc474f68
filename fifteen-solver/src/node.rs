use fifteen_common::{board::Board, moves::Move};

use std::cmp::Ordering;

/// A discovered board with its path length from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub board: Board,
    pub depth: u32,
    /// Ordering key for the priority frontiers; zero when unused.
    pub heuristic: u32,
    /// Index of this node's record in the [`PathArena`], when tracing.
    pub trace: Option<usize>,
}

impl SearchNode {
    pub fn root(board: Board, heuristic: u32, trace: Option<usize>) -> Self {
        SearchNode {
            board,
            depth: 0,
            heuristic,
            trace,
        }
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest key first,
/// and the earliest insertion among equal keys.
#[derive(Debug, Clone)]
pub struct Prioritized {
    pub priority: u32,
    pub order: u64,
    pub node: SearchNode,
}

impl Ord for Prioritized {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Prioritized {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.order == other.order
    }
}

impl Eq for Prioritized {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveNode {
    pub parent: usize,
    /// `None` only for the root.
    pub mov: Option<Move>,
}

/// Parent links for every node created while tracing.
#[derive(Debug, Clone, Default)]
pub struct PathArena {
    nodes: Vec<MoveNode>,
}

impl PathArena {
    pub fn push(&mut self, parent: usize, mov: Option<Move>) -> usize {
        self.nodes.push(MoveNode { parent, mov });
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Moves leading from the root to the node recorded at `index`.
    pub fn moves_to(&self, index: usize) -> Vec<Move> {
        let mut moves = vec![];
        let mut current = index;
        while let Some(node) = self.nodes.get(current) {
            let Some(mov) = node.mov else {
                break;
            };
            moves.push(mov);
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}
