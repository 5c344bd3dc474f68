use super::*;

use smallvec::SmallVec;
use std::collections::{BinaryHeap, VecDeque};

/// Children of one expansion, in move enumeration order.
pub type Children = SmallVec<[SearchNode; 4]>;

/// Discovered-but-not-yet-expanded nodes.
pub trait Frontier {
    fn push(&mut self, node: SearchNode);

    fn pop(&mut self) -> Option<SearchNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_children(&mut self, children: Children) {
        for child in children {
            self.push(child);
        }
    }
}

/// Breadth-first queue.
#[derive(Debug, Default)]
pub struct FifoFrontier(VecDeque<SearchNode>);

impl Frontier for FifoFrontier {
    fn push(&mut self, node: SearchNode) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Depth-first stack.
#[derive(Debug, Default)]
pub struct LifoFrontier(Vec<SearchNode>);

impl Frontier for LifoFrontier {
    fn push(&mut self, node: SearchNode) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    // Reversed so the first enumerated move is popped first.
    fn push_children(&mut self, children: Children) {
        self.0.extend(children.into_iter().rev());
    }
}

/// Min-priority structure keyed on [`SearchNode::heuristic`]; equal keys come
/// out in insertion order.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Prioritized>,
    inserted: u64,
}

impl PriorityFrontier {
    pub fn peek(&self) -> Option<&SearchNode> {
        self.heap.peek().map(|p| &p.node)
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: SearchNode) {
        self.heap.push(Prioritized {
            priority: node.heuristic,
            order: self.inserted,
            node,
        });
        self.inserted += 1;
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|p| p.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
