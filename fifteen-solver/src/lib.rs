//! This crate solves the 15-puzzle with four classical search strategies:
//! breadth-first, depth-first (optionally depth-limited), greedy best-first
//! and A*.
//!
//! Every run owns its frontier, visited set and counters, and ends with a
//! [`SearchReport`] whose `Display` is the `depth, created, expanded,
//! max_fringe` line.
mod config;
mod frontier;
mod node;
mod search;

use crate::frontier::*;
use crate::node::*;

pub use crate::config::{Heuristic, SearchConfig, Strategy};
pub use crate::search::{
    SearchReport, SearchStats, Solution, Termination, a_star, breadth_first, depth_first,
    greedy_best_first, solve,
};
