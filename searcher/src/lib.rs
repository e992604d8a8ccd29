//! Generalized state-space search algorithms.
//!
//! To use these search algorithms, implement at least the trait
//! [SearchProblem], which describes goals and how to move between states.
//! Implement [SearchHeuristic] as well to use [astar].

pub mod algorithm;
mod errors;
mod path;
mod space;
mod traits;
mod validate;

#[cfg(test)]
mod test_utils;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use path::{Path, Step};
pub use space::{NodeId, NodeStatus, SearchNode, SearchSpace};
pub use traits::{SearchHeuristic, SearchProblem, Transition};
pub use validate::validate;

pub use algorithm::astar::{astar, astar_with_options};
pub use algorithm::basic::{bfs, bfs_with_options, dfs, dfs_with_options};
pub use algorithm::{dijkstra, greedy};
pub use algorithm::{Outcome, Report, SearchOptions, SearchReport, SearchStatistics, Solution};
