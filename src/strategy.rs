//! Choosing a search algorithm and reporting what it found.

use std::fmt;
use std::str::FromStr;

use anyhow::Error;
use searcher::{self, Report, SearchHeuristic, SearchOptions};
use tracing::{info, warn};

use crate::LabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    Greedy,
    AStar,
}

impl Strategy {
    /// Run this strategy on a problem.
    pub fn search<P>(self, problem: &P, origin: P::State, options: SearchOptions) -> searcher::SearchResult<Report<P>>
    where
        P: SearchHeuristic,
    {
        match self {
            Strategy::BreadthFirst => searcher::bfs_with_options(problem, origin, options),
            Strategy::DepthFirst => searcher::dfs_with_options(problem, origin, options),
            Strategy::UniformCost => searcher::dijkstra::run_with_options(problem, origin, options),
            Strategy::Greedy => searcher::greedy::run_with_options(problem, origin, options),
            Strategy::AStar => searcher::astar_with_options(problem, origin, options),
        }
    }
}

impl FromStr for Strategy {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Strategy::BreadthFirst),
            "dfs" => Ok(Strategy::DepthFirst),
            "ucs" | "dijkstra" => Ok(Strategy::UniformCost),
            "greedy" | "gbfs" => Ok(Strategy::Greedy),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(LabError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "BFS",
            Strategy::DepthFirst => "DFS",
            Strategy::UniformCost => "UCS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
        };
        write!(f, "{}", name)
    }
}

/// Settings for one run of a puzzle.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Strategy requested on the command line. Puzzles fall back to their
    /// own defaults when this is empty.
    pub strategy: Option<Strategy>,
    pub search: SearchOptions,

    /// Generate the initial state by scrambling the goal this many moves,
    /// for puzzles which support it.
    pub scramble: Option<usize>,
    pub seed: u64,

    /// Repeat each scramble depth this many times and report average
    /// resource usage instead of a single path.
    pub batch: Option<usize>,
}

impl RunOptions {
    /// The strategies to run, given the puzzle's defaults.
    pub fn strategies(&self, defaults: &[Strategy]) -> Vec<Strategy> {
        match self.strategy {
            Some(s) => vec![s],
            None => defaults.to_vec(),
        }
    }
}

/// Search, validate the path found, and print it one step per line.
pub fn solve<P>(problem: &P, origin: P::State, strategy: Strategy, options: &RunOptions) -> Result<Report<P>, Error>
where
    P: SearchHeuristic,
    P::State: fmt::Display,
    P::Action: fmt::Display,
{
    info!(strategy = %strategy, "starting search");
    let report = strategy.search(problem, origin, options.search.clone())?;

    println!("{}", strategy);
    match report.path() {
        Some(path) => {
            searcher::validate(problem, &path)?;
            print!("{}", path);
            println!("Path length: {} (cost {})", path.len(), path.cost());
        }
        None => {
            warn!("frontier exhausted without reaching a goal");
            println!("No solution");
        }
    }
    println!("Number of nodes explored: {}", report.explored());

    Ok(report)
}
