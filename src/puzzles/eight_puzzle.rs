//! The sliding tile 8-puzzle.
//!
//! Eight numbered tiles sit on a 3x3 board with one blank cell. Any tile
//! next to the blank can slide into it, which is modelled as the blank
//! moving in the opposite direction.

use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Error;
use geometry::coord2d::{Direction, Grid, Point};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use searcher::{SearchError, SearchHeuristic, SearchOptions, SearchProblem, SearchResult, Transition};
use tracing::{info, warn};

use super::{lines, read_input, PuzzleError};
use crate::literal::parse_values;
use crate::{solve, RunOptions, Strategy};

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;

/// Deepest scramble measured in batch mode when no depth is given.
const BATCH_DEPTH: usize = 20;

/// Tiles in row order, with 0 standing for the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; CELLS]);

impl Board {
    /// Build a board, which must hold each of the tiles 0 through 8 once.
    pub fn new(tiles: &[u8]) -> SearchResult<Self> {
        if tiles.len() != CELLS {
            return Err(SearchError::InvalidState(format!(
                "a board has {} cells, found {}",
                CELLS,
                tiles.len()
            )));
        }

        let mut seen = [false; CELLS];
        for &tile in tiles {
            let slot = seen.get_mut(tile as usize).ok_or_else(|| {
                SearchError::InvalidState(format!("tile {} is not on a 3x3 board", tile))
            })?;
            if *slot {
                return Err(SearchError::InvalidState(format!("tile {} appears twice", tile)));
            }
            *slot = true;
        }

        let mut cells = [0; CELLS];
        cells.copy_from_slice(tiles);
        Ok(Board(cells))
    }

    /// The usual goal, tiles in order with the blank last.
    pub fn solved() -> Self {
        Board([1, 2, 3, 4, 5, 6, 7, 8, 0])
    }

    pub fn tiles(&self) -> &[u8] {
        &self.0
    }

    fn blank(&self) -> usize {
        self.0.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Parity of the number of tile pairs out of order, ignoring the blank.
    fn parity(&self) -> bool {
        self.0
            .iter()
            .filter(|&&t| t != 0)
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count()
            % 2
            == 1
    }

    /// On an odd width board a slide never changes the inversion parity, so
    /// two boards are connected exactly when their parities agree.
    pub fn is_solvable(&self, goal: &Board) -> bool {
        self.parity() == goal.parity()
    }

    fn slide(&self, from: usize, to: usize) -> Board {
        let mut cells = self.0;
        cells.swap(from, to);
        Board(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.0.chunks(SIDE).map(|row| {
            row.iter()
                .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                .join(" ")
        });
        write!(f, "{}", rows.format(" | "))
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = parse_values::<u8>(s)?;
        Ok(Board::new(&tiles)?)
    }
}

/// The direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide(pub Direction);

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "blank {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct EightPuzzle {
    goal: Board,
    grid: Grid,

    /// Where each tile sits in the goal, indexed by tile.
    targets: [Point; CELLS],
}

impl EightPuzzle {
    pub fn new(goal: Board) -> Self {
        let grid = Grid::square(SIDE);
        let mut targets = [Point::origin(); CELLS];
        for (index, &tile) in goal.tiles().iter().enumerate() {
            targets[tile as usize] = grid.point(index).unwrap_or_default();
        }

        Self {
            goal,
            grid,
            targets,
        }
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }
}

impl Default for EightPuzzle {
    fn default() -> Self {
        Self::new(Board::solved())
    }
}

impl SearchProblem for EightPuzzle {
    type State = Board;
    type Action = Slide;

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Board) -> Vec<Transition<Board, Slide>> {
        let blank = state.blank();
        let point = match self.grid.point(blank) {
            Some(p) => p,
            None => return Vec::new(),
        };

        self.grid
            .moves(point)
            .filter_map(|(direction, next)| {
                self.grid
                    .index(next)
                    .map(|to| Transition::unit(Slide(direction), state.slide(blank, to)))
            })
            .collect()
    }
}

impl SearchHeuristic for EightPuzzle {
    /// Sum of the Manhattan distances of each tile from its goal cell.
    fn heuristic(&self, state: &Board) -> usize {
        state
            .tiles()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .filter_map(|(index, &tile)| {
                self.grid
                    .point(index)
                    .map(|p| p.manhattan_distance(self.targets[tile as usize]) as usize)
            })
            .sum()
    }
}

/// Walk the blank randomly away from `goal`, never undoing the previous
/// move. The result is always solvable in at most `depth` moves.
pub fn scramble<R: Rng + ?Sized>(goal: &Board, depth: usize, rng: &mut R) -> Board {
    let puzzle = EightPuzzle::new(*goal);
    let mut board = *goal;
    let mut last: Option<Direction> = None;

    for _ in 0..depth {
        let moves: Vec<Transition<Board, Slide>> = puzzle
            .successors(&board)
            .into_iter()
            .filter(|t| Some(t.action.0.reverse()) != last)
            .collect();

        match moves.choose(rng) {
            Some(t) => {
                board = t.state;
                last = Some(t.action.0);
            }
            None => break,
        }
    }
    board
}

/// Average resource usage of one strategy over a batch of scrambles at the
/// same depth.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthUsage {
    pub depth: usize,
    pub runs: usize,
    pub expanded: f64,
    pub elapsed: Duration,

    /// Peak frontier plus explored states.
    pub memory: f64,
}

impl fmt::Display for DepthUsage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{:.1}\t{:?}\t{:.1}",
            self.depth, self.expanded, self.elapsed, self.memory
        )
    }
}

/// Search `runs` fresh scrambles at each depth and average the statistics.
pub fn usage_analysis<R, I>(
    problem: &EightPuzzle,
    depths: I,
    runs: usize,
    strategy: Strategy,
    options: &SearchOptions,
    rng: &mut R,
) -> SearchResult<Vec<DepthUsage>>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = usize>,
{
    if runs == 0 {
        return Ok(Vec::new());
    }

    depths
        .into_iter()
        .map(|depth| -> SearchResult<DepthUsage> {
            let mut expanded = 0;
            let mut memory = 0;
            let mut elapsed = Duration::default();

            for _ in 0..runs {
                let initial = scramble(problem.goal(), depth, rng);
                let report = strategy.search(problem, initial, options.clone())?;
                expanded += report.statistics.expanded();
                memory += report.statistics.footprint();
                elapsed += report.statistics.elapsed();
            }

            Ok(DepthUsage {
                depth,
                runs,
                expanded: expanded as f64 / runs as f64,
                elapsed: elapsed / runs as u32,
                memory: memory as f64 / runs as f64,
            })
        })
        .collect()
}

pub(crate) fn main(input: Box<dyn Read + 'static>, options: &RunOptions) -> Result<(), Error> {
    let text = read_input(input)?;
    let mut input_lines = lines(&text);

    let first = input_lines.next();
    let goal = match input_lines.next() {
        Some(line) => line.parse()?,
        None => Board::solved(),
    };

    let problem = EightPuzzle::new(goal);

    if let Some(runs) = options.batch {
        let deepest = options.scramble.unwrap_or(BATCH_DEPTH);
        let mut rng = StdRng::seed_from_u64(options.seed);
        for strategy in options.strategies(&[Strategy::AStar]) {
            info!(strategy = %strategy, runs, deepest, "measuring resource usage");
            println!("{}", strategy);
            println!("depth\texpanded\ttime\tmemory");
            for usage in usage_analysis(&problem, 0..=deepest, runs, strategy, &options.search, &mut rng)? {
                println!("{}", usage);
            }
        }
        return Ok(());
    }

    let initial = match options.scramble {
        Some(depth) => {
            let mut rng = StdRng::seed_from_u64(options.seed);
            let board = scramble(problem.goal(), depth, &mut rng);
            info!(depth, seed = options.seed, "scrambled the goal");
            board
        }
        None => first
            .ok_or(PuzzleError::MissingInput("an initial board"))?
            .parse()?,
    };

    println!("Initial: {}", initial);
    println!("Goal: {}", problem.goal());
    println!("Heuristic: {}", problem.heuristic(&initial));

    if !initial.is_solvable(problem.goal()) {
        warn!("inversion parity differs from the goal, the search will exhaust every reachable board");
    }

    for strategy in options.strategies(&[Strategy::AStar]) {
        solve(&problem, initial, strategy, options)?;
    }

    Ok(())
}
