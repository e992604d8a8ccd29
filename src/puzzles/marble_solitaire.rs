//! Marble solitaire on a 7x7 board.
//!
//! A marble jumps over an orthogonal neighbour into the empty hole directly
//! beyond it, and the marble jumped over is taken off the board. The puzzle
//! is solved when a single marble is left, sitting in the centre hole.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use anyhow::Error;
use geometry::coord2d::{Direction, Grid, Point};
use itertools::Itertools;
use searcher::{SearchError, SearchHeuristic, SearchProblem, SearchResult, Transition};

use super::{lines, read_input, PuzzleError};
use crate::{solve, RunOptions, Strategy};

const SIDE: usize = 7;
const CELLS: usize = SIDE * SIDE;
const CENTRE: usize = CELLS / 2;

fn bit(index: usize) -> u64 {
    1 << index
}

/// The holes of a board and the marbles sitting in them, one bit per cell
/// in row order.
///
/// Written one row per line, with `o` for a marble, `.` for an empty hole
/// and `#` where the board has no hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    holes: u64,
    marbles: u64,
}

impl Board {
    /// Number of marbles left.
    pub fn marbles(&self) -> usize {
        self.marbles.count_ones() as usize
    }

    fn has_hole(&self, index: usize) -> bool {
        self.holes & bit(index) != 0
    }

    fn has_marble(&self, index: usize) -> bool {
        self.marbles & bit(index) != 0
    }

    fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CELLS).filter(move |&i| self.has_marble(i))
    }

    fn glyph(&self, index: usize) -> char {
        if self.has_marble(index) {
            'o'
        } else if self.has_hole(index) {
            '.'
        } else {
            '#'
        }
    }

    fn jump(&self, from: usize, over: usize, to: usize) -> Board {
        Board {
            holes: self.holes,
            marbles: (self.marbles & !bit(from) & !bit(over)) | bit(to),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = (0..SIDE).map(|row| (0..SIDE).map(|col| self.glyph(row * SIDE + col)).collect::<String>());
        write!(f, "{}", rows.format(" "))
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = lines(s).collect();
        if rows.len() < SIDE {
            return Err(PuzzleError::MissingInput("seven rows of holes"));
        }

        let mut board = Board { holes: 0, marbles: 0 };
        for (r, row) in rows.iter().enumerate() {
            if r >= SIDE || row.chars().count() != SIDE {
                return Err(PuzzleError::InvalidToken(row.to_string()));
            }

            for (c, glyph) in row.chars().enumerate() {
                let cell = bit(r * SIDE + c);
                match glyph {
                    'o' | 'O' | '1' => {
                        board.holes |= cell;
                        board.marbles |= cell;
                    }
                    '.' | '0' => board.holes |= cell,
                    '#' => {}
                    _ => return Err(PuzzleError::InvalidToken(glyph.to_string())),
                }
            }
        }
        Ok(board)
    }
}

/// A marble jumping two cells in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: Point,
    pub direction: Direction,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "marble at {} jumps {}", self.from, self.direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    /// Marbles left beyond the last one. Every jump removes exactly one
    /// marble, so this is the exact number of moves to any single marble.
    RemainingMarbles,

    /// Sum of the Manhattan distances of the marbles from the centre. It
    /// can overestimate, so A* is not guaranteed a shortest path with it.
    DistanceToCentre,
}

const ESTIMATES: [Estimate; 2] = [Estimate::RemainingMarbles, Estimate::DistanceToCentre];

impl Estimate {
    pub fn all() -> impl Iterator<Item = Self> {
        ESTIMATES.iter().cloned()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Estimate::RemainingMarbles => "remaining marbles",
            Estimate::DistanceToCentre => "distance to centre",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct MarbleSolitaire {
    grid: Grid,
    centre: Point,
    estimate: Estimate,
}

impl MarbleSolitaire {
    pub fn new(estimate: Estimate) -> Self {
        let grid = Grid::square(SIDE);
        let centre = grid.point(CENTRE).unwrap_or_default();
        Self {
            grid,
            centre,
            estimate,
        }
    }

    /// The cells jumped over and landed on when moving from `point`.
    fn landing(&self, point: Point, direction: Direction) -> Option<(usize, usize)> {
        let over = self.grid.step(point, direction)?;
        let to = self.grid.step(over, direction)?;
        Some((self.grid.index(over)?, self.grid.index(to)?))
    }
}

impl SearchProblem for MarbleSolitaire {
    type State = Board;
    type Action = Jump;

    fn check(&self, state: &Board) -> SearchResult<()> {
        if !state.has_hole(CENTRE) {
            return Err(SearchError::InvalidState(format!("{} has no centre hole", state)));
        }
        if state.marbles() == 0 {
            return Err(SearchError::InvalidState(format!("{} has no marbles", state)));
        }
        Ok(())
    }

    fn is_goal(&self, state: &Board) -> bool {
        state.marbles == bit(CENTRE)
    }

    fn successors(&self, state: &Board) -> Vec<Transition<Board, Jump>> {
        let mut moves = Vec::new();
        for from in state.occupied() {
            let point = match self.grid.point(from) {
                Some(p) => p,
                None => continue,
            };

            for direction in Direction::all() {
                if let Some((over, to)) = self.landing(point, direction) {
                    if state.has_marble(over) && state.has_hole(to) && !state.has_marble(to) {
                        let jump = Jump {
                            from: point,
                            direction,
                        };
                        moves.push(Transition::unit(jump, state.jump(from, over, to)));
                    }
                }
            }
        }
        moves
    }
}

impl SearchHeuristic for MarbleSolitaire {
    fn heuristic(&self, state: &Board) -> usize {
        match self.estimate {
            Estimate::RemainingMarbles => state.marbles().saturating_sub(1),
            Estimate::DistanceToCentre => state
                .occupied()
                .filter_map(|i| self.grid.point(i))
                .map(|p| p.manhattan_distance(self.centre) as usize)
                .sum(),
        }
    }
}

pub(crate) fn main(input: Box<dyn Read + 'static>, options: &RunOptions) -> Result<(), Error> {
    let text = read_input(input)?;
    let board: Board = text.parse()?;

    println!("Initial: {}", board);
    for estimate in Estimate::all() {
        let problem = MarbleSolitaire::new(estimate);
        println!("Estimate: {} ({})", estimate, problem.heuristic(&board));
        for strategy in options.strategies(&[Strategy::Greedy, Strategy::AStar]) {
            solve(&problem, board, strategy, options)?;
        }
    }

    Ok(())
}
