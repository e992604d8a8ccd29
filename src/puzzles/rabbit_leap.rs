//! Rabbits on a row of stones.
//!
//! East facing rabbits only ever move right, west facing rabbits only ever
//! move left. A rabbit may step onto the next stone or jump one stone
//! further, as long as it lands on an empty stone. The puzzle is solved
//! when the two groups have swapped sides.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use anyhow::Error;
use itertools::Itertools;
use searcher::{SearchError, SearchHeuristic, SearchProblem, SearchResult, Transition};

use super::{lines, read_input, PuzzleError};
use crate::literal::parse_list;
use crate::{solve, RunOptions, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    East,
    West,
    Empty,
}

impl Stone {
    /// Direction of travel along the row, if there is a rabbit here.
    fn heading(self) -> Option<isize> {
        match self {
            Stone::East => Some(1),
            Stone::West => Some(-1),
            Stone::Empty => None,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let glyph = match self {
            Stone::East => "E",
            Stone::West => "W",
            Stone::Empty => "_",
        };
        write!(f, "{}", glyph)
    }
}

impl FromStr for Stone {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The numeric spelling is 1 for east, -1 for west and 0 for empty.
        match s {
            "E" | "e" | "1" => Ok(Stone::East),
            "W" | "w" | "-1" => Ok(Stone::West),
            "_" | "0" => Ok(Stone::Empty),
            _ => Err(PuzzleError::InvalidToken(s.to_string())),
        }
    }
}

/// A row of stones, which is the state of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pond(Vec<Stone>);

impl Pond {
    pub fn new(stones: Vec<Stone>) -> Self {
        Self(stones)
    }

    pub fn stones(&self) -> &[Stone] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn count(&self, kind: Stone) -> usize {
        self.0.iter().filter(|s| **s == kind).count()
    }

    /// The solved arrangement of the same rabbits.
    pub fn goal(&self) -> Pond {
        let mut stones = Vec::with_capacity(self.len());
        stones.extend(std::iter::repeat(Stone::West).take(self.count(Stone::West)));
        stones.extend(std::iter::repeat(Stone::Empty).take(self.count(Stone::Empty)));
        stones.extend(std::iter::repeat(Stone::East).take(self.count(Stone::East)));
        Pond(stones)
    }

    fn hop(&self, from: usize, to: usize) -> Pond {
        let mut stones = self.0.clone();
        stones.swap(from, to);
        Pond(stones)
    }
}

impl fmt::Display for Pond {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(","))
    }
}

impl FromStr for Pond {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stones = parse_list(s)?
            .iter()
            .map(|e| e.parse())
            .collect::<Result<Vec<Stone>, _>>()?;
        Ok(Pond(stones))
    }
}

/// A single rabbit moving along the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub facing: Stone,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let facing = match self.facing {
            Stone::East => "East",
            _ => "West",
        };
        let verb = if (self.from as isize - self.to as isize).abs() == 1 {
            "steps"
        } else {
            "jumps"
        };
        write!(
            f,
            "{} rabbit {} from stone {} to stone {}",
            facing, verb, self.from, self.to
        )
    }
}

/// The puzzle for one particular group of rabbits.
#[derive(Debug, Clone)]
pub struct RabbitLeap {
    goal: Pond,
}

impl RabbitLeap {
    /// Build the puzzle which swaps the rabbits found in `pond`.
    pub fn for_pond(pond: &Pond) -> Self {
        Self { goal: pond.goal() }
    }

    pub fn goal(&self) -> &Pond {
        &self.goal
    }
}

impl SearchProblem for RabbitLeap {
    type State = Pond;
    type Action = Hop;

    fn check(&self, state: &Pond) -> SearchResult<()> {
        if state.is_empty() {
            return Err(SearchError::InvalidState("the pond has no stones".to_string()));
        }
        if state.count(Stone::Empty) == 0 {
            return Err(SearchError::InvalidState(format!(
                "{} has no empty stone to hop onto",
                state
            )));
        }
        if state.goal() != self.goal {
            return Err(SearchError::InvalidState(format!(
                "{} does not hold the rabbits of {}",
                state, self.goal
            )));
        }
        Ok(())
    }

    fn is_goal(&self, state: &Pond) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Pond) -> Vec<Transition<Pond, Hop>> {
        let mut moves = Vec::new();
        for (from, stone) in state.stones().iter().enumerate() {
            let heading = match stone.heading() {
                Some(h) => h,
                None => continue,
            };

            for distance in 1..=2 {
                let to = from as isize + heading * distance;
                if to < 0 || to as usize >= state.len() {
                    break;
                }
                let to = to as usize;
                if state.stones()[to] == Stone::Empty {
                    let hop = Hop {
                        facing: *stone,
                        from,
                        to,
                    };
                    moves.push(Transition::unit(hop, state.hop(from, to)));
                }
            }
        }
        moves
    }
}

impl SearchHeuristic for RabbitLeap {
    /// Rabbits standing where the goal has something else. Each hop moves
    /// one rabbit, so each of them needs at least one more hop.
    fn heuristic(&self, state: &Pond) -> usize {
        state
            .stones()
            .iter()
            .zip(self.goal.stones())
            .filter(|(s, g)| **s != Stone::Empty && s != g)
            .count()
    }
}

pub(crate) fn main(input: Box<dyn Read + 'static>, options: &RunOptions) -> Result<(), Error> {
    let text = read_input(input)?;
    let pond: Pond = lines(&text)
        .next()
        .ok_or(PuzzleError::MissingInput("a row of stones"))?
        .parse()?;

    let problem = RabbitLeap::for_pond(&pond);
    println!("Initial: {}", pond);
    println!("Goal: {}", problem.goal());

    for strategy in options.strategies(&[Strategy::BreadthFirst, Strategy::DepthFirst]) {
        solve(&problem, pond.clone(), strategy, options)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use searcher::{astar, bfs, dfs, validate};

    const FIXTURE: &str = include_str!("../../puzzles/rabbit_leap/input.txt");

    fn classic() -> Pond {
        "[E,E,E,_,W,W,W]".parse().unwrap()
    }

    #[test]
    fn parse() {
        let pond = classic();
        assert_eq!(pond.len(), 7);
        assert_eq!(pond.to_string(), "[E,E,E,_,W,W,W]");
        assert_eq!(pond.goal().to_string(), "[W,W,W,_,E,E,E]");

        let numeric: Pond = "[1, 1, 0, -1, -1]".parse().unwrap();
        assert_eq!(numeric.to_string(), "[E,E,_,W,W]");

        assert!(matches!(
            "[E,X,W]".parse::<Pond>(),
            Err(PuzzleError::InvalidToken(_))
        ));
    }

    #[test]
    fn moves() {
        let pond: Pond = "[E,_,W]".parse().unwrap();
        let problem = RabbitLeap::for_pond(&pond);

        let moves = problem.successors(&pond);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].state.to_string(), "[_,E,W]");
        assert_eq!(moves[1].state.to_string(), "[E,W,_]");

        // Rabbits never hop off the end of the row.
        let edge: Pond = "[_,E,W,_]".parse().unwrap();
        let problem = RabbitLeap::for_pond(&edge);
        let targets: Vec<usize> = problem.successors(&edge).iter().map(|t| t.action.to).collect();
        assert_eq!(targets, vec![3, 0]);
    }

    #[test]
    fn successors_are_independent() {
        let pond = classic();
        let problem = RabbitLeap::for_pond(&pond);
        let before = pond.clone();
        for transition in problem.successors(&pond) {
            assert_ne!(transition.state, pond);
        }
        assert_eq!(pond, before);
    }

    #[test]
    fn hop_display() {
        let step = Hop {
            facing: Stone::East,
            from: 2,
            to: 3,
        };
        assert_eq!(step.to_string(), "East rabbit steps from stone 2 to stone 3");

        let jump = Hop {
            facing: Stone::West,
            from: 4,
            to: 2,
        };
        assert_eq!(jump.to_string(), "West rabbit jumps from stone 4 to stone 2");
    }

    #[test]
    fn breadth_first() {
        let pond = classic();
        let problem = RabbitLeap::for_pond(&pond);

        let report = bfs(&problem, pond.clone()).unwrap();
        let path = report.path().expect("the classic pond is solvable");
        assert_eq!(path.len(), 15);
        assert_eq!(path.destination().to_string(), "[W,W,W,_,E,E,E]");
        validate(&problem, &path).unwrap();

        let again = bfs(&problem, pond).unwrap();
        assert_eq!(report.explored(), again.explored());
    }

    #[test]
    fn depth_first() {
        let pond = classic();
        let problem = RabbitLeap::for_pond(&pond);

        let report = dfs(&problem, pond).unwrap();
        let path = report.path().expect("the classic pond is solvable");
        assert!(path.len() >= 15);
        validate(&problem, &path).unwrap();
    }

    #[test]
    fn heuristic() {
        let pond = classic();
        let problem = RabbitLeap::for_pond(&pond);
        assert_eq!(problem.heuristic(&pond), 6);
        assert_eq!(problem.heuristic(problem.goal()), 0);

        let report = astar(&problem, pond).unwrap();
        assert_eq!(report.path().unwrap().len(), 15);
    }

    #[test]
    fn invalid_ponds() {
        let full: Pond = "[E,E,W]".parse().unwrap();
        let problem = RabbitLeap::for_pond(&full);
        assert!(matches!(
            bfs(&problem, full),
            Err(SearchError::InvalidState(_))
        ));

        let empty: Pond = "[]".parse().unwrap();
        let problem = RabbitLeap::for_pond(&empty);
        assert!(matches!(
            bfs(&problem, empty),
            Err(SearchError::InvalidState(_))
        ));

        let problem = RabbitLeap::for_pond(&classic());
        let other: Pond = "[E,_,W]".parse().unwrap();
        assert!(problem.check(&other).is_err());
    }

    #[test]
    fn already_solved() {
        let pond = classic().goal();
        let problem = RabbitLeap::for_pond(&pond);
        let report = bfs(&problem, pond).unwrap();
        assert!(report.path().unwrap().is_empty());
        assert_eq!(report.explored(), 0);
    }

    #[test]
    fn main_runs_the_default_input() {
        main(Box::new(FIXTURE.as_bytes()), &RunOptions::default()).unwrap();

        let options = RunOptions {
            strategy: Some(Strategy::Greedy),
            ..RunOptions::default()
        };
        main(Box::new(FIXTURE.as_bytes()), &options).unwrap();

        // Blocked rabbits are reported, not treated as an error.
        main(Box::new("[E,E,W,W,_]".as_bytes()), &RunOptions::default()).unwrap();
    }

    #[test]
    fn main_rejects_bad_input() {
        let err = main(Box::new("\n\n".as_bytes()), &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::MissingInput(_))
        ));

        let err = main(Box::new("[E,X,W]".as_bytes()), &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::InvalidToken(_))
        ));

        let err = main(Box::new("[E,W]".as_bytes()), &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::InvalidState(_))
        ));
    }
}
