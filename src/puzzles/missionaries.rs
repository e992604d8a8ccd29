//! Missionaries and cannibals.
//!
//! Three missionaries and three cannibals need to cross a river in a boat
//! which carries at most two. Cannibals may never outnumber the missionaries
//! on a bank where any missionaries are standing.

use std::fmt;
use std::io::Read;

use anyhow::Error;
use searcher::{SearchError, SearchHeuristic, SearchProblem, SearchResult, Transition};

use super::{lines, read_input, PuzzleError};
use crate::literal::parse_values;
use crate::{solve, RunOptions, Strategy};

/// People of each kind in the party.
pub const TOTAL: u8 = 3;

/// Everyone the boat can carry in one crossing, as (missionaries, cannibals).
const LOADS: [(u8, u8); 5] = [(2, 0), (0, 2), (1, 1), (1, 0), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    Far,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Start => Side::Far,
            Side::Far => Side::Start,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Start => write!(f, "starting bank"),
            Side::Far => write!(f, "far bank"),
        }
    }
}

/// Who is on the starting bank, and where the boat is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bank {
    pub missionaries: u8,
    pub cannibals: u8,
    pub boat: Side,
}

impl Bank {
    /// Everyone waiting on the starting bank.
    pub fn start() -> Self {
        Self {
            missionaries: TOTAL,
            cannibals: TOTAL,
            boat: Side::Start,
        }
    }

    /// Build a bank from raw counts, with the boat given as 1 for the
    /// starting bank and 0 for the far bank.
    pub fn from_counts(missionaries: i32, cannibals: i32, boat: i32) -> SearchResult<Self> {
        let count = |n: i32, kind: &str| {
            if n < 0 || n > TOTAL as i32 {
                Err(SearchError::InvalidState(format!(
                    "{} {} is not between 0 and {}",
                    n, kind, TOTAL
                )))
            } else {
                Ok(n as u8)
            }
        };

        let boat = match boat {
            1 => Side::Start,
            0 => Side::Far,
            b => {
                return Err(SearchError::InvalidState(format!(
                    "boat must be 1 (starting bank) or 0 (far bank), found {}",
                    b
                )))
            }
        };

        Ok(Self {
            missionaries: count(missionaries, "missionaries")?,
            cannibals: count(cannibals, "cannibals")?,
            boat,
        })
    }

    /// Neither bank has missionaries outnumbered by cannibals.
    pub fn is_safe(&self) -> bool {
        let safe = |m: u8, c: u8| m == 0 || m >= c;
        self.missionaries <= TOTAL
            && self.cannibals <= TOTAL
            && safe(self.missionaries, self.cannibals)
            && safe(TOTAL - self.missionaries, TOTAL - self.cannibals)
    }

    fn cross(&self, missionaries: u8, cannibals: u8) -> Option<Bank> {
        let (m, c) = match self.boat {
            Side::Start => (
                self.missionaries.checked_sub(missionaries)?,
                self.cannibals.checked_sub(cannibals)?,
            ),
            Side::Far => (self.missionaries + missionaries, self.cannibals + cannibals),
        };

        let next = Bank {
            missionaries: m,
            cannibals: c,
            boat: self.boat.opposite(),
        };
        if next.is_safe() {
            Some(next)
        } else {
            None
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let people = |m: u8, c: u8| {
            format!(
                "{}{}{}{}",
                "M".repeat(m as usize),
                ".".repeat((TOTAL - m) as usize),
                "C".repeat(c as usize),
                ".".repeat((TOTAL - c) as usize)
            )
        };
        let river = match self.boat {
            Side::Start => "|B~~|",
            Side::Far => "|~~B|",
        };
        write!(
            f,
            "{} {} {}",
            people(self.missionaries, self.cannibals),
            river,
            people(TOTAL - self.missionaries, TOTAL - self.cannibals)
        )
    }
}

/// One trip of the boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub missionaries: u8,
    pub cannibals: u8,
    pub towards: Side,
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let plural = |n: u8, one: &'static str, many: &'static str| if n == 1 { one } else { many };
        write!(
            f,
            "{} {} and {} {} cross to the {}",
            self.missionaries,
            plural(self.missionaries, "missionary", "missionaries"),
            self.cannibals,
            plural(self.cannibals, "cannibal", "cannibals"),
            self.towards
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiverCrossing;

impl SearchProblem for RiverCrossing {
    type State = Bank;
    type Action = Crossing;

    fn check(&self, state: &Bank) -> SearchResult<()> {
        if state.is_safe() {
            Ok(())
        } else {
            Err(SearchError::InvalidState(format!(
                "missionaries are outnumbered in {}",
                state
            )))
        }
    }

    fn is_goal(&self, state: &Bank) -> bool {
        state.missionaries == 0 && state.cannibals == 0 && state.boat == Side::Far
    }

    fn successors(&self, state: &Bank) -> Vec<Transition<Bank, Crossing>> {
        LOADS
            .iter()
            .filter_map(|&(m, c)| {
                state.cross(m, c).map(|next| {
                    let crossing = Crossing {
                        missionaries: m,
                        cannibals: c,
                        towards: next.boat,
                    };
                    Transition::unit(crossing, next)
                })
            })
            .collect()
    }
}

impl SearchHeuristic for RiverCrossing {
    /// The boat moves at most two people per trip.
    fn heuristic(&self, state: &Bank) -> usize {
        (state.missionaries as usize + state.cannibals as usize + 1) / 2
    }
}

fn parse_bank(line: &str) -> Result<Bank, Error> {
    let values = parse_values::<i32>(line)?;
    match values.as_slice() {
        [m, c, b] => Ok(Bank::from_counts(*m, *c, *b)?),
        _ => Err(PuzzleError::InvalidToken(line.to_string()).into()),
    }
}

pub(crate) fn main(input: Box<dyn Read + 'static>, options: &RunOptions) -> Result<(), Error> {
    let text = read_input(input)?;
    let bank = match lines(&text).next() {
        Some(line) => parse_bank(line)?,
        None => Bank::start(),
    };

    println!("Initial: {}", bank);
    for strategy in options.strategies(&[Strategy::BreadthFirst, Strategy::DepthFirst]) {
        solve(&RiverCrossing, bank, strategy, options)?;
    }

    Ok(())
}
