//! Small problems shared by the unit tests.

use std::collections::HashMap;

use crate::errors::{Result, SearchError};
use crate::traits::{SearchHeuristic, SearchProblem, Transition};

/// States `0..size` on a line, stepping one left or right.
#[derive(Debug)]
pub(crate) struct Line {
    size: usize,
    goal: usize,
}

impl Line {
    pub(crate) fn new(size: usize, goal: usize) -> Self {
        Self { size, goal }
    }
}

impl SearchProblem for Line {
    type State = usize;
    type Action = &'static str;

    fn check(&self, state: &usize) -> Result<()> {
        if *state >= self.size {
            return Err(SearchError::InvalidState(format!(
                "{} is off the end of the line",
                state
            )));
        }
        Ok(())
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &usize) -> Vec<Transition<usize, &'static str>> {
        let mut moves = Vec::with_capacity(2);
        if *state > 0 {
            moves.push(Transition::unit("left", state - 1));
        }
        if state + 1 < self.size {
            moves.push(Transition::unit("right", state + 1));
        }
        moves
    }
}

impl SearchHeuristic for Line {
    fn heuristic(&self, state: &usize) -> usize {
        if *state > self.goal {
            state - self.goal
        } else {
            self.goal - state
        }
    }
}

/// Counts down from at most `.0` to zero, taking one step per expansion.
#[derive(Debug)]
pub(crate) struct Countdown(pub(crate) usize);

impl SearchProblem for Countdown {
    type State = usize;
    type Action = &'static str;

    fn is_goal(&self, state: &usize) -> bool {
        *state == 0
    }

    fn successors(&self, state: &usize) -> Vec<Transition<usize, &'static str>> {
        let mut moves = Vec::with_capacity(2);
        if *state > 0 {
            moves.push(Transition::unit("down", state - 1));
        }
        if *state < self.0 {
            moves.push(Transition::unit("up", state + 1));
        }
        moves
    }
}

/// A directed graph with weighted edges.
#[derive(Debug, Default)]
pub(crate) struct Weighted {
    edges: HashMap<char, Vec<(char, usize)>>,
    goal: char,
    estimates: HashMap<char, usize>,
}

impl Weighted {
    pub(crate) fn new(goal: char) -> Self {
        Self {
            goal,
            ..Self::default()
        }
    }

    pub(crate) fn edge(mut self, from: char, to: char, cost: usize) -> Self {
        self.edges.entry(from).or_insert_with(Vec::new).push((to, cost));
        self
    }

    pub(crate) fn estimate(mut self, node: char, h: usize) -> Self {
        self.estimates.insert(node, h);
        self
    }
}

impl SearchProblem for Weighted {
    type State = char;
    type Action = (char, char);

    fn is_goal(&self, state: &char) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &char) -> Vec<Transition<char, (char, char)>> {
        self.edges
            .get(state)
            .map(|edges| {
                edges
                    .iter()
                    .map(|(to, cost)| Transition::new((*state, *to), *to, *cost))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SearchHeuristic for Weighted {
    fn heuristic(&self, state: &char) -> usize {
        self.estimates.get(state).copied().unwrap_or(0)
    }
}
