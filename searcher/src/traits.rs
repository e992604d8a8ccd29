use std::fmt::Debug;
use std::hash::Hash;

use crate::errors::Result;

/// One legal move out of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, A> {
    /// Describes how `state` was produced from its parent.
    pub action: A,

    /// The resulting state. Never aliases the parent.
    pub state: S,

    /// Cost of taking this transition.
    pub cost: usize,
}

impl<S, A> Transition<S, A> {
    pub fn new(action: A, state: S, cost: usize) -> Self {
        Self {
            action,
            state,
            cost,
        }
    }

    /// A transition with unit cost.
    pub fn unit(action: A, state: S) -> Self {
        Self::new(action, state, 1)
    }
}

/// Provides an interface for conducting searches.
///
/// A problem describes a state space: which states are goals and how to move
/// between them. The states themselves are plain values, node identity in
/// the search is decided by `Eq` and `Hash` on [SearchProblem::State] alone,
/// never by how a state was reached.
pub trait SearchProblem {
    type State: Debug + Clone + Eq + Hash;
    type Action: Debug + Clone + PartialEq;

    /// Validate a state supplied from outside the search.
    ///
    /// Search algorithms call this on the initial state before doing
    /// any work, and fail with [crate::SearchError::InvalidState].
    fn check(&self, _state: &Self::State) -> Result<()> {
        Ok(())
    }

    /// Indicates that this state satisfies the problem, and causes the
    /// search algorithm to stop.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Produces every state reachable in one legal move from `state`.
    fn successors(&self, state: &Self::State) -> Vec<Transition<Self::State, Self::Action>>;
}

/// An interface for searching when a heuristic can be provided.
///
/// The heuristic must never overestimate the remaining cost to a goal,
/// otherwise [crate::astar] loses its optimality guarantee. It need not be
/// consistent: A* reopens explored states when it finds a cheaper path to
/// them, at the price of expanding them more than once.
pub trait SearchHeuristic: SearchProblem {
    /// Best guess at the cost remaining from `state` to a goal.
    fn heuristic(&self, state: &Self::State) -> usize;
}
