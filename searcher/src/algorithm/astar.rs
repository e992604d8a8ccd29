use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Outcome, Report, SearchOptions, SearchReport, SearchStatistics, Solution, StepLimit};
use crate::errors::Result;
use crate::space::{NodeId, SearchSpace};
use crate::traits::{SearchHeuristic, SearchProblem};

/// Entry in the frontier, ordered by estimated total cost and then by
/// insertion order, so that runs are reproducible.
type Priority = Reverse<(usize, u64, NodeId)>;

/// A priority queue which always yields the node with the lowest
/// `g + h`.
#[derive(Debug, Default)]
pub struct AStarQueue {
    queue: BinaryHeap<Priority>,
    sequence: u64,
}

impl AStarQueue {
    fn push(&mut self, id: NodeId, estimate: usize) {
        self.queue.push(Reverse((estimate, self.sequence, id)));
        self.sequence += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop().map(|Reverse((_, _, id))| id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Best-first search, expanding the open node with the lowest
/// `priority(g, state)` first.
///
/// With `relax` set, a strictly cheaper path to a known state replaces the
/// recorded one and the state is queued again, even if it was already
/// expanded. Otherwise the first path found to each state is kept.
pub(crate) fn best_first<P, F>(
    problem: &P,
    origin: P::State,
    options: SearchOptions,
    relax: bool,
    priority: F,
) -> Result<Report<P>>
where
    P: SearchProblem,
    F: Fn(usize, &P::State) -> usize,
{
    problem.check(&origin)?;

    let mut statistics = SearchStatistics::new();
    let mut counter = options.limit.map(StepLimit::new);
    let mut queue = AStarQueue::default();

    let f = priority(0, &origin);
    let mut space = SearchSpace::new(origin);
    queue.push(space.root(), f);
    statistics.record_frontier(queue.len());

    let mut goal = None;
    while let Some(id) = queue.pop() {
        let node = space.node(id);

        // Stale entry left behind by a relaxation.
        if node.is_closed() {
            continue;
        }

        if problem.is_goal(node.state()) {
            goal = Some(id);
            break;
        }

        if let Some(counter) = counter.as_mut() {
            counter.increment()?;
        }

        let cost = node.cost();
        let transitions = problem.successors(node.state());
        space.close(id);
        statistics.increment_expanded();
        statistics.progress(options.verbose, queue.len(), space.len());

        for transition in transitions {
            statistics.increment_generated();
            let g = cost + transition.cost;

            match space.lookup(&transition.state) {
                Some(existing) => {
                    if relax && space.relax(existing, id, transition.action, g) {
                        statistics.increment_relaxed();
                        queue.push(existing, priority(g, &transition.state));
                    } else {
                        statistics.increment_duplicates();
                    }
                }
                None => {
                    let f = priority(g, &transition.state);
                    let child = space.insert(transition.state, id, transition.action, g);
                    queue.push(child, f);
                }
            }
        }
        statistics.record_frontier(queue.len());
    }

    statistics.finalise(goal.is_some());
    let outcome = match goal {
        Some(id) => Outcome::Found(Solution::new(space, id)),
        None => Outcome::NoSolution,
    };

    Ok(SearchReport {
        outcome,
        statistics,
    })
}

/// A* search, guided by [SearchHeuristic::heuristic].
///
/// With an admissible heuristic the returned path has the minimum total
/// cost. Explored states are reopened when a cheaper path to them turns up,
/// so the heuristic need not be consistent.
pub fn astar<P>(problem: &P, origin: P::State) -> Result<Report<P>>
where
    P: SearchHeuristic,
{
    astar_with_options(problem, origin, SearchOptions::default())
}

pub fn astar_with_options<P>(problem: &P, origin: P::State, options: SearchOptions) -> Result<Report<P>>
where
    P: SearchHeuristic,
{
    best_first(problem, origin, options, true, |g, state| {
        g + problem.heuristic(state)
    })
}
