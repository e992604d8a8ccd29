//! Provides the building blocks for search algorithms

use std::default::Default;
use std::fmt::Debug;
use std::hash::Hash;
use std::time;

use tracing::{debug, info};

use crate::errors::{Result, SearchError};
use crate::path::Path;
use crate::space::{NodeId, SearchSpace};
use crate::traits::SearchProblem;

pub mod astar;
pub mod basic;
pub mod dijkstra;
pub mod greedy;

/// Tuning knobs shared by every search algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of expansions before giving up with
    /// [SearchError::StepLimitExhausted].
    pub limit: Option<usize>,

    /// Log progress every this many expansions.
    pub verbose: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_verbose(mut self, every: usize) -> Self {
        self.verbose = Some(every);
        self
    }
}

/// Trait used to implement queues of search nodes
/// which are waiting to be expanded.
pub trait SearchQueue: Default {
    fn pop(&mut self) -> Option<NodeId>;

    fn push(&mut self, item: NodeId);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub(crate) struct StepLimit {
    current: usize,
    maximum: usize,
}

impl StepLimit {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            current: 0,
            maximum: limit,
        }
    }

    pub(crate) fn increment(&mut self) -> Result<()> {
        if self.current >= self.maximum {
            return Err(SearchError::StepLimitExhausted(self.current));
        }
        self.current += 1;
        Ok(())
    }
}

/// Counters collected while a search runs.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    expanded: usize,
    generated: usize,
    duplicates: usize,
    relaxed: usize,
    peak_frontier: usize,
    started: time::Instant,
    elapsed: Option<time::Duration>,
}

impl SearchStatistics {
    pub(crate) fn new() -> Self {
        Self {
            expanded: 0,
            generated: 0,
            duplicates: 0,
            relaxed: 0,
            peak_frontier: 0,
            started: time::Instant::now(),
            elapsed: None,
        }
    }

    /// Number of states expanded, i.e. the size of the explored set.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of successors produced by the problem.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Successors dropped because their state was already known.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Known states which were given a cheaper path, including explored
    /// states which were reopened.
    pub fn relaxed(&self) -> usize {
        self.relaxed
    }

    /// Largest number of entries held in the frontier at once.
    pub fn peak_frontier(&self) -> usize {
        self.peak_frontier
    }

    /// Peak frontier plus explored set, a rough measure of the memory a
    /// search needed.
    pub fn footprint(&self) -> usize {
        self.peak_frontier + self.expanded
    }

    /// Wall time spent searching.
    pub fn elapsed(&self) -> time::Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    pub(crate) fn increment_expanded(&mut self) {
        self.expanded += 1;
    }

    pub(crate) fn increment_generated(&mut self) {
        self.generated += 1;
    }

    pub(crate) fn increment_duplicates(&mut self) {
        self.duplicates += 1;
    }

    pub(crate) fn increment_relaxed(&mut self) {
        self.relaxed += 1;
    }

    pub(crate) fn record_frontier(&mut self, len: usize) {
        self.peak_frontier = self.peak_frontier.max(len);
    }

    pub(crate) fn progress(&self, every: Option<usize>, frontier: usize, discovered: usize) {
        if let Some(n) = every {
            if n > 0 && self.expanded % n == 0 {
                debug!(
                    expanded = self.expanded,
                    frontier = frontier,
                    discovered = discovered,
                    "searching"
                );
            }
        }
    }

    pub(crate) fn finalise(&mut self, solved: bool) {
        let elapsed = self.started.elapsed();
        self.elapsed = Some(elapsed);
        info!(
            solved = solved,
            expanded = self.expanded,
            generated = self.generated,
            duplicates = self.duplicates,
            relaxed = self.relaxed,
            peak_frontier = self.peak_frontier,
            search_duration = elapsed.as_secs_f64(),
        );
    }
}

/// A goal found by a search, together with everything needed to
/// reconstruct how it was reached.
#[derive(Debug)]
pub struct Solution<S, A> {
    space: SearchSpace<S, A>,
    goal: NodeId,
}

impl<S, A> Solution<S, A>
where
    S: Debug + Clone + Eq + Hash,
    A: Debug + Clone,
{
    pub(crate) fn new(space: SearchSpace<S, A>, goal: NodeId) -> Self {
        Self { space, goal }
    }

    pub fn goal(&self) -> &S {
        self.space.node(self.goal).state()
    }

    /// Cost of the path to the goal.
    pub fn cost(&self) -> usize {
        self.space.node(self.goal).cost()
    }

    /// The full search space which produced this solution.
    pub fn space(&self) -> &SearchSpace<S, A> {
        &self.space
    }

    /// Reconstruct the path from the initial state to the goal.
    pub fn path(&self) -> Path<S, A> {
        self.space.extract_path(self.goal)
    }
}

/// How a search ended.
#[derive(Debug)]
pub enum Outcome<S, A> {
    Found(Solution<S, A>),

    /// The frontier emptied without reaching a goal.
    NoSolution,
}

impl<S, A> Outcome<S, A>
where
    S: Debug + Clone + Eq + Hash,
    A: Debug + Clone,
{
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn solution(&self) -> Option<&Solution<S, A>> {
        match self {
            Outcome::Found(solution) => Some(solution),
            Outcome::NoSolution => None,
        }
    }

    /// The path to the goal, or `None` when no solution exists.
    pub fn path(&self) -> Option<Path<S, A>> {
        self.solution().map(|s| s.path())
    }
}

/// Result of running a search algorithm to completion.
#[derive(Debug)]
pub struct SearchReport<S, A> {
    pub outcome: Outcome<S, A>,
    pub statistics: SearchStatistics,
}

impl<S, A> SearchReport<S, A>
where
    S: Debug + Clone + Eq + Hash,
    A: Debug + Clone,
{
    /// Count of explored (expanded) states.
    pub fn explored(&self) -> usize {
        self.statistics.expanded()
    }

    pub fn path(&self) -> Option<Path<S, A>> {
        self.outcome.path()
    }
}

pub type Report<P> = SearchReport<<P as SearchProblem>::State, <P as SearchProblem>::Action>;

/// Implementation of uninformed search, using a generic queue.
///
/// The queue (Q) decides the order of expansion; everything else,
/// including duplicate detection, is shared between algorithms.
#[derive(Debug)]
pub struct SearchAlgorithm<'p, P, Q>
where
    P: SearchProblem,
    Q: SearchQueue,
{
    problem: &'p P,
    space: SearchSpace<P::State, P::Action>,
    queue: Q,
    counter: Option<StepLimit>,
    options: SearchOptions,
    statistics: SearchStatistics,
}

impl<'p, P, Q> SearchAlgorithm<'p, P, Q>
where
    P: SearchProblem,
    Q: SearchQueue,
{
    pub(crate) fn new(problem: &'p P, origin: P::State, options: SearchOptions) -> Result<Self> {
        problem.check(&origin)?;

        let space = SearchSpace::new(origin);
        let mut queue = Q::default();
        queue.push(space.root());
        let mut statistics = SearchStatistics::new();
        statistics.record_frontier(queue.len());

        Ok(Self {
            problem,
            space,
            queue,
            counter: options.limit.map(StepLimit::new),
            options,
            statistics,
        })
    }

    fn finish(mut self, goal: Option<NodeId>) -> Report<P> {
        self.statistics.finalise(goal.is_some());
        let outcome = match goal {
            Some(id) => Outcome::Found(Solution::new(self.space, id)),
            None => Outcome::NoSolution,
        };
        SearchReport {
            outcome,
            statistics: self.statistics,
        }
    }

    /// Run the search to completion.
    pub fn run(mut self) -> Result<Report<P>> {
        while let Some(id) = self.queue.pop() {
            let node = self.space.node(id);
            if node.is_closed() {
                continue;
            }

            if self.problem.is_goal(node.state()) {
                return Ok(self.finish(Some(id)));
            }

            if let Some(counter) = self.counter.as_mut() {
                counter.increment()?;
            }

            let cost = node.cost();
            let transitions = self.problem.successors(node.state());
            self.space.close(id);
            self.statistics.increment_expanded();
            self.statistics
                .progress(self.options.verbose, self.queue.len(), self.space.len());

            for transition in transitions {
                self.statistics.increment_generated();

                // Already explored or already waiting in the queue.
                if self.space.lookup(&transition.state).is_some() {
                    self.statistics.increment_duplicates();
                    continue;
                }

                let child = self.space.insert(
                    transition.state,
                    id,
                    transition.action,
                    cost + transition.cost,
                );
                self.queue.push(child);
            }
            self.statistics.record_frontier(self.queue.len());
        }

        Ok(self.finish(None))
    }
}
