//! Dijkstra's Algorithm

use super::astar::best_first;
use super::{Report, SearchOptions};
use crate::errors::Result;
use crate::traits::SearchProblem;

/// Perform a search using Dijkstra's algorithm.
///
/// Dijkstra's algorithm behaves like a breadth first search, but always
/// expands the cheapest known path next, so it stays optimal when
/// transitions have different costs. It is A* with a heuristic of zero.
pub fn run<P>(problem: &P, origin: P::State) -> Result<Report<P>>
where
    P: SearchProblem,
{
    run_with_options(problem, origin, SearchOptions::default())
}

pub fn run_with_options<P>(problem: &P, origin: P::State, options: SearchOptions) -> Result<Report<P>>
where
    P: SearchProblem,
{
    best_first(problem, origin, options, true, |g, _| g)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::basic::bfs;
    use crate::test_utils::Weighted;

    #[test]
    fn cheaper_than_bfs() {
        let graph = Weighted::new('G')
            .edge('S', 'G', 10)
            .edge('S', 'A', 1)
            .edge('A', 'B', 1)
            .edge('B', 'G', 1);

        let shortest = bfs(&graph, 'S').unwrap().path().unwrap();
        assert_eq!(shortest.len(), 1);
        assert_eq!(shortest.cost(), 10);

        let cheapest = run(&graph, 'S').unwrap().path().unwrap();
        assert_eq!(cheapest.len(), 3);
        assert_eq!(cheapest.cost(), 3);
    }

    #[test]
    fn step_limit() {
        use crate::SearchError;

        let graph = Weighted::new('G')
            .edge('S', 'A', 1)
            .edge('A', 'B', 1)
            .edge('B', 'G', 1);
        let options = SearchOptions::default().with_limit(2);
        assert_eq!(
            run_with_options(&graph, 'S', options).unwrap_err(),
            SearchError::StepLimitExhausted(2)
        );
    }
}
