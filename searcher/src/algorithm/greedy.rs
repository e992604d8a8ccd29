//! Greedy best-first search

use super::astar::best_first;
use super::{Report, SearchOptions};
use crate::errors::Result;
use crate::traits::SearchHeuristic;

/// Expand whichever open state looks closest to a goal, ignoring the cost
/// paid to reach it.
///
/// This usually expands far fewer states than A*, but the path found is
/// not necessarily the cheapest. The first path found to each state is
/// kept.
pub fn run<P>(problem: &P, origin: P::State) -> Result<Report<P>>
where
    P: SearchHeuristic,
{
    run_with_options(problem, origin, SearchOptions::default())
}

pub fn run_with_options<P>(problem: &P, origin: P::State, options: SearchOptions) -> Result<Report<P>>
where
    P: SearchHeuristic,
{
    best_first(problem, origin, options, false, |_, state| problem.heuristic(state))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{Line, Weighted};
    use crate::SearchError;

    fn diamond() -> Weighted {
        Weighted::new('G')
            .edge('S', 'A', 1)
            .edge('S', 'B', 4)
            .edge('A', 'B', 1)
            .edge('A', 'G', 5)
            .edge('B', 'G', 1)
            .estimate('S', 3)
            .estimate('A', 2)
            .estimate('B', 1)
    }

    #[test]
    fn follows_the_estimate() {
        let report = run(&diamond(), 'S').unwrap();
        let path = report.path().unwrap();

        // B looks closer than A, so the dearer edge S -> B is taken.
        assert_eq!(path.states().cloned().collect::<String>(), "SBG");
        assert_eq!(path.cost(), 5);
        assert_eq!(report.explored(), 2);
        assert_eq!(report.statistics.relaxed(), 0);
    }

    #[test]
    fn straight_line() {
        let line = Line::new(50, 40);
        let report = run(&line, 20).unwrap();
        assert_eq!(report.path().unwrap().len(), 20);
        assert_eq!(report.explored(), 20);
    }

    #[test]
    fn no_solution() {
        let report = run(&Line::new(10, 42), 0).unwrap();
        assert!(report.path().is_none());
        assert_eq!(report.explored(), 10);
    }

    #[test]
    fn step_limit() {
        let options = SearchOptions::default().with_limit(3);
        assert_eq!(
            run_with_options(&Line::new(50, 40), 0, options).unwrap_err(),
            SearchError::StepLimitExhausted(3)
        );
    }
}
