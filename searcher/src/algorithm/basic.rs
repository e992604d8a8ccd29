pub use bfs::{bfs, bfs_with_options};
pub use dfs::{dfs, dfs_with_options};

mod bfs {
    use std::collections::VecDeque;
    use std::default::Default;

    use crate::algorithm::{Report, SearchAlgorithm, SearchOptions, SearchQueue};
    use crate::errors::Result;
    use crate::space::NodeId;
    use crate::SearchProblem;

    #[derive(Debug)]
    pub struct BreadthQueue {
        queue: VecDeque<NodeId>,
    }

    impl SearchQueue for BreadthQueue {
        fn pop(&mut self) -> Option<NodeId> {
            self.queue.pop_front()
        }

        fn push(&mut self, item: NodeId) {
            self.queue.push_back(item);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    impl Default for BreadthQueue {
        fn default() -> Self {
            BreadthQueue {
                queue: VecDeque::new(),
            }
        }
    }

    pub type BreadthFirstSearcher<'p, P> = SearchAlgorithm<'p, P, BreadthQueue>;

    /// Breadth-first search, where the order is determined
    /// by the transitions returned by [SearchProblem::successors].
    ///
    /// The first goal found is reached by a path with the fewest
    /// transitions.
    pub fn bfs<P>(problem: &P, origin: P::State) -> Result<Report<P>>
    where
        P: SearchProblem,
    {
        bfs_with_options(problem, origin, SearchOptions::default())
    }

    pub fn bfs_with_options<P>(problem: &P, origin: P::State, options: SearchOptions) -> Result<Report<P>>
    where
        P: SearchProblem,
    {
        BreadthFirstSearcher::new(problem, origin, options)?.run()
    }
}

mod dfs {
    use std::default::Default;

    use crate::algorithm::{Report, SearchAlgorithm, SearchOptions, SearchQueue};
    use crate::errors::Result;
    use crate::space::NodeId;
    use crate::SearchProblem;

    #[derive(Debug)]
    pub struct DepthQueue {
        queue: Vec<NodeId>,
    }

    impl Default for DepthQueue {
        fn default() -> Self {
            DepthQueue { queue: Vec::new() }
        }
    }

    impl SearchQueue for DepthQueue {
        fn pop(&mut self) -> Option<NodeId> {
            self.queue.pop()
        }

        fn push(&mut self, item: NodeId) {
            self.queue.push(item);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    pub type DepthFirstSearcher<'p, P> = SearchAlgorithm<'p, P, DepthQueue>;

    /// Depth-first search. Finds some path to a goal, with no
    /// guarantee that it is the shortest one.
    pub fn dfs<P>(problem: &P, origin: P::State) -> Result<Report<P>>
    where
        P: SearchProblem,
    {
        dfs_with_options(problem, origin, SearchOptions::default())
    }

    pub fn dfs_with_options<P>(problem: &P, origin: P::State, options: SearchOptions) -> Result<Report<P>>
    where
        P: SearchProblem,
    {
        DepthFirstSearcher::new(problem, origin, options)?.run()
    }
}
