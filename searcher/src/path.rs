use std::fmt;

/// A single state along a path, with the action that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S, A> {
    state: S,
    action: Option<A>,
    cost: usize,
}

impl<S, A> Step<S, A> {
    pub(crate) fn new(state: S, action: Option<A>, cost: usize) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// `None` for the initial state.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Cost accumulated up to and including this step.
    pub fn cost(&self) -> usize {
        self.cost
    }
}

/// The ordered steps from an initial state to a goal.
///
/// A path always contains at least the initial state; when that state was
/// already a goal the path has length zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, A> {
    steps: Vec<Step<S, A>>,
}

impl<S, A> Path<S, A> {
    pub(crate) fn new(steps: Vec<Step<S, A>>) -> Self {
        debug_assert!(!steps.is_empty(), "A path must contain its origin");
        Self { steps }
    }

    /// Number of transitions taken.
    pub fn len(&self) -> usize {
        self.steps.len() - 1
    }

    /// True when the origin was already a goal.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn steps(&self) -> &[Step<S, A>] {
        &self.steps
    }

    pub fn origin(&self) -> &S {
        &self.steps[0].state
    }

    pub fn destination(&self) -> &S {
        &self.steps[self.steps.len() - 1].state
    }

    /// Total cost of the path.
    pub fn cost(&self) -> usize {
        self.steps[self.steps.len() - 1].cost
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.steps.iter().map(|s| &s.state)
    }

    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.steps.iter().filter_map(|s| s.action.as_ref())
    }
}

impl<S, A> fmt::Display for Path<S, A>
where
    S: fmt::Display,
    A: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for step in &self.steps {
            match &step.action {
                Some(action) => writeln!(f, "{}  {}", step.state, action)?,
                None => writeln!(f, "{}  initial state", step.state)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example() -> Path<u32, &'static str> {
        Path::new(vec![
            Step::new(1, None, 0),
            Step::new(2, Some("double"), 1),
            Step::new(4, Some("double"), 2),
        ])
    }

    #[test]
    fn accessors() {
        let path = example();
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
        assert_eq!(*path.origin(), 1);
        assert_eq!(*path.destination(), 4);
        assert_eq!(path.cost(), 2);
        assert_eq!(path.actions().count(), 2);
    }

    #[test]
    fn zero_length() {
        let path: Path<u32, &str> = Path::new(vec![Step::new(9, None, 0)]);
        assert_eq!(path.len(), 0);
        assert!(path.is_empty());
        assert_eq!(path.origin(), path.destination());
    }

    #[test]
    fn display() {
        assert_eq!(
            example().to_string(),
            "1  initial state\n2  double\n4  double\n"
        );
    }
}
