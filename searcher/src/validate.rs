use crate::errors::{Result, SearchError};
use crate::path::Path;
use crate::traits::SearchProblem;

/// Replay a path against the problem.
///
/// Every action must be applicable in the state before it and produce
/// exactly the state recorded after it, and the last state must be a goal.
pub fn validate<P>(problem: &P, path: &Path<P::State, P::Action>) -> Result<()>
where
    P: SearchProblem,
{
    let mut current = path.origin().clone();
    for step in path.steps().iter().skip(1) {
        let action = step.action().ok_or_else(|| {
            SearchError::InvalidPath(format!("Step to {:?} has no action", step.state()))
        })?;

        let transition = problem
            .successors(&current)
            .into_iter()
            .find(|t| &t.action == action)
            .ok_or_else(|| {
                SearchError::InvalidPath(format!(
                    "Action {:?} is not applicable in state {:?}",
                    action, current
                ))
            })?;

        if &transition.state != step.state() {
            return Err(SearchError::InvalidPath(format!(
                "Action {:?} leads to {:?}, not {:?}",
                action,
                transition.state,
                step.state()
            )));
        }
        current = transition.state;
    }

    if !problem.is_goal(&current) {
        return Err(SearchError::InvalidPath(format!(
            "Path does not reach a goal, final state is: {:?}",
            current
        )));
    }

    Ok(())
}
