//! Arena holding every node discovered during a search.
//!
//! Nodes refer to their parents by [NodeId], so the ancestry of a goal
//! stays valid for as long as the space itself is alive, long after the
//! frontier has been dropped.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::path::{Path, Step};

/// Index of a node inside a [SearchSpace].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Node is waiting in the frontier
    Open,
    /// Node has been expanded
    Closed,
}

/// A state along with the bookkeeping needed to reconstruct how it was
/// reached.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    state: S,
    parent: Option<NodeId>,
    action: Option<A>,
    cost: usize,
    status: NodeStatus,
}

impl<S, A> SearchNode<S, A> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The action which produced this node, `None` for the root.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Cumulative path cost from the root.
    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }
}

#[derive(Debug)]
pub struct SearchSpace<S, A> {
    nodes: Vec<SearchNode<S, A>>,
    registered: HashMap<S, NodeId>,
}

impl<S, A> SearchSpace<S, A>
where
    S: Debug + Clone + Eq + Hash,
    A: Debug + Clone,
{
    /// Create a space whose root is `initial`, already open.
    pub fn new(initial: S) -> Self {
        let mut space = Self {
            nodes: Vec::new(),
            registered: HashMap::new(),
        };
        space.push(initial, None, None, 0);
        space
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Find the node already registered for this state, if any.
    pub fn lookup(&self, state: &S) -> Option<NodeId> {
        self.registered.get(state).copied()
    }

    /// Register a new, open node.
    ///
    /// The state must not already be present in the space.
    pub fn insert(&mut self, state: S, parent: NodeId, action: A, cost: usize) -> NodeId {
        debug_assert!(
            !self.registered.contains_key(&state),
            "{:?} is already registered",
            state
        );
        self.push(state, Some(parent), Some(action), cost)
    }

    fn push(&mut self, state: S, parent: Option<NodeId>, action: Option<A>, cost: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.registered.insert(state.clone(), id);
        self.nodes.push(SearchNode {
            state,
            parent,
            action,
            cost,
            status: NodeStatus::Open,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    /// Mark a node as expanded.
    pub fn close(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        debug_assert_eq!(node.status, NodeStatus::Open, "Node must be open to close it");
        node.status = NodeStatus::Closed;
    }

    /// Record a cheaper way of reaching a node.
    ///
    /// Returns false, leaving the node untouched, unless `cost` is a strict
    /// improvement. An expanded node which is improved becomes open again
    /// and leaves the explored set.
    pub fn relax(&mut self, id: NodeId, parent: NodeId, action: A, cost: usize) -> bool {
        let node = &mut self.nodes[id.0];
        if cost >= node.cost {
            return false;
        }
        node.parent = Some(parent);
        node.action = Some(action);
        node.cost = cost;
        node.status = NodeStatus::Open;
        true
    }

    /// Number of distinct states discovered so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of states which have been expanded.
    pub fn explored(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_closed()).count()
    }

    /// Walk parent links from `goal` back to the root.
    pub fn extract_path(&self, goal: NodeId) -> Path<S, A> {
        let mut steps = Vec::new();
        let mut current = Some(goal);
        while let Some(id) = current {
            let node = self.node(id);
            steps.push(Step::new(node.state.clone(), node.action.clone(), node.cost));
            current = node.parent;
        }
        steps.reverse();
        Path::new(steps)
    }
}
