//! Per-node visual state shared by every driver
//!
//! unvisited → current (one step only) → instack → computed | done | pathnode
//!
//! `current` is never persisted: `spotlight` shows it for a single snapshot and
//! leaves the stored state alone.

use std::collections::HashMap;

use super::{Highlight, NodeState, TraceError};
use crate::tree::RenderNode;

/// Persisted node states in render order
#[derive(Debug, Clone)]
pub struct NodeStates {
    order: Vec<String>,
    states: HashMap<String, NodeState>,
}

impl NodeStates {
    /// Seed every node as `unvisited`
    pub fn new(nodes: &[RenderNode]) -> Self {
        let order: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
        let states = order
            .iter()
            .map(|id| (id.clone(), NodeState::Unvisited))
            .collect();
        Self { order, states }
    }

    /// Persisted state of `id`
    pub fn state(&self, id: &str) -> Option<NodeState> {
        self.states.get(id).copied()
    }

    /// Number of tracked nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no nodes are tracked
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Persist a transition for `id`
    pub fn mark(&mut self, id: &str, next: NodeState) -> Result<(), TraceError> {
        if next == NodeState::Current {
            return Err(TraceError::TransientState {
                node: id.to_string(),
            });
        }
        let state = self
            .states
            .get_mut(id)
            .ok_or_else(|| TraceError::UnknownNode(id.to_string()))?;

        if *state == next {
            return Ok(());
        }
        if state.is_terminal() {
            return Err(TraceError::IllegalTransition {
                node: id.to_string(),
                from: *state,
                to: next,
            });
        }
        *state = next;
        Ok(())
    }

    /// Full snapshot of persisted states
    pub fn snapshot(&self) -> Vec<Highlight> {
        self.order
            .iter()
            .map(|id| Highlight::new(id.clone(), self.states[id]))
            .collect()
    }

    /// Full snapshot with `id` shown as `current` for this step only
    pub fn spotlight(&self, id: &str) -> Result<Vec<Highlight>, TraceError> {
        if !self.states.contains_key(id) {
            return Err(TraceError::UnknownNode(id.to_string()));
        }
        Ok(self
            .order
            .iter()
            .map(|node| {
                let state = if node == id {
                    NodeState::Current
                } else {
                    self.states[node]
                };
                Highlight::new(node.clone(), state)
            })
            .collect())
    }
}
