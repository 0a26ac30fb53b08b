//! Step tracing
//!
//! Records the execution of a tree algorithm as an ordered, immutable event
//! log. Drivers talk to a `Tracer`; the finished `Trace` is plain data that can
//! be serialized, validated and replayed without the driver.

mod node_state;
mod replay;
mod step;
mod tracer;

pub use node_state::NodeStates;
pub use replay::Replay;
pub use step::{Action, Highlight, NodeState, Step, Value, Variables};
pub use tracer::Tracer;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::ExportError;
use crate::tree::RenderNode;

/// Errors raised while recording or validating a trace
#[derive(Debug, Error)]
pub enum TraceError {
    /// `emit` was called before `attach_tree`
    #[error("tree must be attached before emitting steps")]
    TreeNotAttached,

    /// `attach_tree` was called a second time
    #[error("tree already attached to this run")]
    TreeAlreadyAttached,

    /// `pop_call` on an empty call stack
    #[error("pop_call with an empty call stack")]
    CallStackUnderflow,

    /// Export with frames still on the call stack
    #[error("unbalanced call stack at export: {pushes} pushes, {pops} pops")]
    UnbalancedCallStack {
        /// Frames pushed during the run
        pushes: usize,
        /// Frames popped during the run
        pops: usize,
    },

    /// Highlight snapshot does not cover every node exactly once
    #[error("step {step}: highlight snapshot covers {actual} entries, tree has {expected} nodes")]
    IncompleteHighlights {
        /// Step id
        step: u64,
        /// Nodes in the tree
        expected: usize,
        /// Entries supplied
        actual: usize,
    },

    /// Node id not present in the tree
    #[error("unknown node id {0}")]
    UnknownNode(String),

    /// Attempt to persist a one-step state
    #[error("state `current` of node {node} is transient and cannot be persisted")]
    TransientState {
        /// Node id
        node: String,
    },

    /// Transition out of a terminal state
    #[error("node {node}: illegal transition {from} -> {to}")]
    IllegalTransition {
        /// Node id
        node: String,
        /// Persisted state
        from: NodeState,
        /// Requested state
        to: NodeState,
    },

    /// Arithmetic on node values or positions left the `i64` range
    #[error("arithmetic overflow at node {node}")]
    Overflow {
        /// Node whose computation overflowed
        node: String,
    },

    /// Step ids are not exactly 1..N
    #[error("step at position {position} has id {id}")]
    StepOutOfOrder {
        /// 1-based position in the log
        position: usize,
        /// Id found there
        id: u64,
    },

    /// Render node references a missing child
    #[error("node {node} references missing child {child}")]
    DanglingChild {
        /// Parent id
        node: String,
        /// Missing child id
        child: String,
    },
}

/// Finished, immutable record of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    /// Problem name
    pub problem: String,
    /// Algorithm name
    pub algorithm: String,
    /// Original level-order input
    pub tree_input: Vec<Option<i64>>,
    /// Render nodes
    pub nodes: Vec<RenderNode>,
    /// Steps in emission order
    pub steps: Vec<Step>,
    /// Final answer
    pub answer: Option<i64>,
}

impl Trace {
    /// Cursor over the steps
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(self)
    }

    /// Step by id
    pub fn step(&self, id: u64) -> Option<&Step> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.steps.get(index)
    }

    /// Content digest of the compact JSON form
    pub fn fingerprint(&self) -> Result<String, ExportError> {
        crate::export::fingerprint(self)
    }

    /// Re-check the invariants a recorded trace carries
    ///
    /// Useful for documents read back from disk.
    pub fn validate(&self) -> Result<(), TraceError> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();

        for node in &self.nodes {
            if let Some(child) = node.child_ids().find(|c| !ids.contains(c)) {
                return Err(TraceError::DanglingChild {
                    node: node.id.clone(),
                    child: child.to_string(),
                });
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            let position = index + 1;
            if step.id != position as u64 {
                return Err(TraceError::StepOutOfOrder {
                    position,
                    id: step.id,
                });
            }

            let covered: HashSet<&str> =
                step.highlights.iter().map(|h| h.node_id.as_str()).collect();
            if step.highlights.len() != self.nodes.len() || covered != ids {
                return Err(TraceError::IncompleteHighlights {
                    step: step.id,
                    expected: self.nodes.len(),
                    actual: step.highlights.len(),
                });
            }
        }
        Ok(())
    }
}
