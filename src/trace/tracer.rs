//! Sequential step recorder
//!
//! One `Tracer` per run, driven synchronously by one algorithm:
//!   begin → attach_tree → (push_call | emit | pop_call)* → export
//!
//! Everything handed to `emit` is copied at call time, so drivers can keep
//! reusing their scratch maps between steps.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{Action, Highlight, Step, Trace, TraceError, Variables};
use crate::tree::RenderNode;

/// Step recorder for a single run
#[derive(Debug)]
pub struct Tracer {
    problem: String,
    algorithm: String,
    tree_input: Vec<Option<i64>>,
    nodes: Vec<RenderNode>,
    node_ids: HashSet<String>,
    tree_attached: bool,
    steps: Vec<Step>,
    call_stack: Vec<String>,
    pushes: usize,
    pops: usize,
}

impl Tracer {
    /// Start a run with an empty log and call stack
    pub fn begin(problem: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            algorithm: algorithm.into(),
            tree_input: Vec::new(),
            nodes: Vec::new(),
            node_ids: HashSet::new(),
            tree_attached: false,
            steps: Vec::new(),
            call_stack: Vec::new(),
            pushes: 0,
            pops: 0,
        }
    }

    /// Store the builder output; once per run, before the first step
    pub fn attach_tree(
        &mut self,
        input: &[Option<i64>],
        nodes: &[RenderNode],
    ) -> Result<(), TraceError> {
        if self.tree_attached {
            return Err(TraceError::TreeAlreadyAttached);
        }
        self.tree_input = input.to_vec();
        self.nodes = nodes.to_vec();
        self.node_ids = nodes.iter().map(|n| n.id.clone()).collect();
        self.tree_attached = true;
        Ok(())
    }

    /// Enter a call frame
    pub fn push_call(&mut self, label: impl Into<String>) {
        self.call_stack.push(label.into());
        self.pushes += 1;
    }

    /// Leave the innermost call frame and return its label
    pub fn pop_call(&mut self) -> Result<String, TraceError> {
        let label = self.call_stack.pop().ok_or(TraceError::CallStackUnderflow)?;
        self.pops += 1;
        Ok(label)
    }

    /// Current call-stack depth
    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Number of recorded steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Render nodes attached to this run
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// Record one step and return its id
    ///
    /// `highlights` must cover every attached node exactly once.
    pub fn emit(
        &mut self,
        action: impl Into<Action>,
        node_id: impl Into<String>,
        variables: &Variables,
        highlights: Vec<Highlight>,
        message: impl Into<String>,
    ) -> Result<u64, TraceError> {
        if !self.tree_attached {
            return Err(TraceError::TreeNotAttached);
        }

        let id = self.steps.len() as u64 + 1;
        self.check_highlights(id, &highlights)?;

        let step = Step {
            id,
            action: action.into(),
            node_id: node_id.into(),
            variables: variables.clone(),
            highlights,
            message: message.into(),
            call_stack: self.call_stack.clone(),
        };
        trace!(
            step = id,
            action = %step.action,
            node = %step.node_id,
            depth = step.call_stack.len(),
            "emit"
        );
        self.steps.push(step);
        Ok(id)
    }

    fn check_highlights(&self, step: u64, highlights: &[Highlight]) -> Result<(), TraceError> {
        let mut seen = HashSet::with_capacity(highlights.len());
        let covers_every_node = highlights.len() == self.nodes.len()
            && highlights
                .iter()
                .all(|h| self.node_ids.contains(&h.node_id) && seen.insert(h.node_id.as_str()));

        if covers_every_node {
            Ok(())
        } else {
            Err(TraceError::IncompleteHighlights {
                step,
                expected: self.nodes.len(),
                actual: highlights.len(),
            })
        }
    }

    /// Finish the run and hand back the immutable trace
    pub fn export(self, answer: Option<i64>) -> Result<Trace, TraceError> {
        if !self.call_stack.is_empty() {
            return Err(TraceError::UnbalancedCallStack {
                pushes: self.pushes,
                pops: self.pops,
            });
        }

        debug!(
            problem = %self.problem,
            steps = self.steps.len(),
            nodes = self.nodes.len(),
            ?answer,
            "exported trace"
        );

        Ok(Trace {
            problem: self.problem,
            algorithm: self.algorithm,
            tree_input: self.tree_input,
            nodes: self.nodes,
            steps: self.steps,
            answer,
        })
    }
}
