//! Maximum width of a binary tree, traced
//!
//! Level-order BFS carrying heap-style positions (left = 2i+1, right = 2i+2).
//! Positions are rebased to the first node of each level so they stay small.
//! Width of a level = last position - first position + 1.

use std::collections::VecDeque;

use crate::trace::{Action, NodeState, NodeStates, Trace, TraceError, Tracer, Value, Variables};
use crate::tree::{build_tree, TreeNode};
use crate::TraceConfig;

use super::TracedAlgorithm;

/// `max-width`
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxWidth;

impl TracedAlgorithm for MaxWidth {
    fn name(&self) -> &'static str {
        "max-width"
    }

    fn description(&self) -> &'static str {
        "Widest level counting gaps between the outermost nodes (level-order BFS)."
    }

    fn algorithm(&self) -> &'static str {
        "bfs-level"
    }

    fn trace(&self, input: &[Option<i64>], config: &TraceConfig) -> Result<Trace, TraceError> {
        let built = build_tree(input, &config.layout);
        let mut tracer = Tracer::begin(self.name(), self.algorithm());
        tracer.attach_tree(input, &built.nodes)?;

        let Some(root) = built.root.as_deref() else {
            return tracer.export(None);
        };

        let mut run = WidthRun {
            tracer,
            states: NodeStates::new(&built.nodes),
            scratch: Variables::new(),
            max_width: 0,
        };
        run.bfs(root)?;

        let width = run.max_width;
        run.tracer.export(Some(width))
    }
}

struct WidthRun {
    tracer: Tracer,
    states: NodeStates,
    scratch: Variables,
    max_width: i64,
}

impl WidthRun {
    fn bfs(&mut self, root: &TreeNode) -> Result<(), TraceError> {
        self.tracer.push_call("widthOfBinaryTree()");

        let mut queue: VecDeque<(&TreeNode, i64)> = VecDeque::from([(root, 0)]);
        self.states.mark(&root.id, NodeState::InStack)?;

        self.scratch.clear();
        self.scratch.insert("maxWidth".into(), Value::Int(self.max_width));
        self.scratch.insert("queue".into(), Value::from(queue.len()));
        self.tracer.emit(
            Action::Init,
            root.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            "Enqueue root at position 0",
        )?;

        let mut level = 0usize;
        while let Some(&(first, start)) = queue.front() {
            self.tracer.push_call(format!("level({})", level));

            let size = queue.len();
            let mut visited = Vec::with_capacity(size);
            let mut end = 0;

            for _ in 0..size {
                let Some((node, position)) = queue.pop_front() else {
                    break;
                };
                let index = position - start;
                end = index;
                let overflow = || TraceError::Overflow {
                    node: node.id.clone(),
                };

                self.scratch.clear();
                self.scratch.insert("level".into(), Value::from(level));
                self.scratch.insert("index".into(), Value::Int(index));
                self.scratch.insert("node".into(), Value::Int(node.val));
                self.scratch.insert("maxWidth".into(), Value::Int(self.max_width));
                self.tracer.emit(
                    Action::Visit,
                    node.id.as_str(),
                    &self.scratch,
                    self.states.spotlight(&node.id)?,
                    format!("Dequeue {} at position {}", node.val, index),
                )?;

                if let Some(left) = node.left.as_deref() {
                    self.states.mark(&left.id, NodeState::InStack)?;
                    let slot = index.checked_mul(2).and_then(|v| v.checked_add(1));
                    queue.push_back((left, slot.ok_or_else(overflow)?));
                }
                if let Some(right) = node.right.as_deref() {
                    self.states.mark(&right.id, NodeState::InStack)?;
                    let slot = index.checked_mul(2).and_then(|v| v.checked_add(2));
                    queue.push_back((right, slot.ok_or_else(overflow)?));
                }
                visited.push(node);
            }

            let last = visited.last().map_or(first, |n| *n);
            let width = end.checked_add(1).ok_or_else(|| TraceError::Overflow {
                node: last.id.clone(),
            })?;
            for node in &visited {
                let state = if node.id == first.id || node.id == last.id {
                    NodeState::PathNode
                } else {
                    NodeState::Done
                };
                self.states.mark(&node.id, state)?;
            }

            let improved = width > self.max_width;
            if improved {
                self.max_width = width;
            }

            self.scratch.clear();
            self.scratch.insert("level".into(), Value::from(level));
            self.scratch.insert("width".into(), Value::Int(width));
            self.scratch.insert("maxWidth".into(), Value::Int(self.max_width));
            let (action, message) = if improved {
                (
                    Action::Update,
                    format!("Level {} spans {} → new max width {}", level, width, width),
                )
            } else {
                (
                    Action::Compute,
                    format!(
                        "Level {} spans {} (max width stays {})",
                        level, width, self.max_width
                    ),
                )
            };
            self.tracer.emit(
                action,
                first.id.as_str(),
                &self.scratch,
                self.states.snapshot(),
                message,
            )?;

            self.tracer.pop_call()?;
            level += 1;
        }

        self.tracer.pop_call()?;
        Ok(())
    }
}
