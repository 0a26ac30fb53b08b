//! Children sum property, traced
//!
//! Rewrites values so every internal node equals the sum of its children,
//! only ever increasing values:
//!   push down: child sum < node → copy node value into the children
//!   recurse
//!   pull up:   node = sum of the children's final values

use crate::trace::{Action, NodeState, NodeStates, Trace, TraceError, Tracer, Value, Variables};
use crate::tree::{build_tree, BuiltTree, TreeNode};
use crate::TraceConfig;

use super::TracedAlgorithm;

/// `children-sum`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildrenSum;

impl TracedAlgorithm for ChildrenSum {
    fn name(&self) -> &'static str {
        "children-sum"
    }

    fn description(&self) -> &'static str {
        "Make every internal node equal the sum of its children (push down, pull up)."
    }

    fn algorithm(&self) -> &'static str {
        "push-down-pull-up"
    }

    fn trace(&self, input: &[Option<i64>], config: &TraceConfig) -> Result<Trace, TraceError> {
        let BuiltTree { root, nodes } = build_tree(input, &config.layout);
        let mut tracer = Tracer::begin(self.name(), self.algorithm());
        tracer.attach_tree(input, &nodes)?;

        let Some(mut root) = root else {
            return tracer.export(None);
        };

        let mut run = ChildrenSumRun {
            tracer,
            states: NodeStates::new(&nodes),
            scratch: Variables::new(),
        };

        run.scratch.insert("phase".into(), Value::from("start"));
        run.tracer.emit(
            Action::Init,
            root.id.as_str(),
            &run.scratch,
            run.states.snapshot(),
            "Tree loaded — will apply Children Sum Property",
        )?;

        run.modify(&mut root)?;
        run.finish(&root)?;

        let answer = root.val;
        run.tracer.export(Some(answer))
    }
}

fn checked_child_sum(node: &TreeNode) -> Result<i64, TraceError> {
    node.child_sum().ok_or_else(|| TraceError::Overflow {
        node: node.id.clone(),
    })
}

struct ChildrenSumRun {
    tracer: Tracer,
    states: NodeStates,
    scratch: Variables,
}

impl ChildrenSumRun {
    fn fill(&mut self, node: i64, child_sum: Option<i64>, phase: &str) {
        self.scratch.clear();
        self.scratch.insert("node".into(), Value::Int(node));
        if let Some(sum) = child_sum {
            self.scratch.insert("childSum".into(), Value::Int(sum));
        }
        self.scratch.insert("phase".into(), Value::from(phase));
    }

    fn modify(&mut self, node: &mut TreeNode) -> Result<(), TraceError> {
        self.tracer.push_call(format!("modify({})", node.val));

        self.fill(node.val, None, "compare");
        self.tracer.emit(
            Action::Visit,
            node.id.as_str(),
            &self.scratch,
            self.states.spotlight(&node.id)?,
            format!("Enter modify({})", node.val),
        )?;
        self.states.mark(&node.id, NodeState::InStack)?;

        if node.is_leaf() {
            self.states.mark(&node.id, NodeState::Done)?;
            self.fill(node.val, None, "leaf");
            self.tracer.emit(
                Action::Return,
                node.id.as_str(),
                &self.scratch,
                self.states.snapshot(),
                format!("Leaf node — value stays {}", node.val),
            )?;
            self.tracer.pop_call()?;
            return Ok(());
        }

        let child_sum = checked_child_sum(node)?;
        if child_sum >= node.val {
            let old = node.val;
            node.val = child_sum;
            self.fill(node.val, Some(child_sum), "compare");
            self.tracer.emit(
                Action::Compute,
                node.id.as_str(),
                &self.scratch,
                self.states.snapshot(),
                format!(
                    "childSum={} ≥ node={} → set node to {}",
                    child_sum, old, child_sum
                ),
            )?;
        } else {
            self.fill(node.val, Some(child_sum), "push-down");
            self.tracer.emit(
                Action::Update,
                node.id.as_str(),
                &self.scratch,
                self.states.snapshot(),
                format!(
                    "childSum={} < node={} → PUSH DOWN {} to children",
                    child_sum, node.val, node.val
                ),
            )?;
            let val = node.val;
            for child in [node.left.as_deref_mut(), node.right.as_deref_mut()]
                .into_iter()
                .flatten()
            {
                child.val = val;
            }
        }

        if let Some(left) = node.left.as_deref_mut() {
            self.modify(left)?;
        }
        if let Some(right) = node.right.as_deref_mut() {
            self.modify(right)?;
        }

        let old = node.val;
        node.val = checked_child_sum(node)?;
        self.states.mark(&node.id, NodeState::Computed)?;
        self.fill(node.val, None, "pull-up");
        self.tracer.emit(
            Action::Return,
            node.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            format!(
                "Pull up: {} → {} (sum of children's final values)",
                old, node.val
            ),
        )?;

        self.tracer.pop_call()?;
        Ok(())
    }

    /// Closing step listing every node's final value by id
    fn finish(&mut self, root: &TreeNode) -> Result<(), TraceError> {
        self.scratch.clear();
        let scratch = &mut self.scratch;
        root.for_each(&mut |n| {
            scratch.insert(n.id.clone(), Value::Int(n.val));
        });
        self.tracer.emit(
            Action::Done,
            root.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            format!("Children Sum Property holds — root = {}", root.val),
        )?;
        Ok(())
    }
}
