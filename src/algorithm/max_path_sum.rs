//! Binary tree maximum path sum, traced
//!
//! Post-order DFS. Each node has two values:
//!   forked  = left + node + right   (best path bending through the node)
//!   upward  = max(left, right) + node (best chain the parent may extend)
//! Negative child chains are clamped to 0. The running best lives in the
//! driver context, never in shared state.

use crate::trace::{Action, NodeState, NodeStates, Trace, TraceError, Tracer, Value, Variables};
use crate::tree::{build_tree, TreeNode};
use crate::TraceConfig;

use super::TracedAlgorithm;

/// `max-path-sum`
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPathSum;

impl TracedAlgorithm for MaxPathSum {
    fn name(&self) -> &'static str {
        "max-path-sum"
    }

    fn description(&self) -> &'static str {
        "Maximum sum over any node-to-node path (post-order DFS with a running best)."
    }

    fn algorithm(&self) -> &'static str {
        "dfs-postorder"
    }

    fn trace(&self, input: &[Option<i64>], config: &TraceConfig) -> Result<Trace, TraceError> {
        let built = build_tree(input, &config.layout);
        let mut tracer = Tracer::begin(self.name(), self.algorithm());
        tracer.attach_tree(input, &built.nodes)?;

        let Some(root) = built.root.as_deref() else {
            return tracer.export(None);
        };

        let mut run = PathSumRun {
            tracer,
            states: NodeStates::new(&built.nodes),
            scratch: Variables::new(),
            best: root.val,
        };
        run.init(root)?;
        run.dfs(root)?;

        let best = run.best;
        run.tracer.export(Some(best))
    }
}

struct PathSumRun {
    tracer: Tracer,
    states: NodeStates,
    scratch: Variables,
    best: i64,
}

impl PathSumRun {
    fn set(&mut self, name: &str, value: i64) {
        self.scratch.insert(name.to_string(), Value::Int(value));
    }

    fn init(&mut self, root: &TreeNode) -> Result<(), TraceError> {
        self.scratch.clear();
        self.set("globalMax", self.best);
        self.tracer.emit(
            Action::Init,
            root.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            format!("Initialize globalMax = {} (root value)", self.best),
        )?;
        Ok(())
    }

    fn dfs(&mut self, node: &TreeNode) -> Result<i64, TraceError> {
        self.tracer.push_call(format!("dfs({})", node.val));

        self.scratch.clear();
        self.set("globalMax", self.best);
        self.set("node", node.val);
        self.tracer.emit(
            Action::Visit,
            node.id.as_str(),
            &self.scratch,
            self.states.spotlight(&node.id)?,
            format!("Enter dfs({})", node.val),
        )?;
        self.states.mark(&node.id, NodeState::InStack)?;

        let left = match node.left.as_deref() {
            Some(child) => self.dfs(child)?.max(0),
            None => 0,
        };
        let right = match node.right.as_deref() {
            Some(child) => self.dfs(child)?.max(0),
            None => 0,
        };

        let overflow = || TraceError::Overflow {
            node: node.id.clone(),
        };
        let forked = left
            .checked_add(right)
            .and_then(|v| v.checked_add(node.val))
            .ok_or_else(overflow)?;
        let upward = left.max(right).checked_add(node.val).ok_or_else(overflow)?;

        let finished = if node.is_leaf() {
            NodeState::Done
        } else {
            NodeState::Computed
        };
        self.states.mark(&node.id, finished)?;

        let improved = forked > self.best;
        if improved {
            self.best = forked;
        }

        self.scratch.clear();
        self.set("globalMax", self.best);
        self.set("left", left);
        self.set("right", right);
        self.set("forked", forked);
        self.set("return", upward);
        let (action, message) = if improved {
            (
                Action::Update,
                format!(
                    "NEW GLOBAL MAX! forked = {} + {} + {} = {}",
                    left, right, node.val, forked
                ),
            )
        } else {
            (
                Action::Compute,
                format!(
                    "forked = {} + {} + {} = {} (no update, global={})",
                    left, right, node.val, forked, self.best
                ),
            )
        };
        self.tracer.emit(
            action,
            node.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            message,
        )?;

        self.scratch.clear();
        self.set("globalMax", self.best);
        self.set("return", upward);
        self.tracer.emit(
            Action::Return,
            node.id.as_str(),
            &self.scratch,
            self.states.snapshot(),
            format!("Return {} to parent (best single chain upward)", upward),
        )?;

        self.tracer.pop_call()?;
        Ok(upward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_level_order;

    fn run(text: &str) -> Trace {
        MaxPathSum
            .trace(&parse_level_order(text), &TraceConfig::default())
            .unwrap()
    }

    #[test]
    fn test_classic_example() {
        let trace = run("[-10,9,20,null,null,15,7]");
        assert_eq!(trace.nodes.len(), 5);
        assert_eq!(trace.answer, Some(42));
        assert_eq!(trace.problem, "max-path-sum");
        assert_eq!(trace.algorithm, "dfs-postorder");
    }

    #[test]
    fn test_all_negative_keeps_best_single_node() {
        assert_eq!(run("[-3]").answer, Some(-3));
        assert_eq!(run("[-2,-1]").answer, Some(-1));
    }

    #[test]
    fn test_update_steps_track_new_best() {
        let trace = run("[1,2,3]");
        assert_eq!(trace.answer, Some(6));
        let updates: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.action == Action::Update)
            .map(|s| s.variables["globalMax"].clone())
            .collect();
        assert_eq!(updates, vec![Value::Int(2), Value::Int(3), Value::Int(6)]);
    }

    #[test]
    fn test_step_shape_per_node() {
        // init + (visit, compute|update, return) per node
        let trace = run("[1,2,3]");
        assert_eq!(trace.steps.len(), 1 + 3 * 3);
        assert_eq!(trace.steps[0].action, Action::Init);
        assert_eq!(trace.steps.last().unwrap().action, Action::Return);
        assert!(trace.steps.last().unwrap().call_stack.len() == 1);
    }

    #[test]
    fn test_leaf_done_internal_computed() {
        let trace = run("[1,2,3]");
        let last = trace.steps.last().unwrap();
        assert_eq!(last.state_of("n0"), Some(NodeState::Computed));
        assert_eq!(last.state_of("n1"), Some(NodeState::Done));
        assert_eq!(last.state_of("n2"), Some(NodeState::Done));
    }

    #[test]
    fn test_path_overflow_is_an_error() {
        let input = parse_level_order("[9223372036854775807,1]");
        let result = MaxPathSum.trace(&input, &TraceConfig::default());
        assert!(matches!(result, Err(TraceError::Overflow { node }) if node == "n0"));
    }

    #[test]
    fn test_empty_input() {
        let trace = run("[]");
        assert!(trace.nodes.is_empty());
        assert!(trace.steps.is_empty());
        assert_eq!(trace.answer, None);
    }
}
