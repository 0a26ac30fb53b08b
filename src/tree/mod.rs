//! Tree builder
//!
//! Decodes a level-order array into:
//!   1. a linked, owned binary tree for algorithm drivers
//!   2. a flat list of positioned render nodes for the trace
//!
//! Identifiers come from the input array index (`n{index}`), so the same input
//! always produces the same ids.

mod encoding;
mod layout;
mod node;

pub use encoding::{format_level_order, parse_level_order, LevelOrder};
pub use layout::{layout_tree, LayoutConfig};
pub use node::{RenderNode, TreeNode};

use std::collections::VecDeque;
use tracing::debug;

/// Output of `build_tree`
#[derive(Debug, Clone, Default)]
pub struct BuiltTree {
    /// Root of the linked tree (`None` for empty or rootless input)
    pub root: Option<Box<TreeNode>>,

    /// Render nodes in in-order sequence
    pub nodes: Vec<RenderNode>,
}

impl BuiltTree {
    /// Whether the input produced no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// Identifier for the node at `index` of the input array
pub fn node_id(index: usize) -> String {
    format!("n{}", index)
}

/// Build a linked tree and its render nodes from level-order input
///
/// Each created node consumes the next two slots of the input (left, then
/// right) in breadth-first order. Running out of input is not an error.
pub fn build_tree(input: &[Option<i64>], config: &LayoutConfig) -> BuiltTree {
    let Some(Some(_)) = input.first() else {
        debug!(len = input.len(), "level-order input has no root");
        return BuiltTree::default();
    };

    // Resolve child slots by index first; boxes are assembled afterwards.
    let mut children: Vec<(Option<usize>, Option<usize>)> = vec![(None, None); input.len()];
    let mut queue = VecDeque::from([0usize]);
    let mut cursor = 1;

    while cursor < input.len() {
        let Some(parent) = queue.pop_front() else {
            break;
        };

        if input[cursor].is_some() {
            children[parent].0 = Some(cursor);
            queue.push_back(cursor);
        }
        cursor += 1;

        if cursor < input.len() {
            if input[cursor].is_some() {
                children[parent].1 = Some(cursor);
                queue.push_back(cursor);
            }
            cursor += 1;
        }
    }

    let root = assemble(0, input, &children);
    let nodes = layout_tree(&root, config);
    debug!(nodes = nodes.len(), height = root.height(), "built tree");

    BuiltTree {
        root: Some(root),
        nodes,
    }
}

fn assemble(
    index: usize,
    input: &[Option<i64>],
    children: &[(Option<usize>, Option<usize>)],
) -> Box<TreeNode> {
    let (left, right) = children[index];
    let mut node = TreeNode::new(node_id(index), input[index].unwrap_or_default());
    node.left = left.map(|i| assemble(i, input, children));
    node.right = right.map(|i| assemble(i, input, children));
    Box::new(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> BuiltTree {
        build_tree(&parse_level_order(text), &LayoutConfig::default())
    }

    #[test]
    fn test_ids_follow_array_positions() {
        let tree = build("[-10,9,20,null,null,15,7]");
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.id, "n0");
        assert_eq!(root.left.as_ref().unwrap().id, "n1");
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.id, "n2");
        assert_eq!(right.left.as_ref().unwrap().id, "n5");
        assert_eq!(right.right.as_ref().unwrap().id, "n6");
        assert_eq!(tree.nodes.len(), 5);
    }

    #[test]
    fn test_empty_and_rootless_input() {
        assert!(build("[]").is_empty());
        assert!(build("[null,1,2]").is_empty());
        assert!(build("[x]").nodes.is_empty());
    }

    #[test]
    fn test_exhausted_input_leaves_nodes_childless() {
        let tree = build("[1,2]");
        let root = tree.root.as_ref().unwrap();
        assert!(root.right.is_none());
        assert!(root.left.as_ref().unwrap().is_leaf());
    }

    #[test]
    fn test_render_children_exist() {
        let tree = build("[1,2,3,4,null,null,5,6]");
        for node in &tree.nodes {
            for child in node.child_ids() {
                assert!(tree.nodes.iter().any(|n| n.id == child), "dangling {}", child);
            }
        }
    }

    #[test]
    fn test_left_subtree_is_left_of_parent() {
        let tree = build("[1,2,3,4,5,6,7]");
        let x_of = |id: &str| tree.nodes.iter().find(|n| n.id == id).unwrap().x;
        assert!(x_of("n3") < x_of("n1"));
        assert!(x_of("n4") < x_of("n0"));
        assert!(x_of("n0") < x_of("n5"));
    }
}
