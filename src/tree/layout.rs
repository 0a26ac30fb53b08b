//! In-order layout
//!
//! x = in-order index × horizontal unit
//! y = depth × vertical spacing
//!
//! In-order numbering puts the whole left subtree left of its parent and keeps
//! siblings from sharing a column.

use super::{RenderNode, TreeNode};

/// Spacing parameters for render coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Distance between consecutive in-order columns
    pub horizontal_unit: f64,

    /// Distance between consecutive depths
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_unit: 100.0,
            vertical_spacing: 80.0,
        }
    }
}

impl LayoutConfig {
    /// Set horizontal unit
    pub fn with_horizontal_unit(mut self, unit: f64) -> Self {
        self.horizontal_unit = unit;
        self
    }

    /// Set vertical spacing
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }
}

/// Produce render nodes for `root` in in-order sequence
pub fn layout_tree(root: &TreeNode, config: &LayoutConfig) -> Vec<RenderNode> {
    let mut layout = InOrderLayout {
        config,
        column: 0,
        nodes: Vec::with_capacity(root.len()),
    };
    layout.place(root, 0);
    layout.nodes
}

struct InOrderLayout<'a> {
    config: &'a LayoutConfig,
    column: usize,
    nodes: Vec<RenderNode>,
}

impl InOrderLayout<'_> {
    fn place(&mut self, node: &TreeNode, depth: usize) {
        if let Some(left) = &node.left {
            self.place(left, depth + 1);
        }

        self.nodes.push(RenderNode {
            id: node.id.clone(),
            val: node.val,
            left_id: node.left.as_ref().map(|n| n.id.clone()),
            right_id: node.right.as_ref().map(|n| n.id.clone()),
            x: self.column as f64 * self.config.horizontal_unit,
            y: depth as f64 * self.config.vertical_spacing,
        });
        self.column += 1;

        if let Some(right) = &node.right {
            self.place(right, depth + 1);
        }
    }
}
