//! Tree node representations
//!
//! Two views of the same node:
//!   `TreeNode`   - owned, mutable, walked by algorithm drivers
//!   `RenderNode` - flat, positioned, frozen at build time for display

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary tree node walked by traced algorithms
///
/// Children are exclusively owned, so the structure is always a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Stable identifier derived from the input array position (`n{index}`)
    pub id: String,

    /// Node value (drivers may rewrite it in place)
    pub val: i64,

    /// Left subtree
    pub left: Option<Box<TreeNode>>,

    /// Right subtree
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Create a childless node
    pub fn new(id: impl Into<String>, val: i64) -> Self {
        Self {
            id: id.into(),
            val,
            left: None,
            right: None,
        }
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree
    pub fn len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.len()) + self.right.as_ref().map_or(0, |n| n.len())
    }

    /// A node always counts itself, so a subtree is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of levels in this subtree (a leaf has height 1)
    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }

    /// Sum of the direct children's values (absent children count as 0),
    /// `None` if it leaves the `i64` range
    pub fn child_sum(&self) -> Option<i64> {
        let left = self.left.as_ref().map_or(0, |n| n.val);
        let right = self.right.as_ref().map_or(0, |n| n.val);
        left.checked_add(right)
    }

    /// Visit every node in pre-order
    pub fn for_each<F: FnMut(&TreeNode)>(&self, f: &mut F) {
        f(self);
        if let Some(left) = &self.left {
            left.for_each(f);
        }
        if let Some(right) = &self.right {
            right.for_each(f);
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.val)
    }
}

/// Positioned projection of a `TreeNode` for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    /// Identifier shared with the `TreeNode`
    pub id: String,

    /// Value at capture time
    pub val: i64,

    /// Left child identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_id: Option<String>,

    /// Right child identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_id: Option<String>,

    /// Horizontal position
    pub x: f64,

    /// Vertical position
    pub y: f64,
}

impl RenderNode {
    /// Child identifiers that are present, left first
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.left_id
            .as_deref()
            .into_iter()
            .chain(self.right_id.as_deref())
    }
}
