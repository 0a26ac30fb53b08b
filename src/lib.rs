//! # Replayable traces of tree algorithms
//!
//! This library records the step-by-step execution of binary-tree algorithms
//! as an ordered, immutable event stream that a visualizer can replay.
//!
//! ## Protocol
//!
//! 1. **Build**: decode a level-order array (`[-10,9,20,null,null,15,7]`) into
//!    a linked tree plus positioned render nodes
//! 2. **Emit**: while walking the tree, record steps with a variable snapshot,
//!    a full highlight snapshot and the call stack
//! 3. **Export**: freeze the log into a `Trace`, then serialize it to JSON or
//!    render it for the terminal
//!
//! ## Usage Example
//!
//! ```
//! use treetrace::{parse_level_order, AlgorithmRegistry, TraceConfig};
//!
//! let registry = AlgorithmRegistry::builtin();
//! let algorithm = registry.get("max-path-sum").unwrap();
//! let input = parse_level_order("[-10,9,20,null,null,15,7]");
//! let trace = algorithm.trace(&input, &TraceConfig::default()).unwrap();
//! assert_eq!(trace.answer, Some(42));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod tree;      // Level-order decoding and layout
pub mod trace;     // Step recorder, node states, replay
pub mod export;    // JSON and terminal output
pub mod algorithm; // Traced algorithms and registry

// Re-exports for convenience
pub use algorithm::{AlgorithmRegistry, TracedAlgorithm};
pub use export::{render_terminal, to_json, ExportError, RenderOptions};
pub use trace::{
    Action, Highlight, NodeState, NodeStates, Step, Trace, TraceError, Tracer, Value, Variables,
};
pub use tree::{build_tree, parse_level_order, BuiltTree, LayoutConfig, RenderNode, TreeNode};

/// Configuration parameters for a traced run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceConfig {
    /// Render node spacing
    pub layout: LayoutConfig,
}

impl TraceConfig {
    /// Set layout spacing
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}
