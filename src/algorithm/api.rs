//! Interface between algorithm drivers and the registry

use crate::trace::{Trace, TraceError};
use crate::TraceConfig;

/// Trait implemented by traced tree algorithms
///
/// Implementations follow one protocol: build the tree, attach it to a
/// `Tracer`, emit steps while walking, export with the answer.
pub trait TracedAlgorithm: Send + Sync + 'static {
    /// Unique name used for selection (`max-path-sum`)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Algorithm family recorded in the trace (`dfs-postorder`)
    fn algorithm(&self) -> &'static str;

    /// Run on level-order input and return the finished trace
    fn trace(&self, input: &[Option<i64>], config: &TraceConfig) -> Result<Trace, TraceError>;
}
