//! Traced algorithms and the registry that selects them by name.

mod api;
mod children_sum;
mod max_path_sum;
mod max_width;
mod registry;

pub use api::TracedAlgorithm;
pub use children_sum::ChildrenSum;
pub use max_path_sum::MaxPathSum;
pub use max_width::MaxWidth;
pub use registry::{AlgorithmInfo, AlgorithmRegistry};
