//! Name-keyed lookup of traced algorithms
//!
//! `builtin()` registers every algorithm shipped with the crate. Callers may
//! `register` their own; a later registration under the same name wins.

use std::collections::BTreeMap;
use std::fmt;

use super::{ChildrenSum, MaxPathSum, MaxWidth, TracedAlgorithm};

/// Metadata describing a registered algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Registry key, also the `problem` field of its traces
    pub name: String,

    /// Algorithm family (`dfs-postorder`, `bfs-level`, ...)
    pub algorithm: String,

    /// One-line summary for listings
    pub description: String,
}

/// Registry of traced algorithms keyed by name
#[derive(Default)]
pub struct AlgorithmRegistry {
    entries: BTreeMap<String, Box<dyn TracedAlgorithm>>,
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl AlgorithmRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in algorithm
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(MaxPathSum);
        registry.register(ChildrenSum);
        registry.register(MaxWidth);
        registry
    }

    /// Register an algorithm, replacing any previous one with the same name
    pub fn register<A: TracedAlgorithm>(&mut self, algorithm: A) {
        self.entries
            .insert(algorithm.name().to_string(), Box::new(algorithm));
    }

    /// Look up an algorithm by name
    pub fn get(&self, name: &str) -> Option<&dyn TracedAlgorithm> {
        self.entries.get(name).map(|entry| &**entry)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// List all registered algorithms
    pub fn list(&self) -> Vec<AlgorithmInfo> {
        self.entries
            .values()
            .map(|entry| AlgorithmInfo {
                name: entry.name().to_string(),
                algorithm: entry.algorithm().to_string(),
                description: entry.description().to_string(),
            })
            .collect()
    }
}
