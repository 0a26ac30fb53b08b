//! Step records and their building blocks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Visual state of one node at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Not reached yet
    Unvisited,
    /// Spotlight for a single step
    Current,
    /// On the recursion stack (or waiting in the queue)
    InStack,
    /// Produced an aggregated result from its children
    Computed,
    /// No further work
    Done,
    /// Part of the reported answer
    PathNode,
}

impl NodeState {
    /// Terminal states admit no further transition within a run
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeState::Computed | NodeState::Done | NodeState::PathNode)
    }

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            NodeState::Unvisited => "unvisited",
            NodeState::Current => "current",
            NodeState::InStack => "instack",
            NodeState::Computed => "computed",
            NodeState::Done => "done",
            NodeState::PathNode => "pathnode",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node's visual state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Node being marked
    pub node_id: String,
    /// How it is marked
    pub state: NodeState,
}

impl Highlight {
    /// Create a highlight
    pub fn new(node_id: impl Into<String>, state: NodeState) -> Self {
        Self {
            node_id: node_id.into(),
            state,
        }
    }
}

/// Kind of recorded event
///
/// Open set: unknown kinds survive a round trip as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Initial state before any work
    Init,
    /// Entering a node
    Visit,
    /// Comparing values
    Compare,
    /// Changing the answer or pushing values into other nodes
    Update,
    /// Local computation without an answer change
    Compute,
    /// Leaving a node
    Return,
    /// Run finished
    Done,
    /// Any other algorithm-defined kind
    Other(String),
}

impl Action {
    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Action::Init => "init",
            Action::Visit => "visit",
            Action::Compare => "compare",
            Action::Update => "update",
            Action::Compute => "compute",
            Action::Return => "return",
            Action::Done => "done",
            Action::Other(name) => name,
        }
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        match name.as_str() {
            "init" => Action::Init,
            "visit" => Action::Visit,
            "compare" => Action::Compare,
            "update" => Action::Update,
            "compute" => Action::Compute,
            "return" => Action::Return,
            "done" => Action::Done,
            _ => Action::Other(name),
        }
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::from(name.to_string())
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer
    Int(i64),
    /// Floating point (must be finite to export)
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Free text (phase names etc.)
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

/// Counts and lengths; saturates at `i64::MAX`
impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Named variable snapshot (sorted by name)
pub type Variables = BTreeMap<String, Value>;

/// Build a `Variables` map from `name => value` pairs
#[macro_export]
macro_rules! vars {
    () => { $crate::trace::Variables::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::trace::Variables::new();
        $( map.insert(($name).to_string(), $crate::trace::Value::from($value)); )+
        map
    }};
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position in the log
    pub id: u64,
    /// Event kind
    pub action: Action,
    /// Node the event is about
    pub node_id: String,
    /// Variables at this instant
    pub variables: Variables,
    /// State of every node at this instant
    pub highlights: Vec<Highlight>,
    /// Human-readable explanation
    pub message: String,
    /// Call stack at this instant, outermost first
    pub call_stack: Vec<String>,
}

impl Step {
    /// State recorded for `node_id`, if present
    pub fn state_of(&self, node_id: &str) -> Option<NodeState> {
        self.highlights
            .iter()
            .find(|h| h.node_id == node_id)
            .map(|h| h.state)
    }

    /// Call-stack depth at this step
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }
}
