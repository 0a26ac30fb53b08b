//! Trace export
//!
//! Two outputs for a finished `Trace`:
//!   - canonical JSON document (the external contract)
//!   - terminal rendering (presentation only)

mod terminal;

pub use terminal::{render_terminal, write_terminal, ActionClass, RenderOptions};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::trace::{Trace, Value};

/// Errors raised while encoding, decoding or writing a trace
#[derive(Debug, Error)]
pub enum ExportError {
    /// A float in the document is NaN or infinite
    #[error("unencodable value at {location}: {value}")]
    NonFinite {
        /// Where the value sits (`node n3 x`, `step 4 variable best`)
        location: String,
        /// Offending value
        value: f64,
    },

    /// JSON encoding or decoding failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the document failed
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Rendered text is not valid UTF-8
    #[error("rendered output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Reject values JSON cannot carry faithfully
fn check_encodable(trace: &Trace) -> Result<(), ExportError> {
    for node in &trace.nodes {
        for (axis, value) in [("x", node.x), ("y", node.y)] {
            if !value.is_finite() {
                return Err(ExportError::NonFinite {
                    location: format!("node {} {}", node.id, axis),
                    value,
                });
            }
        }
    }
    for step in &trace.steps {
        for (name, value) in &step.variables {
            if let Value::Float(v) = value {
                if !v.is_finite() {
                    return Err(ExportError::NonFinite {
                        location: format!("step {} variable {}", step.id, name),
                        value: *v,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Pretty JSON document (two-space indent)
pub fn to_json(trace: &Trace) -> Result<String, ExportError> {
    check_encodable(trace)?;
    Ok(serde_json::to_string_pretty(trace)?)
}

/// Single-line JSON document
pub fn to_json_compact(trace: &Trace) -> Result<String, ExportError> {
    check_encodable(trace)?;
    Ok(serde_json::to_string(trace)?)
}

/// Read a trace document back
pub fn from_json(json: &str) -> Result<Trace, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// blake3 hex digest of the compact document
pub fn fingerprint(trace: &Trace) -> Result<String, ExportError> {
    let json = to_json_compact(trace)?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Write `json` to `path` through a sibling temp file
///
/// The document is either fully written or the target is left untouched.
pub fn write_document(json: &str, path: &Path) -> Result<(), ExportError> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, json).map_err(io_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    debug!(path = %path.display(), bytes = json.len(), "wrote trace document");
    Ok(())
}

/// Encode `trace` as pretty JSON and write it to `path`
pub fn write_json_file(trace: &Trace, path: &Path) -> Result<(), ExportError> {
    let json = to_json(trace)?;
    write_document(&json, path)
}
