//! Shared helpers for the integration tests

use std::fs;
use std::path::PathBuf;

use treetrace::{parse_level_order, AlgorithmRegistry, Trace, TraceConfig, TraceError};

/// Rewrites golden files instead of comparing against them when set
const REGENERATE: &str = "TREETRACE_BLESS";

/// Path of a golden file under `tests/golden/`
#[allow(dead_code)]
pub fn golden_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "golden", name]
        .iter()
        .collect()
}

/// Compare rendered output with its golden file, line endings ignored
#[allow(dead_code)]
pub fn check_golden(name: &str, actual: &str) {
    let path = golden_path(name);
    if std::env::var_os(REGENERATE).is_some() {
        let dir = path.parent().expect("golden files live in a directory");
        fs::create_dir_all(dir).expect("create golden directory");
        fs::write(&path, actual).expect("write golden file");
        return;
    }

    let expected = fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!("reading {}: {} ({}=1 writes it)", path.display(), err, REGENERATE)
    });
    assert_eq!(
        expected.lines().collect::<Vec<_>>(),
        actual.lines().collect::<Vec<_>>(),
        "{} is stale; rerun with {}=1 to rewrite it",
        path.display(),
        REGENERATE
    );
}

/// Run a built-in algorithm on text input with default configuration
#[allow(dead_code)]
pub fn try_run(problem: &str, input: &str) -> Result<Trace, TraceError> {
    let registry = AlgorithmRegistry::builtin();
    let algorithm = registry
        .get(problem)
        .unwrap_or_else(|| panic!("{} is not registered", problem));
    algorithm.trace(&parse_level_order(input), &TraceConfig::default())
}

/// `try_run` for inputs that must trace cleanly
#[allow(dead_code)]
pub fn run(problem: &str, input: &str) -> Trace {
    try_run(problem, input).unwrap_or_else(|err| panic!("{} on {}: {}", problem, input, err))
}
