//! End-to-end scenarios through the registry

#[path = "common/mod.rs"]
mod common;
use common::{run, try_run};
use test_case::test_case;
use treetrace::{Action, TraceError, Value};

#[test_case("max-path-sum", "[-10,9,20,null,null,15,7]", 5, Some(42) ; "max path sum classic")]
#[test_case("max-path-sum", "[1,2,3]", 3, Some(6) ; "max path sum full tree")]
#[test_case("children-sum", "[10,2,3]", 3, Some(20) ; "children sum push down")]
#[test_case("max-width", "[1,3,2,5,3,null,9]", 6, Some(4) ; "max width with gap")]
#[test_case("max-width", "[1,3,null,5,3]", 4, Some(2) ; "max width left heavy")]
fn answers(problem: &str, input: &str, nodes: usize, answer: Option<i64>) {
    let trace = run(problem, input);
    assert_eq!(trace.nodes.len(), nodes);
    assert_eq!(trace.answer, answer);
    trace.validate().expect("recorded trace is consistent");
}

#[test_case("max-path-sum" ; "max path sum")]
#[test_case("children-sum" ; "children sum")]
#[test_case("max-width" ; "max width")]
fn empty_input_exports_empty_trace(problem: &str) {
    let trace = run(problem, "[]");
    assert!(trace.nodes.is_empty());
    assert!(trace.steps.iter().all(|s| s.action == Action::Init));
    assert_eq!(trace.answer, None);
}

#[test_case("max-path-sum" ; "max path sum")]
#[test_case("children-sum" ; "children sum")]
#[test_case("max-width" ; "max width")]
fn garbage_root_is_empty_tree(problem: &str) {
    let trace = run(problem, "[oops,1,2]");
    assert!(trace.nodes.is_empty());
    assert_eq!(trace.tree_input, vec![None, Some(1), Some(2)]);
    assert_eq!(trace.answer, None);
}

#[test_case("children-sum", "[1,9223372036854775807,1]" ; "children sum compare")]
#[test_case("children-sum", "[9223372036854775807,1,1]" ; "children sum pull up")]
#[test_case("max-path-sum", "[9223372036854775807,1]" ; "max path sum fork")]
fn value_overflow_fails_the_run(problem: &str, input: &str) {
    let result = try_run(problem, input);
    assert!(
        matches!(result, Err(TraceError::Overflow { ref node }) if node == "n0"),
        "{:?}",
        result
    );
}

#[test]
fn max_width_of_deep_edge_chains() {
    let chains = |depth: usize| {
        let mut tokens = vec!["0", "1", "1"];
        for _ in 1..depth {
            tokens.extend(["1", "null", "null", "1"]);
        }
        format!("[{}]", tokens.join(","))
    };
    assert_eq!(run("max-width", &chains(20)).answer, Some(1 << 20));
    assert!(matches!(
        try_run("max-width", &chains(70)),
        Err(TraceError::Overflow { .. })
    ));
}

#[test]
fn children_sum_final_values() {
    let trace = run("children-sum", "[10,2,3]");
    let done = trace.steps.last().expect("has steps");
    assert_eq!(done.variables["n0"], Value::Int(20));
    assert_eq!(done.variables["n1"], Value::Int(10));
    assert_eq!(done.variables["n2"], Value::Int(10));
}

#[test]
fn return_depth_matches_visit_depth() {
    for problem in ["max-path-sum", "children-sum"] {
        let trace = run(problem, "[5,4,8,11,null,13,4,7,2,null,null,null,1]");
        for visit in trace.steps.iter().filter(|s| s.action == Action::Visit) {
            let ret = trace
                .steps
                .iter()
                .rev()
                .find(|s| s.action == Action::Return && s.node_id == visit.node_id)
                .expect("every visited node returns");
            assert_eq!(ret.depth(), visit.depth(), "{} {}", problem, visit.node_id);
            assert_eq!(ret.call_stack, visit.call_stack);
            assert!(ret.id > visit.id);

            // Whatever follows a return is never deeper than it.
            if let Some(after) = trace.step(ret.id + 1) {
                if after.action != Action::Done {
                    assert!(after.depth() <= ret.depth());
                }
            }
        }
    }
}
