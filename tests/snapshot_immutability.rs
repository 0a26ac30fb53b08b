//! Recorded steps never change after `emit` returns

use treetrace::{
    build_tree, parse_level_order, vars, Action, LayoutConfig, NodeState, NodeStates, Tracer, Value,
};

#[test]
fn driver_side_mutation_does_not_leak_into_history() {
    let input = parse_level_order("[1,2,3]");
    let built = build_tree(&input, &LayoutConfig::default());
    let mut states = NodeStates::new(&built.nodes);
    let mut tracer = Tracer::begin("immutability", "manual");
    tracer.attach_tree(&input, &built.nodes).unwrap();

    let mut scratch = vars! { "counter" => 0i64 };
    tracer.push_call("walk(1)");
    for round in 1..=3i64 {
        scratch.insert("counter".into(), Value::Int(round));
        let highlights = states.spotlight("n0").unwrap();
        tracer.emit(Action::Visit, "n0", &scratch, highlights, "tick").unwrap();
        tracer.push_call(format!("walk({})", round + 1));
    }
    states.mark("n1", NodeState::Done).unwrap();
    scratch.clear();
    for _ in 0..4 {
        tracer.pop_call().unwrap();
    }

    let trace = tracer.export(None).unwrap();
    for (i, step) in trace.steps.iter().enumerate() {
        assert_eq!(step.variables["counter"], Value::Int(i as i64 + 1));
        assert_eq!(step.call_stack.len(), i + 1);
        assert_eq!(step.state_of("n1"), Some(NodeState::Unvisited));
        assert_eq!(step.state_of("n0"), Some(NodeState::Current));
    }
}
