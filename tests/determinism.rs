use std::collections::HashSet;

use treetrace::{parse_level_order, AlgorithmRegistry, TraceConfig};

#[test]
fn traces_are_deterministic() {
    let registry = AlgorithmRegistry::builtin();
    let input = parse_level_order("[5,4,8,11,null,13,4,7,2,null,null,null,1]");

    for name in registry.names() {
        let mut fingerprints = HashSet::new();
        for _ in 0..5 {
            let trace = registry
                .get(name)
                .expect("registered")
                .trace(&input, &TraceConfig::default())
                .expect("trace succeeds");
            fingerprints.insert(trace.fingerprint().expect("fingerprint succeeds"));
        }
        assert_eq!(fingerprints.len(), 1, "{} outputs diverged across runs", name);
    }
}

#[test]
fn fingerprint_survives_json_round_trip() {
    let trace = AlgorithmRegistry::builtin()
        .get("max-path-sum")
        .expect("registered")
        .trace(&parse_level_order("[-10,9,20,null,null,15,7]"), &TraceConfig::default())
        .expect("trace succeeds");
    let json = treetrace::to_json(&trace).expect("encodes");
    let back = treetrace::export::from_json(&json).expect("decodes");
    assert_eq!(back.fingerprint().unwrap(), trace.fingerprint().unwrap());
}
