#![no_main]

use libfuzzer_sys::fuzz_target;
use bertree::{Integer, Node, Null, Oid, UtcTime};

fuzz_target!(|data: &[u8]| {
    let node = match Node::decode(data) {
        Ok(node) => node,
        Err(_) => return,
    };
    node.walk(|_, node| {
        if let Ok(int) = Integer::from_node(node) {
            let display = int.to_string();
            if let Some(value) = int.to_i128() {
                assert_eq!(display, value.to_string());
            }
        }
        if let Ok(oid) = Oid::from_node(node) {
            assert!(oid.arcs().len() >= 2);
            let _ = oid.to_string();
        }
        let _ = Null::from_node(node);
        if let Ok(time) = UtcTime::from_node(node) {
            assert_eq!(time.to_string().len(), 20);
        }
    });
});
