#![no_main]

use libfuzzer_sys::fuzz_target;
use bertree::{CharSet, Node, OctetString, RestrictedString};

fuzz_target!(|data: &[u8]| {
    let node = match Node::decode(data) {
        Ok(node) => node,
        Err(_) => return,
    };
    let _ = OctetString::from_node(&node);
    for charset in [
        CharSet::Numeric, CharSet::Printable, CharSet::Ia5,
        CharSet::Visible, CharSet::General, CharSet::Utf8,
    ] {
        if let Ok(string) = RestrictedString::from_node(&node, charset) {
            if charset != CharSet::General {
                assert!(string.as_str().is_some());
            }
            assert!(string.as_slice().len() <= data.len());
        }
    }
});
