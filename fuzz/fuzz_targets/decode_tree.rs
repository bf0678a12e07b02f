#![no_main]

use libfuzzer_sys::fuzz_target;
use bertree::{Decoder, LengthForm, Mode};

fuzz_target!(|data: &[u8]| {
    for mode in [Mode::Ber, Mode::Der] {
        let decoder = Decoder::new().mode(mode).max_depth(32);
        let node = match decoder.decode(data, 0) {
            Ok(node) => node,
            Err(_) => continue,
        };
        assert!(node.header().length() <= data.len());

        // Every constructed node is exactly covered by its parts.
        node.walk(|_, node| {
            let mut len = node.ident().header().length()
                + node.length().header().length()
                + node.content().header().length();
            if let Some(eoc) = node.eoc() {
                len += eoc.header().length();
            }
            assert_eq!(len, node.header().length());
            assert_eq!(
                node.eoc().is_some(),
                node.length_form() == LengthForm::Indefinite
            );
            if let Some(children) = node.children() {
                let sum: usize = children.iter().map(|child| {
                    child.header().length()
                }).sum();
                assert_eq!(sum, node.content().header().length());
            }
            let _ = node.to_string();
        });

        if mode == Mode::Der {
            assert!(Decoder::new().decode(data, 0).is_ok());
        }
    }
});
