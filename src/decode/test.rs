#![cfg(test)]

use crate::ident::{Class, Tag};
use crate::length::LengthForm;
use crate::mode::Mode;
use super::*;

/// Checks that the header of every node is the sum of its components.
fn check_spans(node: &Node) {
    node.walk(|_, node| {
        let eoc_len = node.eoc().map(|eoc| eoc.header().length()).unwrap_or(0);
        assert_eq!(
            node.header().length(),
            node.ident().header().length()
                + node.length().header().length()
                + node.content().header().length()
                + eoc_len
        );
        assert_eq!(node.ident().header().offset(), node.header().offset());
        assert_eq!(
            node.length().header().offset(), node.ident().header().end()
        );
        assert_eq!(
            node.content().header().offset(), node.length().header().end()
        );
        if let Some(len) = node.content_length() {
            assert_eq!(node.content().header().length(), len);
        }
    })
}

fn decode_err(data: &[u8]) -> DecodeError {
    Node::decode(data).unwrap_err()
}

#[test]
fn definite_sequence() {
    let data = b"\x30\x06\x02\x01\x05\x04\x01\xAA";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    assert_eq!(node.header(), Header::new(0, 8));
    assert_eq!(node.tag(), Tag::SEQUENCE);
    assert!(node.is_constructed());
    assert_eq!(node.length_form(), LengthForm::Definite);
    assert!(node.eoc().is_none());
    assert!(node.primitive().is_none());

    let children = node.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].tag(), Tag::INTEGER);
    assert_eq!(children[0].header(), Header::new(2, 3));
    assert_eq!(children[0].primitive(), Some(b"\x05".as_ref()));
    assert_eq!(children[1].header(), Header::new(5, 3));
    assert_eq!(children[1].primitive(), Some(b"\xAA".as_ref()));
}

#[test]
fn indefinite_sequence() {
    let data = b"\x30\x80\x02\x01\x05\x00\x00";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    assert_eq!(node.header(), Header::new(0, 7));
    assert_eq!(node.length_form(), LengthForm::Indefinite);
    assert_eq!(node.content_length(), None);
    assert_eq!(node.content().header(), Header::new(2, 3));
    assert_eq!(node.eoc().unwrap().header(), Header::new(5, 2));
    assert_eq!(node.children().unwrap().len(), 1);
}

#[test]
fn nested_indefinite() {
    let data = b"\x24\x80\
                 \x24\x80\x04\x01\x01\x00\x00\
                 \x04\x01\x02\
                 \x00\x00\
                 \xFF";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    assert_eq!(node.header().length(), 14);
    let children = node.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].header(), Header::new(2, 7));
    assert_eq!(children[0].children().unwrap()[0].primitive(),
        Some(b"\x01".as_ref())
    );
    assert_eq!(children[1].primitive(), Some(b"\x02".as_ref()));
}

#[test]
fn indefinite_in_definite() {
    let data = b"\x30\x06\x30\x80\x05\x00\x00\x00\x05";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    assert_eq!(node.header().length(), 8);

    // The inner value needs its end-of-contents within the outer content.
    let data = b"\x30\x04\x30\x80\x05\x00\x00\x00";
    assert_eq!(decode_err(data).kind(), ErrorKind::MissingEoc);
}

#[test]
fn high_tag_number() {
    let data = b"\xDF\xA1\x61\x01\x07";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    assert_eq!(node.class(), Class::Private);
    assert_eq!(node.number(), 4321);
    assert!(!node.is_constructed());
    assert_eq!(node.ident().header(), Header::new(0, 3));
    assert_eq!(node.primitive(), Some(b"\x07".as_ref()));
}

#[test]
fn primitive_content_is_opaque() {
    let node = Node::decode(b"\x04\x04\x04\x01\x01\x00").unwrap();
    assert_eq!(node.primitive(), Some(b"\x04\x01\x01\x00".as_ref()));
}

#[test]
fn decode_at_offset() {
    let data = b"\x05\x00\x02\x01\x2A";
    let node = Node::decode_at(data, 2).unwrap();
    assert_eq!(node.header(), Header::new(2, 3));
    assert_eq!(node.content().header().offset(), 4);
    assert_eq!(
        Node::decode_at(data, 5).unwrap_err().kind(), ErrorKind::Truncated
    );
    assert_eq!(
        Node::decode_at(data, 17).unwrap_err().kind(), ErrorKind::Truncated
    );
}

#[test]
fn structural_errors() {
    // Primitive with indefinite length.
    let err = decode_err(b"\x04\x80\x01\x00\x00");
    assert_eq!(err.kind(), ErrorKind::LengthMalformed);
    assert_eq!(err.pos(), Pos::from(0));
    // Regardless of tag.
    let idents: [&[u8]; 8] = [
        b"\x02", b"\x05", b"\x13", b"\x1F\x81\x00",
        b"\x41", b"\x80", b"\xC1", b"\x9F\xA1\x61",
    ];
    for ident in idents {
        let mut data = ident.to_vec();
        data.extend_from_slice(b"\x80\x01\x00\x00");
        let err = decode_err(&data);
        assert_eq!(err.kind(), ErrorKind::LengthMalformed);
        assert_eq!(err.pos(), Pos::from(0));
    }

    // Reserved length octet.
    assert_eq!(decode_err(b"\x04\xFF\x00").kind(), ErrorKind::LengthMalformed);

    // Missing end-of-contents.
    assert_eq!(decode_err(b"\x30\x80\x02\x01\x05").kind(),
        ErrorKind::MissingEoc
    );
    assert_eq!(decode_err(b"\x30\x80\x02\x01\x05\x00").kind(),
        ErrorKind::MissingEoc
    );
    assert_eq!(decode_err(b"\x30\x80").kind(), ErrorKind::MissingEoc);

    // Nested value longer than its parent.
    let err = decode_err(b"\x30\x03\x02\x02\x05\x06");
    assert_eq!(err.kind(), ErrorKind::LengthMalformed);
    assert_eq!(err.message(), "constructed content length mismatch");

    // Truncated content.
    assert_eq!(decode_err(b"\x30\x05\x02\x01\x05").kind(),
        ErrorKind::Truncated
    );
    assert_eq!(decode_err(b"\x04\x03\x01").kind(), ErrorKind::Truncated);
    assert_eq!(decode_err(b"").kind(), ErrorKind::Truncated);
    assert_eq!(decode_err(b"\x04").kind(), ErrorKind::Truncated);

    // Malformed tags.
    assert_eq!(decode_err(b"\x1F\x80\x01\x00").kind(),
        ErrorKind::TagMalformed
    );
    assert_eq!(decode_err(b"\x1F\x81").kind(), ErrorKind::TagMalformed);
}

#[test]
fn misplaced_end_of_contents() {
    let err = decode_err(b"\x00\x00");
    assert_eq!(err.kind(), ErrorKind::UnexpectedEoc);
    let err = decode_err(b"\x30\x02\x00\x00");
    assert_eq!(err.kind(), ErrorKind::UnexpectedEoc);
    assert_eq!(err.pos(), Pos::from(2));
}

#[test]
fn nesting_depth() {
    fn nested(depth: usize) -> Vec<u8> {
        let mut res = Vec::new();
        for _ in 0..depth {
            res.extend_from_slice(b"\x30\x80");
        }
        for _ in 0..depth {
            res.extend_from_slice(b"\x00\x00");
        }
        res
    }

    let data = nested(Decoder::DEFAULT_MAX_DEPTH);
    let node = Node::decode(&data).unwrap();
    let mut deepest = 0;
    node.walk(|depth, _| deepest = deepest.max(depth));
    assert_eq!(deepest, Decoder::DEFAULT_MAX_DEPTH - 1);

    let data = nested(Decoder::DEFAULT_MAX_DEPTH + 1);
    let err = decode_err(&data);
    assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    assert_eq!(err.pos(), Pos::from(2 * Decoder::DEFAULT_MAX_DEPTH));
    assert!(Decoder::new().max_depth(200).decode(&data, 0).is_ok());

    // Runs into the limit long before anything bad can happen.
    let data = nested(100_000);
    assert_eq!(decode_err(&data).kind(), ErrorKind::DepthExceeded);

    assert_eq!(
        Decoder::new().max_depth(0).decode(b"\x30\x00", 0)
            .unwrap_err().kind(),
        ErrorKind::DepthExceeded
    );
    assert!(Decoder::new().max_depth(0).decode(b"\x05\x00", 0).is_ok());
}

#[test]
fn der_mode() {
    let der = Decoder::new().mode(Mode::Der);
    assert_eq!(der.decode_mode(), Mode::Der);
    assert!(der.decode(b"\x30\x03\x02\x01\x05", 0).is_ok());
    assert_eq!(
        der.decode(b"\x30\x80\x02\x01\x05\x00\x00", 0).unwrap_err().kind(),
        ErrorKind::LengthMalformed
    );
    assert_eq!(
        der.decode(b"\x04\x81\x01\x00", 0).unwrap_err().kind(),
        ErrorKind::LengthMalformed
    );
    assert!(Node::decode(b"\x04\x81\x01\x00").is_ok());
}

#[test]
fn consecutive_values() {
    let data = b"\x02\x01\x01\x05\x00\x30\x80\x00\x00";
    let nodes = Decoder::new().decode_all(data).unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].tag(), Tag::INTEGER);
    assert_eq!(nodes[1].tag(), Tag::NULL);
    assert_eq!(nodes[2].header(), Header::new(5, 4));

    let mut iter = Decoder::new().nodes(b"\x05\x00\x04\x05\x00");
    assert!(iter.next().unwrap().is_ok());
    assert_eq!(iter.offset(), 2);
    assert_eq!(iter.next().unwrap().unwrap_err().kind(), ErrorKind::Truncated);
    assert!(iter.next().is_none());

    assert!(Decoder::new().decode_all(b"").unwrap().is_empty());
}

#[test]
fn walk_order() {
    let data = b"\x30\x0A\x30\x03\x02\x01\x01\x04\x00\xA1\x01\x05";
    // The last nested value is cut short.
    assert!(Node::decode(data).is_err());

    let data = b"\x30\x0B\x30\x03\x02\x01\x01\x04\x00\xA1\x02\x05\x00";
    let node = Node::decode(data).unwrap();
    check_spans(&node);
    let mut seen = Vec::new();
    node.walk(|depth, node| seen.push((depth, node.tag())));
    assert_eq!(
        seen,
        [
            (0, Tag::SEQUENCE), (1, Tag::SEQUENCE), (2, Tag::INTEGER),
            (1, Tag::OCTET_STRING), (1, Tag::ctx(1)), (2, Tag::NULL),
        ]
    );
}

#[test]
fn display() {
    let data = b"\x30\x80\x02\x01\x05\xA0\x00\x04\x12\
                 \x00\x01\x02\x03\x04\x05\x06\x07\x08\x09\
                 \x0a\x0b\x0c\x0d\x0e\x0f\x10\x11\x00\x00";
    let node = Node::decode(data).unwrap();
    let mut lines = Vec::new();
    node.walk(|_, node| lines.push(node.to_string()));
    assert_eq!(
        lines,
        [
            "UNIVERSAL CONSTRUCTED SEQUENCE INDEFINITE",
            "UNIVERSAL PRIMITIVE INTEGER DEFINITE=1 05",
            "CONTEXT_SPECIFIC CONSTRUCTED [0] DEFINITE=0",
            "UNIVERSAL PRIMITIVE OCTET-STRING DEFINITE=18 \
             000102030405060708090a0b0c0d0e0f..",
        ]
    );
    assert_eq!(
        Node::decode(b"\x1F\x1F\x00").unwrap().to_string(),
        "UNIVERSAL PRIMITIVE 31 DEFINITE=0"
    );
}

#[test]
fn trace_events() {
    let data = b"\x30\x80\x02\x01\x05\x00\x00";
    let mut events = Vec::new();
    let node = Decoder::new().decode_traced(data, 0, &mut |event: Event| {
        events.push(match event {
            Event::Header { depth, ident, .. } => {
                format!("header {} {}", depth, ident.tag())
            }
            Event::EndOfContents { depth, eoc } => {
                format!("eoc {} {}", depth, eoc.header().offset())
            }
            Event::Complete { depth, header } => {
                format!("complete {} {}", depth, header.length())
            }
        })
    }).unwrap();
    assert_eq!(node.header().length(), 7);
    assert_eq!(
        events,
        [
            "header 0 SEQUENCE", "header 1 INTEGER", "complete 1 3",
            "eoc 0 5", "complete 0 7",
        ]
    );

    // The log sink accepts everything without a logger installed.
    assert!(Decoder::new().decode_traced(data, 0, &mut LogTrace).is_ok());
}
