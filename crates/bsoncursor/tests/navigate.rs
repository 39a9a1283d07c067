#![allow(missing_docs)]

mod common;

use bson::{doc, oid::ObjectId};
use bsoncursor::{Document, ElementType, ErrorKind, ReaderOptions};
use common::{encode, event};

#[test]
fn event_header_and_description() {
    let document = Document::new(encode(&event()));
    let mut ctx = document.init().unwrap();
    assert_eq!(ctx.extract_int32(Some("type")), Ok(1));
    assert_eq!(ctx.extract_int32(Some("source")), Ok(2));
    assert_eq!(ctx.extract_int32(Some("severity")), Ok(3));
    assert_eq!(ctx.extract_string(None).unwrap(), "disk almost full");
}

#[test]
fn walk_param_entries() {
    let document = Document::new(encode(&event()));
    let ctx = document.init().unwrap();
    let mut params = ctx.open(Some("param")).unwrap();

    let mut values = Vec::new();
    loop {
        let mut entry = params.open(None).unwrap();
        let num = entry.extract_int32(None).unwrap();
        let kind = entry.extract_int32(None).unwrap();
        if kind == 3 {
            let value = entry.extract_string(None).unwrap();
            values.push((num, value.to_str().unwrap().to_owned()));
        }
        if let Err(err) = params.fetch(None) {
            assert_eq!(err.kind(), ErrorKind::PositionOutOfRange);
            break;
        }
    }
    assert_eq!(values, [(1, "sda1".to_owned())]);
}

#[test]
fn skip_over_identifiers_and_nulls() {
    let id = ObjectId::from_bytes([1; 12]);
    let document = Document::new(encode(&doc! {
        "_id": id,
        "deleted": null,
        "ts": bson::Timestamp { time: 7, increment: 1 },
        "tags": ["a", "b"],
        "count": 12_i64,
    }));
    let mut ctx = document.init().unwrap();
    assert_eq!(ctx.peek().unwrap().kind(), ElementType::ObjectId);
    assert_eq!(ctx.extract_int64(Some("count")), Ok(12));
    assert!(ctx.is_exhausted());
}

#[test]
fn cursors_are_independent_copies() {
    let document = Document::new(encode(&event()));
    let root = document.init().unwrap();

    let mut a = root;
    let mut b = root;
    a.fetch(Some("severity")).unwrap();
    assert_eq!(b.extract_int32(None), Ok(1));
    assert_eq!(a.extract_int32(None), Ok(3));
    assert_eq!(root.position(), 4);
}

#[test]
fn elements_lists_the_top_level() {
    let document = Document::new(encode(&event()));
    let ctx = document.init().unwrap();
    let listing: Vec<(String, ElementType)> = ctx
        .elements()
        .map(|element| {
            let element = element.unwrap();
            (element.name().to_string(), element.kind())
        })
        .collect();
    assert_eq!(
        listing,
        [
            ("type".to_owned(), ElementType::Int32),
            ("source".to_owned(), ElementType::Int32),
            ("severity".to_owned(), ElementType::Int32),
            ("0".to_owned(), ElementType::String),
            ("param".to_owned(), ElementType::Array),
        ]
    );
}

#[test]
fn truncated_buffers_are_rejected() {
    let bytes = encode(&event());
    for cut in 0..bytes.len() {
        let err = Document::new(&bytes[..cut]).init().unwrap_err();
        let expected = if cut < 4 {
            ErrorKind::InvalidInput
        } else {
            ErrorKind::CorruptedDocument
        };
        assert_eq!(err.kind(), expected, "cut at {cut}");
    }
}

#[test]
fn oversized_documents_are_refused() {
    let bytes = encode(&event());
    let options = ReaderOptions {
        max_document_len: Some(bytes.len() - 1),
        ..Default::default()
    };
    let err = Document::with_options(bytes, options).init().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn finalized_document_cannot_be_read() {
    let mut document = Document::new(encode(&event()));
    {
        let mut ctx = document.init().unwrap();
        assert_eq!(ctx.extract_int32(Some("type")), Ok(1));
    }
    bsoncursor::finalize(Some(&mut document)).unwrap();
    assert_eq!(document.init().unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(
        bsoncursor::finalize(None).unwrap_err().kind(),
        ErrorKind::DocumentNotFound
    );
}
