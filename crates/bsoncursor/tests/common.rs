#![allow(missing_docs, dead_code)]

use bson::{Bson, doc};

/// Serializes `document` with the reference encoder.
pub fn encode(document: &bson::Document) -> Vec<u8> {
    let mut out = Vec::new();
    document.to_writer(&mut out).unwrap();
    out
}

/// An event record: three header fields, a description and a `param` array
/// of `{num, type[, value]}` entries.
pub fn event() -> bson::Document {
    doc! {
        "type": 1,
        "source": 2,
        "severity": 3,
        "0": "disk almost full",
        "param": [
            { "0": 0, "1": 1 },
            { "0": 1, "1": 3, "2": "sda1" },
            { "0": 2, "1": 2 },
        ],
    }
}

/// One value of every type the cursor can extract.
pub fn scalars() -> bson::Document {
    doc! {
        "double": 6.25,
        "string": "ünïcödé",
        "binary": Bson::Binary(bson::Binary {
            subtype: bson::spec::BinarySubtype::UserDefined(0x80),
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
        }),
        "boolean": true,
        "datetime": bson::DateTime::from_millis(1_700_000_000_123),
        "int32": -42_i32,
        "int64": 1_i64 << 40,
    }
}
