#![no_main]

use arbitrary::Arbitrary;
use bsoncursor::{Context, Document, ReaderOptions};
use libfuzzer_sys::fuzz_target;

/// One cursor operation, replayed against whatever scope is current.
#[derive(Debug, Arbitrary)]
enum Op {
    Fetch(Option<Name>),
    Open(Option<Name>),
    Close,
    Peek,
    Elements,
    Int32(Option<Name>),
    Int64(Option<Name>),
    Double(Option<Name>),
    DateTime(Option<Name>),
    Boolean(Option<Name>),
    String(Option<Name>),
    Binary(Option<Name>),
}

/// Names drawn from a small pool so lookups actually hit.
#[derive(Debug, Clone, Copy, Arbitrary)]
enum Name {
    Zero,
    One,
    Two,
    Type,
    Param,
}

impl Name {
    fn as_str(self) -> &'static str {
        match self {
            Name::Zero => "0",
            Name::One => "1",
            Name::Two => "2",
            Name::Type => "type",
            Name::Param => "param",
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    strict: bool,
    bytes: Vec<u8>,
    ops: Vec<Op>,
}

fn run(root: Context<'_>, ops: &[Op]) {
    let mut stack = vec![root];
    let mut buf = Vec::new();
    for op in ops {
        let Some(ctx) = stack.last_mut() else {
            return;
        };
        let before = *ctx;
        let name = |n: &Option<Name>| n.map(Name::as_str);
        let failed = match op {
            Op::Fetch(n) => ctx.fetch(name(n)).is_err(),
            Op::Open(n) => match ctx.open(name(n)) {
                Ok(child) => {
                    assert!(child.start() >= ctx.start());
                    assert!(child.start() + child.size() <= ctx.start() + ctx.size());
                    stack.push(child);
                    false
                }
                Err(_) => true,
            },
            Op::Close => {
                if stack.len() > 1 {
                    stack.pop();
                }
                false
            }
            Op::Peek => ctx.peek().is_err(),
            Op::Elements => {
                let _ = ctx.elements().take(64).count();
                false
            }
            Op::Int32(n) => ctx.extract_int32(name(n)).is_err(),
            Op::Int64(n) => ctx.extract_int64(name(n)).is_err(),
            Op::Double(n) => ctx.extract_double(name(n)).is_err(),
            Op::DateTime(n) => ctx.extract_datetime(name(n)).is_err(),
            Op::Boolean(n) => ctx.extract_boolean(name(n)).is_err(),
            Op::String(n) => ctx.extract_string_into(name(n), &mut buf).is_err(),
            Op::Binary(n) => ctx.extract_binary_into(name(n), &mut buf).is_err(),
        };
        // A failed operation never moves the cursor.
        if failed {
            if let Some(ctx) = stack.last() {
                assert_eq!(*ctx, before);
            }
        }
    }
}

fuzz_target!(|input: Input| {
    let options = ReaderOptions {
        strict: input.strict,
        max_document_len: Some(1 << 20),
        ..Default::default()
    };
    let mut document = Document::with_options(input.bytes, options);
    if let Ok(root) = document.init() {
        run(root, &input.ops);
    }
    document.finalize();
});
