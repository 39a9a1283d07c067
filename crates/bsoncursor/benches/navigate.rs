//! Benchmark: cursor navigation over wide and deep documents
#![allow(missing_docs)]

use bson::{Bson, doc};
use bsoncursor::Document;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn encode(document: &bson::Document) -> Vec<u8> {
    let mut out = Vec::new();
    document.to_writer(&mut out).unwrap();
    out
}

/// A flat document of `fields` int32 fields named `f0`, `f1`, ...
fn wide(fields: usize) -> Vec<u8> {
    let mut document = bson::Document::new();
    for i in 0..fields {
        document.insert(format!("f{i}"), Bson::Int32(i32::try_from(i).unwrap()));
    }
    encode(&document)
}

/// `depth` documents nested under the key `n`, with a leaf string at the
/// bottom.
fn deep(depth: usize) -> Vec<u8> {
    let mut document = doc! { "leaf": "bottom" };
    for _ in 0..depth {
        document = doc! { "pad": 0_i64, "n": document };
    }
    encode(&document)
}

fn bench_fetch_last(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch_last");
    for fields in [16, 256, 4096] {
        let document = Document::new(wide(fields));
        let name = format!("f{}", fields - 1);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &name, |b, name| {
            b.iter(|| {
                let mut ctx = document.init().unwrap();
                ctx.extract_int32(Some(black_box(name.as_str()))).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_elements(c: &mut Criterion) {
    let document = Document::new(wide(1024));
    c.bench_function("elements_1024", |b| {
        b.iter(|| document.init().unwrap().elements().filter(Result::is_ok).count());
    });
}

fn bench_open_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_deep");
    for depth in [4, 32, 128] {
        let document = Document::new(deep(depth));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut ctx = document.init().unwrap();
                for _ in 0..depth {
                    ctx = ctx.open(Some("n")).unwrap();
                }
                ctx.extract_string(None).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fetch_last, bench_elements, bench_open_deep);
criterion_main!(benches);
