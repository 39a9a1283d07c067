//! Prints the header of an event record and its parameters.
//!
//! ```text
//! cargo run --example event_dump -- path/to/event.bson
//! RUST_LOG=bsoncursor=trace cargo run --example event_dump
//! ```
//!
//! The event is the first embedded document of the file's root. It carries
//! `type`, `source` and `severity` integers, a description string and a
//! `param` array of `{num, type[, value]}` entries where type `3` marks a
//! string value.
#![allow(missing_docs)]

use std::{env, fs, process::ExitCode};

use bsoncursor::{Context, Document, Error, ErrorKind};
use tracing_subscriber::EnvFilter;

fn dump(root: Context<'_>) -> Result<(), Error> {
    let mut event = root.open(None)?;
    let kind = event.extract_int32(Some("type"))?;
    let source = event.extract_int32(Some("source"))?;
    let severity = event.extract_int32(Some("severity"))?;
    println!("type={kind} source={source} severity={severity}");

    let description = event.extract_string(None)?;
    println!("description: {}", description.as_bstr());

    let mut params = match event.open(Some("param")) {
        Ok(params) => params,
        Err(err) if err.kind() == ErrorKind::PositionOutOfRange => return Ok(()),
        Err(err) => return Err(err),
    };
    if params.is_exhausted() {
        return Ok(());
    }
    loop {
        let mut entry = params.open(None)?;
        let num = entry.extract_int32(None)?;
        let ty = entry.extract_int32(None)?;
        if ty == 3 {
            let value = entry.extract_string(None)?;
            println!("  param {num}: {}", value.as_bstr());
        } else {
            println!("  param {num}: <type {ty}>");
        }
        match params.fetch(None) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::PositionOutOfRange => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "event.bson".to_owned());
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut document = Document::new(bytes);
    let result = document.init().and_then(dump);
    document.finalize();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{path}: {err}");
            ExitCode::FAILURE
        }
    }
}
