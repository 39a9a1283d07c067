//! A read-only cursor for navigating BSON documents without decoding them.
//!
//! A [`Document`] owns the raw bytes. [`Document::init`] checks the framing
//! and yields a root [`Context`], a cursor that can skip siblings
//! ([`Context::fetch`]), descend into embedded documents and arrays
//! ([`Context::open`]) and read typed values in place
//! ([`Context::extract_int32`] and friends). Every read is bounds-checked
//! against the scope the cursor lives in.
//!
//! ```rust
//! use bsoncursor::Document;
//!
//! // {"n": 7, "s": "hi"}
//! let bytes = [
//!     22, 0, 0, 0, //
//!     0x10, b'n', 0, 7, 0, 0, 0, //
//!     0x02, b's', 0, 3, 0, 0, 0, b'h', b'i', 0, //
//!     0,
//! ];
//! let document = Document::new(bytes);
//! let mut ctx = document.init()?;
//! assert_eq!(ctx.extract_string(Some("s"))?, "hi");
//! let mut ctx = document.init()?;
//! assert_eq!(ctx.extract_int32(Some("n"))?, 7);
//! # Ok::<(), bsoncursor::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod context;
mod document;
mod element;
mod error;
mod extract;
mod options;
mod scanner;
mod value;


pub use context::{Context, Elements};
pub use document::{Document, finalize};
pub use element::{Element, ElementType};
pub use error::{Error, ErrorKind};
pub use options::ReaderOptions;
pub use value::{Binary, BsonString, UtcDateTime};
