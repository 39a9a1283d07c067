use thiserror::Error;

/// An error raised while navigating a BSON document.
///
/// `offset` is the absolute byte offset into the document at which the
/// problem was detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
}

impl Error {
    pub(crate) const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The category of the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the document where the failure was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Failure categories shared by every navigation entry point.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input was absent: an empty or finalized buffer, or one
    /// larger than the configured limit.
    #[error("invalid input")]
    InvalidInput,
    /// A length prefix or terminator disagrees with the bytes around it.
    #[error("corrupted document")]
    CorruptedDocument,
    /// No matching field exists before the end of the current scope.
    #[error("position out of range")]
    PositionOutOfRange,
    /// Growing the destination buffer of a string or binary value failed.
    #[error("out of memory")]
    OutOfMemory,
    /// The context's offsets do not lie inside its document.
    #[error("bad context")]
    BadContext,
    /// `finalize` was called without a document.
    #[error("document not found")]
    DocumentNotFound,
    /// The element carries a type tag the cursor cannot step over, or one
    /// that `open` cannot descend into.
    #[error("unsupported element type 0x{0:02X}")]
    UnsupportedType(u8),
}
