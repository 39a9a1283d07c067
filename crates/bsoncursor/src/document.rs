use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::{
    context::Context,
    error::{Error, ErrorKind},
    options::ReaderOptions,
    scanner::{self, MIN_DOCUMENT_LEN},
};

/// Owner of the raw bytes of one BSON document.
///
/// A `Document` is immutable once built. Every [`Context`] borrows it, so it
/// cannot be finalized while a cursor is still in use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    data: Vec<u8>,
    options: ReaderOptions,
}

impl Document {
    /// Takes ownership of the bytes of a document, with default options.
    ///
    /// No validation happens here; see [`Document::init`].
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_options(data, ReaderOptions::default())
    }

    /// Takes ownership of the bytes of a document.
    pub fn with_options(data: impl Into<Vec<u8>>, options: ReaderOptions) -> Self {
        Self {
            data: data.into(),
            options,
        }
    }

    /// The options shared by every cursor over this document.
    #[must_use]
    pub const fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Length of the buffer in bytes; zero once finalized.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is absent, either never supplied or finalized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw document bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Validates the document framing and returns a cursor over its
    /// top-level elements.
    ///
    /// The leading little-endian length must equal the buffer length and the
    /// final byte must be the `0x00` terminator.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidInput`] if the buffer is absent, too short to hold
    /// a length prefix, or longer than [`ReaderOptions::max_document_len`].
    /// [`ErrorKind::CorruptedDocument`] if the framing checks fail.
    pub fn init(&self) -> Result<Context<'_>, Error> {
        self.check_framing().map_err(|err| self.report(err))?;
        trace!(len = self.data.len(), "initialised document");
        Ok(Context::root(self))
    }

    fn check_framing(&self) -> Result<(), Error> {
        let len = self.data.len();
        let invalid = Error::new(ErrorKind::InvalidInput, 0);
        if len == 0 {
            return Err(invalid);
        }
        if self.options.max_document_len.is_some_and(|max| len > max) {
            return Err(invalid);
        }
        let declared = scanner::read_i32(&self.data, 0, len).map_err(|_| invalid)?;
        if usize::try_from(declared).ok() != Some(len) || len < MIN_DOCUMENT_LEN {
            return Err(Error::new(ErrorKind::CorruptedDocument, 0));
        }
        if self.data[len - 1] != 0 {
            return Err(Error::new(ErrorKind::CorruptedDocument, len - 1));
        }
        Ok(())
    }

    /// Releases the buffer. Finalizing twice is a no-op.
    pub fn finalize(&mut self) {
        if !self.data.is_empty() {
            trace!(len = self.data.len(), "finalized document");
        }
        self.data = Vec::new();
    }

    /// Logs corruption and, in test builds, optionally turns it into a panic.
    pub(crate) fn report(&self, err: Error) -> Error {
        if err.kind() == ErrorKind::CorruptedDocument {
            debug!(offset = err.offset(), "corrupted BSON document");
            #[cfg(any(test, feature = "fuzzing"))]
            if self.options.panic_on_error {
                panic!("{err}");
            }
        }
        err
    }
}

/// Releases the buffer of `document`.
///
/// # Errors
///
/// [`ErrorKind::DocumentNotFound`] if no document is given.
pub fn finalize(document: Option<&mut Document>) -> Result<(), Error> {
    let document = document.ok_or(Error::new(ErrorKind::DocumentNotFound, 0))?;
    document.finalize();
    Ok(())
}
