//! Typed extraction at the cursor.
//!
//! Every extractor looks for the next element matching both the requested
//! type and, when given, the requested name. The element under the cursor is
//! tried first; after that the scan moves forward one sibling at a time, so a
//! field with the right name but the wrong type is stepped over rather than
//! misread. On success the cursor ends up just past the extracted element.

use alloc::vec::Vec;

use tracing::trace;

use crate::{
    context::{Context, Want},
    element::{Element, ElementType},
    error::{Error, ErrorKind},
    value::{Binary, BsonString, UtcDateTime},
};

impl<'doc> Context<'doc> {
    /// Extracts a 32-bit integer.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::BadContext`] if the cursor is invalid and
    /// [`ErrorKind::PositionOutOfRange`] if no matching field is in scope.
    pub fn extract_int32(&mut self, name: Option<&str>) -> Result<i32, Error> {
        self.extract(name, ElementType::Int32, |_, payload| {
            Ok(i32::from_le_bytes(fixed(payload)))
        })
    }

    /// Extracts a 64-bit integer.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`].
    pub fn extract_int64(&mut self, name: Option<&str>) -> Result<i64, Error> {
        self.extract(name, ElementType::Int64, |_, payload| {
            Ok(i64::from_le_bytes(fixed(payload)))
        })
    }

    /// Extracts a double.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`].
    pub fn extract_double(&mut self, name: Option<&str>) -> Result<f64, Error> {
        self.extract(name, ElementType::Double, |_, payload| {
            Ok(f64::from_le_bytes(fixed(payload)))
        })
    }

    /// Extracts a UTC datetime.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`].
    pub fn extract_datetime(&mut self, name: Option<&str>) -> Result<UtcDateTime, Error> {
        self.extract(name, ElementType::DateTime, |_, payload| {
            Ok(UtcDateTime::from_millis(i64::from_le_bytes(fixed(payload))))
        })
    }

    /// Extracts a boolean.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`]. With [`ReaderOptions::strict`], a byte
    /// other than `0x00` or `0x01` is [`ErrorKind::CorruptedDocument`].
    ///
    /// [`ReaderOptions::strict`]: crate::ReaderOptions::strict
    pub fn extract_boolean(&mut self, name: Option<&str>) -> Result<bool, Error> {
        let strict = self.document.options().strict;
        self.extract(name, ElementType::Boolean, |field, payload| match payload[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ if strict => Err(Error::new(ErrorKind::CorruptedDocument, field.payload_offset())),
            _ => Ok(true),
        })
    }

    /// Extracts a string, copying exactly the declared bytes.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`]. [`ErrorKind::OutOfMemory`] if the
    /// buffer cannot be allocated. With [`ReaderOptions::strict`], a string
    /// not ending in a NUL terminator is [`ErrorKind::CorruptedDocument`].
    ///
    /// [`ReaderOptions::strict`]: crate::ReaderOptions::strict
    pub fn extract_string(&mut self, name: Option<&str>) -> Result<BsonString, Error> {
        let mut bytes = Vec::new();
        self.extract_string_into(name, &mut bytes)?;
        Ok(BsonString::from_declared(bytes))
    }

    /// Like [`Context::extract_string`], but writes the declared bytes into
    /// `dst`, replacing its contents and reusing its allocation.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_string`].
    pub fn extract_string_into(&mut self, name: Option<&str>, dst: &mut Vec<u8>) -> Result<(), Error> {
        let strict = self.document.options().strict;
        self.extract(name, ElementType::String, |field, payload| {
            let content = &payload[4..];
            if strict && content.last() != Some(&0) {
                return Err(Error::new(ErrorKind::CorruptedDocument, field.payload_offset()));
            }
            copy_into(dst, content, field.payload_offset())
        })
    }

    /// Extracts a binary value, copying exactly the declared bytes.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_int32`]. [`ErrorKind::OutOfMemory`] if the
    /// buffer cannot be allocated.
    pub fn extract_binary(&mut self, name: Option<&str>) -> Result<Binary, Error> {
        let mut bytes = Vec::new();
        let subtype = self.extract_binary_into(name, &mut bytes)?;
        Ok(Binary { subtype, bytes })
    }

    /// Like [`Context::extract_binary`], but writes the data into `dst` and
    /// returns the subtype byte.
    ///
    /// # Errors
    ///
    /// See [`Context::extract_binary`].
    pub fn extract_binary_into(&mut self, name: Option<&str>, dst: &mut Vec<u8>) -> Result<u8, Error> {
        self.extract(name, ElementType::Binary, |field, payload| {
            copy_into(dst, &payload[5..], field.payload_offset())?;
            Ok(payload[4])
        })
    }

    /// Locates the field, hands its payload bytes to `decode`, and advances
    /// the cursor past it once decoding succeeds.
    fn extract<T>(
        &mut self,
        name: Option<&str>,
        kind: ElementType,
        decode: impl FnOnce(&Element<'doc>, &'doc [u8]) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.validate()?;
        let document = self.document;
        let (field, value) = self
            .locate(name.map(str::as_bytes), Want::Kind(kind))
            .and_then(|field| {
                let payload = &document.as_bytes()[field.payload_offset()..field.end];
                decode(&field, payload).map(|value| (field, value))
            })
            .map_err(|err| document.report(err))?;
        trace!(?kind, from = self.position, to = field.end, "extracted element");
        self.position = field.end;
        Ok(value)
    }
}

/// Copies a fixed-width payload; the element table guarantees the width.
fn fixed<const N: usize>(payload: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&payload[..N]);
    out
}

fn copy_into(dst: &mut Vec<u8>, src: &[u8], offset: usize) -> Result<(), Error> {
    dst.clear();
    dst.try_reserve_exact(src.len())
        .map_err(|_| Error::new(ErrorKind::OutOfMemory, offset))?;
    dst.extend_from_slice(src);
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::copy_into;

    #[test]
    fn copy_into_replaces_contents() {
        let mut dst = Vec::from(*b"previous contents");
        copy_into(&mut dst, b"new", 0).unwrap();
        assert_eq!(dst, b"new");
    }
}
