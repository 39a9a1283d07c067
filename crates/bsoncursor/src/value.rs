use alloc::vec::Vec;
use core::{fmt, str::Utf8Error};

use bstr::{BStr, ByteSlice};

/// A string payload copied out of a document.
///
/// Holds exactly the bytes declared by the length prefix, which for a
/// canonical encoder includes the trailing NUL.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BsonString {
    bytes: Vec<u8>,
}

impl BsonString {
    pub(crate) fn from_declared(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The declared bytes, terminator included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The string content with a single trailing NUL removed.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        let bytes = self.bytes.as_slice();
        let content = bytes.strip_suffix(b"\0").unwrap_or(bytes);
        content.as_bstr()
    }

    /// The string content as UTF-8.
    ///
    /// # Errors
    ///
    /// Fails if the content is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bstr())
    }

    /// Number of declared bytes, terminator included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the string and returns the declared bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for BsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for BsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl PartialEq<str> for BsonString {
    fn eq(&self, other: &str) -> bool {
        self.as_bstr() == other.as_bytes()
    }
}

impl PartialEq<&str> for BsonString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// A binary payload copied out of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// The subtype byte stored ahead of the data.
    pub subtype: u8,
    /// Exactly the declared number of bytes.
    pub bytes: Vec<u8>,
}

/// A UTC datetime in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcDateTime(i64);

impl UtcDateTime {
    /// Wraps a millisecond timestamp.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch; negative before 1970.
    #[must_use]
    pub const fn timestamp_millis(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::{BsonString, UtcDateTime};

    #[test]
    fn string_strips_one_terminator() {
        let s = BsonString::from_declared(b"boom\0".to_vec());
        assert_eq!(s.len(), 5);
        assert_eq!(s.as_bytes(), b"boom\0");
        assert_eq!(s.as_bstr(), "boom");
        assert_eq!(s.to_str(), Ok("boom"));
        assert_eq!(s, "boom");

        let s = BsonString::from_declared(b"a\0\0".to_vec());
        assert_eq!(s.as_bstr(), "a\0");
    }

    #[test]
    fn string_without_terminator_is_kept_whole() {
        let s = BsonString::from_declared(b"raw".to_vec());
        assert_eq!(s.as_bstr(), "raw");
        assert!(BsonString::from_declared(vec![]).is_empty());
    }

    #[test]
    fn invalid_utf8_is_reported_not_panicked() {
        let s = BsonString::from_declared(vec![0xff, 0xfe, 0]);
        assert!(s.to_str().is_err());
        assert_eq!(format!("{s}"), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn datetime_keeps_sign() {
        assert_eq!(UtcDateTime::from_millis(-1).timestamp_millis(), -1);
        assert!(UtcDateTime::from_millis(0) < UtcDateTime::from_millis(1));
    }
}
