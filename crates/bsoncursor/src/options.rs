/// Configuration options for reading a BSON document.
///
/// Options are attached to a [`Document`](crate::Document) and shared by
/// every [`Context`](crate::Context) derived from it.
///
/// # Examples
///
/// ```rust
/// use bsoncursor::{Document, ReaderOptions};
///
/// let bytes = vec![5, 0, 0, 0, 0];
/// let document = Document::with_options(
///     bytes,
///     ReaderOptions {
///         strict: true,
///         ..Default::default()
///     },
/// );
/// assert!(document.init().is_ok());
/// ```
///
/// # Default
///
/// Lenient decoding with no size limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Whether to reject payloads that a canonical encoder never produces.
    ///
    /// When `true`, a boolean byte other than `0x00`/`0x01` and a string whose
    /// declared bytes do not end in a NUL terminator are reported as
    /// [`ErrorKind::CorruptedDocument`](crate::ErrorKind::CorruptedDocument).
    /// When `false`, any non-zero boolean byte reads as `true` and strings are
    /// copied as declared.
    ///
    /// # Default
    ///
    /// `false`
    pub strict: bool,

    /// Upper bound on the document length accepted by `init`.
    ///
    /// Larger buffers are refused with
    /// [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) before any
    /// other check runs.
    ///
    /// # Default
    ///
    /// `None`
    pub max_document_len: Option<usize>,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(skip))]
    /// Panic on corruption errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::ReaderOptions;

    #[test]
    fn test_options_json_shape() {
        let options = ReaderOptions {
            strict: true,
            max_document_len: Some(1024),
            panic_on_error: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"strict":true,"max_document_len":1024}"#);

        let back: ReaderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back,
            ReaderOptions {
                panic_on_error: false,
                ..options
            }
        );
    }
}
