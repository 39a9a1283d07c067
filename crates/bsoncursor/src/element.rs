use bstr::BStr;

/// The type of a BSON element, identified by its tag byte.
///
/// Each variant knows how many payload bytes follow the element name, which
/// is all the cursor needs to step over it. Only a subset can be extracted;
/// the rest are recognised so that documents containing them can still be
/// traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    /// `0x01`, IEEE-754 binary64.
    Double,
    /// `0x02`, length-prefixed UTF-8 with a trailing NUL.
    String,
    /// `0x03`, embedded document.
    Document,
    /// `0x04`, embedded document keyed by decimal indices.
    Array,
    /// `0x05`, length-prefixed bytes with a subtype byte.
    Binary,
    /// `0x06`, deprecated.
    Undefined,
    /// `0x07`, 12-byte object id.
    ObjectId,
    /// `0x08`
    Boolean,
    /// `0x09`, milliseconds since the Unix epoch.
    DateTime,
    /// `0x0A`
    Null,
    /// `0x0D`
    JavaScriptCode,
    /// `0x0E`, deprecated.
    Symbol,
    /// `0x10`
    Int32,
    /// `0x11`, internal replication timestamp.
    Timestamp,
    /// `0x12`
    Int64,
    /// `0x13`
    Decimal128,
    /// `0x7F`
    MaxKey,
    /// `0xFF`
    MinKey,
}

/// How the payload length of an element is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadLen {
    /// Exactly this many bytes follow the name.
    Fixed(usize),
    /// A 4-byte little-endian length follows the name. The payload spans
    /// `header` bytes plus the declared length; embedded documents count
    /// their own prefix, so their header is zero.
    Prefixed { header: usize },
}

impl ElementType {
    /// Maps a tag byte to its type, or `None` if the cursor cannot step over
    /// elements carrying it.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x01 => Self::Double,
            0x02 => Self::String,
            0x03 => Self::Document,
            0x04 => Self::Array,
            0x05 => Self::Binary,
            0x06 => Self::Undefined,
            0x07 => Self::ObjectId,
            0x08 => Self::Boolean,
            0x09 => Self::DateTime,
            0x0A => Self::Null,
            0x0D => Self::JavaScriptCode,
            0x0E => Self::Symbol,
            0x10 => Self::Int32,
            0x11 => Self::Timestamp,
            0x12 => Self::Int64,
            0x13 => Self::Decimal128,
            0x7F => Self::MaxKey,
            0xFF => Self::MinKey,
            _ => return None,
        })
    }

    /// The tag byte written before the element name.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Double => 0x01,
            Self::String => 0x02,
            Self::Document => 0x03,
            Self::Array => 0x04,
            Self::Binary => 0x05,
            Self::Undefined => 0x06,
            Self::ObjectId => 0x07,
            Self::Boolean => 0x08,
            Self::DateTime => 0x09,
            Self::Null => 0x0A,
            Self::JavaScriptCode => 0x0D,
            Self::Symbol => 0x0E,
            Self::Int32 => 0x10,
            Self::Timestamp => 0x11,
            Self::Int64 => 0x12,
            Self::Decimal128 => 0x13,
            Self::MaxKey => 0x7F,
            Self::MinKey => 0xFF,
        }
    }

    /// Whether `open` can descend into elements of this type.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Document | Self::Array)
    }

    pub(crate) const fn payload_len(self) -> PayloadLen {
        match self {
            Self::Undefined | Self::Null | Self::MaxKey | Self::MinKey => PayloadLen::Fixed(0),
            Self::Boolean => PayloadLen::Fixed(1),
            Self::Int32 => PayloadLen::Fixed(4),
            Self::Double | Self::DateTime | Self::Int64 | Self::Timestamp => PayloadLen::Fixed(8),
            Self::ObjectId => PayloadLen::Fixed(12),
            Self::Decimal128 => PayloadLen::Fixed(16),
            Self::String | Self::JavaScriptCode | Self::Symbol => PayloadLen::Prefixed { header: 4 },
            Self::Binary => PayloadLen::Prefixed { header: 5 },
            Self::Document | Self::Array => PayloadLen::Prefixed { header: 0 },
        }
    }
}

/// A located element: its type, name and byte extent.
///
/// Borrowed from the document, so inspecting elements never copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'doc> {
    pub(crate) kind: ElementType,
    pub(crate) name: &'doc [u8],
    pub(crate) offset: usize,
    pub(crate) payload: usize,
    pub(crate) end: usize,
}

impl<'doc> Element<'doc> {
    /// The element's type.
    #[must_use]
    pub const fn kind(&self) -> ElementType {
        self.kind
    }

    /// The field name, without its NUL terminator.
    #[must_use]
    pub fn name(&self) -> &'doc BStr {
        BStr::new(self.name)
    }

    /// Absolute offset of the element's tag byte.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total encoded length: tag, name, terminator and payload.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.offset
    }

    /// Always `false`: an element spans at least its tag and name terminator.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub(crate) const fn payload_offset(&self) -> usize {
        self.payload
    }
}
