//! Scoped cursors and the forward scan that moves them.
//!
//! A [`Context`] addresses one (sub-)document of a [`Document`]: its element
//! sequence starts at `start`, the scope is `size` bytes long including the
//! 4-byte length prefix in front of `start` and the terminator at the end,
//! and `position` is the tag byte of the element under the cursor.
//!
//! ```text
//!   start - 4     start                               start + size - 5
//!   | len (4) |   | tag | name \0 | payload | ...     | 0x00 |
//! ```
//!
//! All traversal is linear and forward-only. A scan never looks at bytes
//! beyond the scope terminator, so it cannot leak into a sibling or parent
//! scope, and a failed scan never moves the cursor.

use core::ptr;

use tracing::trace;

use crate::{
    document::Document,
    element::{Element, ElementType, PayloadLen},
    error::{Error, ErrorKind},
    scanner::{self, MIN_DOCUMENT_LEN},
};

/// A cursor into one scope of a [`Document`].
///
/// Contexts are plain values: copying one copies the cursor, and a child
/// produced by [`Context::open`] is independent of its parent.
///
/// Two contexts are equal when they read the same `Document` (by address,
/// not by content) at the same scope and position.
#[derive(Debug, Clone, Copy)]
pub struct Context<'doc> {
    pub(crate) document: &'doc Document,
    pub(crate) start: usize,
    pub(crate) position: usize,
    pub(crate) size: usize,
}

impl PartialEq for Context<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.document, other.document)
            && self.start == other.start
            && self.position == other.position
            && self.size == other.size
    }
}

impl Eq for Context<'_> {}

/// Which element types a scan accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Want {
    Any,
    Kind(ElementType),
    Container,
}

impl Want {
    fn accepts(self, tag: u8) -> bool {
        match self {
            Want::Any => true,
            Want::Kind(kind) => kind.tag() == tag,
            Want::Container => ElementType::from_tag(tag).is_some_and(ElementType::is_container),
        }
    }
}

/// Tag byte and name of an element, read without touching its payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header<'doc> {
    tag: u8,
    name: &'doc [u8],
    offset: usize,
}

impl Header<'_> {
    fn matches(&self, name: Option<&[u8]>, want: Want) -> bool {
        name.is_none_or(|name| self.name == name) && want.accepts(self.tag)
    }
}

impl<'doc> Context<'doc> {
    pub(crate) fn root(document: &'doc Document) -> Self {
        Self {
            document,
            start: 4,
            position: 4,
            size: document.len(),
        }
    }

    /// The document this cursor reads from.
    #[must_use]
    pub const fn document(&self) -> &'doc Document {
        self.document
    }

    /// Offset of the first element of the scope.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Offset of the element under the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Length of the scoped document, including its length prefix and
    /// terminator.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the cursor has moved past the last element of its scope.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.end()
    }

    /// Offset of the scope terminator.
    pub(crate) fn end(&self) -> usize {
        (self.start + self.size).saturating_sub(MIN_DOCUMENT_LEN)
    }

    /// Checks that the cursor lies inside its document.
    ///
    /// Run at the top of every traversal and extraction.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::BadContext`] if the scope is not contained in the document
    /// or the cursor is outside the scope.
    pub fn validate(&self) -> Result<(), Error> {
        let len = self.document.len();
        if self.start < 4 || self.start > len || self.position > len {
            return Err(Error::new(ErrorKind::BadContext, self.position));
        }
        let scope_end = (self.start - 4).checked_add(self.size);
        if self.size < MIN_DOCUMENT_LEN || scope_end.is_none_or(|end| end > len) {
            return Err(Error::new(ErrorKind::BadContext, self.start));
        }
        if self.position < self.start || self.position > self.end() {
            return Err(Error::new(ErrorKind::BadContext, self.position));
        }
        Ok(())
    }

    /// Describes the element under the cursor without moving it.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::PositionOutOfRange`] once the scope is exhausted,
    /// [`ErrorKind::UnsupportedType`] for tags the cursor cannot step over,
    /// and [`ErrorKind::CorruptedDocument`] for malformed headers or an
    /// element running past the scope terminator.
    pub fn peek(&self) -> Result<Element<'doc>, Error> {
        self.validate()?;
        self.element_at(self.position)
            .map_err(|err| self.document.report(err))
    }

    /// Skips to the next sibling element named `name`, or, with `None`, skips
    /// exactly one element.
    ///
    /// The element under the cursor is never a candidate: a fetch always moves
    /// forward by at least one element.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::PositionOutOfRange`] if no such sibling exists before the
    /// end of the scope, and [`ErrorKind::CorruptedDocument`] if an element
    /// on the way runs past the scope terminator. The cursor is left where it
    /// was.
    pub fn fetch(&mut self, name: Option<&str>) -> Result<(), Error> {
        self.validate()?;
        let header = self
            .header_at(self.position)
            .and_then(|current| self.seek(current, name.map(str::as_bytes), Want::Any))
            .map_err(|err| self.document.report(err))?;
        trace!(from = self.position, to = header.offset, "fetched element");
        self.position = header.offset;
        Ok(())
    }

    /// Opens the embedded document or array under the cursor (`None`), or the
    /// next one named `name`, and returns a cursor over its elements.
    ///
    /// With a name, the element under the cursor is used when it is a
    /// document or array with that name. Otherwise the search continues
    /// forward, skipping elements that match by name but are not containers.
    /// Without a name, only the element under the cursor is considered.
    /// `self` is not moved.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::PositionOutOfRange`] if no matching container exists in
    /// scope. [`ErrorKind::UnsupportedType`] if `name` is `None` and the
    /// element under the cursor is not a document or array.
    /// [`ErrorKind::CorruptedDocument`] if the container's declared length
    /// runs past the enclosing scope or does not end in a terminator.
    pub fn open(&self, name: Option<&str>) -> Result<Context<'doc>, Error> {
        self.validate()?;
        self.open_scope(name.map(str::as_bytes))
            .map_err(|err| self.document.report(err))
    }

    fn open_scope(&self, name: Option<&[u8]>) -> Result<Context<'doc>, Error> {
        let field = match name {
            Some(_) => self.locate(name, Want::Container)?,
            None => {
                let current = self.element_at(self.position)?;
                if !current.kind().is_container() {
                    return Err(Error::new(
                        ErrorKind::UnsupportedType(current.kind().tag()),
                        current.offset(),
                    ));
                }
                current
            }
        };
        let payload = field.payload_offset();
        let declared = field.end - payload;
        if self.document.as_bytes()[field.end - 1] != 0 {
            return Err(Error::new(ErrorKind::CorruptedDocument, field.end - 1));
        }
        trace!(offset = field.offset, size = declared, "opened scope");
        Ok(Context {
            document: self.document,
            start: payload + 4,
            position: payload + 4,
            size: declared,
        })
    }

    /// Returns an iterator over the element under the cursor and every
    /// sibling after it.
    ///
    /// The iterator works on a copy; `self` is not moved.
    #[must_use]
    pub fn elements(&self) -> Elements<'doc> {
        Elements {
            cursor: *self,
            pending: None,
            finished: false,
        }
    }

    /// Finds the element to read: the one under the cursor if it matches,
    /// otherwise the next matching sibling.
    pub(crate) fn locate(&self, name: Option<&[u8]>, want: Want) -> Result<Element<'doc>, Error> {
        let current = self.header_at(self.position)?;
        let header = if current.matches(name, want) {
            current
        } else {
            self.seek(current, name, want)?
        };
        self.element_at(header.offset)
    }

    /// The fetch loop: steps from `from` over sibling elements until one
    /// matches both `name` (when given) and `want`.
    ///
    /// With no name and [`Want::Any`] this stops after exactly one element.
    fn seek(
        &self,
        from: Header<'doc>,
        name: Option<&[u8]>,
        want: Want,
    ) -> Result<Header<'doc>, Error> {
        let end = self.end();
        let mut current = from;
        loop {
            let next = self.span(current)?;
            if next > end {
                return Err(Error::new(ErrorKind::CorruptedDocument, payload_offset(current)));
            }
            if next == end {
                return Err(Error::new(ErrorKind::PositionOutOfRange, next));
            }
            let header = self.header_at(next)?;
            if header.matches(name, want) {
                return Ok(header);
            }
            current = header;
        }
    }

    fn header_at(&self, offset: usize) -> Result<Header<'doc>, Error> {
        let end = self.end();
        if offset >= end {
            return Err(Error::new(ErrorKind::PositionOutOfRange, offset));
        }
        let data = self.document.as_bytes();
        let name_len = scanner::name_len(data, offset, end)?;
        Ok(Header {
            tag: data[offset],
            name: &data[offset + 1..offset + 1 + name_len],
            offset,
        })
    }

    /// Offset just past the element whose header is `header`.
    fn span(&self, header: Header<'doc>) -> Result<usize, Error> {
        Ok(self.measure(header)?.1)
    }

    /// Measures the element at `offset`, which must end at or before the
    /// scope terminator.
    fn element_at(&self, offset: usize) -> Result<Element<'doc>, Error> {
        let header = self.header_at(offset)?;
        let (kind, end) = self.measure(header)?;
        let payload = payload_offset(header);
        if end > self.end() {
            return Err(Error::new(ErrorKind::CorruptedDocument, payload));
        }
        Ok(Element {
            kind,
            name: header.name,
            offset,
            payload,
            end,
        })
    }

    fn measure(&self, header: Header<'doc>) -> Result<(ElementType, usize), Error> {
        let kind = ElementType::from_tag(header.tag)
            .ok_or(Error::new(ErrorKind::UnsupportedType(header.tag), header.offset))?;
        let payload = payload_offset(header);
        let corrupted = || Error::new(ErrorKind::CorruptedDocument, payload);
        let len = match kind.payload_len() {
            PayloadLen::Fixed(len) => len,
            PayloadLen::Prefixed { header: prefix } => {
                let declared = scanner::read_len(self.document.as_bytes(), payload, self.end())?;
                if kind.is_container() && declared < MIN_DOCUMENT_LEN {
                    return Err(corrupted());
                }
                prefix.checked_add(declared).ok_or_else(corrupted)?
            }
        };
        let end = payload.checked_add(len).ok_or_else(corrupted)?;
        Ok((kind, end))
    }
}

const fn payload_offset(header: Header<'_>) -> usize {
    header.offset + 1 + header.name.len() + 1
}

/// Iterator over the remaining siblings of a [`Context`].
///
/// Yields the element under the cursor first. Stops after the last element
/// of the scope, or after the first error.
#[derive(Debug, Clone)]
pub struct Elements<'doc> {
    cursor: Context<'doc>,
    pending: Option<Error>,
    finished: bool,
}

impl<'doc> Iterator for Elements<'doc> {
    type Item = Result<Element<'doc>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            self.finished = true;
            return Some(Err(err));
        }
        if self.finished || self.cursor.is_exhausted() {
            return None;
        }
        let element = match self.cursor.peek() {
            Ok(element) => element,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        };
        match self.cursor.fetch(None) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::PositionOutOfRange => self.finished = true,
            Err(err) => self.pending = Some(err),
        }
        Some(Ok(element))
    }
}
