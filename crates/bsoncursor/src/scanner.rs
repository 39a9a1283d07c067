//! Bounds-checked primitive reads over the raw document bytes.
//!
//! Every helper takes an explicit `bound` (exclusive) past which it must not
//! read. Callers pass the terminator offset of the scope they are working in,
//! so a read can never wander into a sibling or parent scope.

use bstr::ByteSlice;

use crate::error::{Error, ErrorKind};

/// Smallest well-formed document: a 4-byte length prefix and the terminator.
pub(crate) const MIN_DOCUMENT_LEN: usize = 5;

/// Returns the length of the NUL-terminated name following the tag byte at
/// `tag_offset`, excluding the terminator.
pub(crate) fn name_len(data: &[u8], tag_offset: usize, bound: usize) -> Result<usize, Error> {
    let corrupted = || Error::new(ErrorKind::CorruptedDocument, tag_offset);
    let window = data.get(tag_offset + 1..bound).ok_or_else(corrupted)?;
    window.find_byte(0).ok_or_else(corrupted)
}

pub(crate) fn read_array<const N: usize>(
    data: &[u8],
    offset: usize,
    bound: usize,
) -> Result<[u8; N], Error> {
    offset
        .checked_add(N)
        .filter(|&end| end <= bound)
        .and_then(|end| data.get(offset..end))
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or(Error::new(ErrorKind::CorruptedDocument, offset))
}

pub(crate) fn read_i32(data: &[u8], offset: usize, bound: usize) -> Result<i32, Error> {
    read_array(data, offset, bound).map(i32::from_le_bytes)
}

/// Reads a length prefix, rejecting negative values.
pub(crate) fn read_len(data: &[u8], offset: usize, bound: usize) -> Result<usize, Error> {
    let declared = read_i32(data, offset, bound)?;
    usize::try_from(declared).map_err(|_| Error::new(ErrorKind::CorruptedDocument, offset))
}
