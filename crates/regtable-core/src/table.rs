//! Table window selection and entry iteration
//!
//! The table sits somewhere inside a bootloader image, usually right after
//! the 64-byte vector area. Callers name the window by offset and length;
//! [`TableReader`] checks it and walks it one entry at a time.

use zerocopy::FromBytes;

use crate::entry::{RawEntry, TableEntry, ENTRY_SIZE};
use crate::error::{Result, TableError};

/// A validated byte range holding whole table entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWindow {
    /// Start offset in the input
    pub offset: usize,
    /// Length in bytes, a non-zero multiple of [`ENTRY_SIZE`]
    pub len: usize,
}

impl TableWindow {
    /// Validate a window against an input of `input_len` bytes
    pub fn new(input_len: usize, offset: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(TableError::EmptyWindow);
        }
        if len % ENTRY_SIZE != 0 {
            return Err(TableError::unaligned(len));
        }
        match offset.checked_add(len) {
            Some(end) if end <= input_len => Ok(Self { offset, len }),
            _ => Err(TableError::OutOfBounds {
                offset,
                len,
                available: input_len,
            }),
        }
    }

    /// End offset (exclusive)
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Number of entries in the window
    pub const fn rows(&self) -> usize {
        self.len / ENTRY_SIZE
    }
}

/// Iterator over the entries of a table window
///
/// Yields `(byte_offset, entry)` pairs, where the offset is relative to the
/// start of the whole input.
#[derive(Debug, Clone)]
pub struct TableReader<'a> {
    window: TableWindow,
    records: &'a [RawEntry],
    next: usize,
}

impl<'a> TableReader<'a> {
    /// Read the whole input as a table
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::with_window(data, 0, data.len())
    }

    /// Read `len` bytes starting at `offset`
    pub fn with_window(data: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        let window = TableWindow::new(data.len(), offset, len)?;
        let bytes = &data[window.offset..window.end()];
        let records =
            <[RawEntry]>::ref_from_bytes(bytes).map_err(|_| TableError::unaligned(bytes.len()))?;

        log::debug!(
            "Table window 0x{:X}-0x{:X} ({} rows)",
            window.offset,
            window.end(),
            window.rows()
        );

        Ok(Self {
            window,
            records,
            next: 0,
        })
    }

    /// The window being read
    pub fn window(&self) -> TableWindow {
        self.window
    }
}

impl Iterator for TableReader<'_> {
    type Item = (usize, TableEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let raw = *self.records.get(self.next)?;
        let offset = self.window.offset + self.next * ENTRY_SIZE;
        self.next += 1;
        Some((offset, TableEntry::from(raw)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TableReader<'_> {}
