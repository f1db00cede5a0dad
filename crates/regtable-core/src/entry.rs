//! Table entry decoding
//!
//! A register table is a flat array of 16-byte records. Every record holds
//! four little-endian words in a fixed order: address, value, delay and
//! attribute. Any bit pattern is a legal entry; decoding never fails.

use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::attribute::AttributeView;

/// Size of one table entry in bytes
pub const ENTRY_SIZE: usize = 16;

/// On-disk layout of a table entry
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub(crate) struct RawEntry {
    address: U32,
    value: U32,
    delay: U32,
    attribute: U32,
}

/// A decoded register table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableEntry {
    /// Register address to write or poll
    pub address: u32,
    /// Value to write, or value to wait for on a read
    pub value: u32,
    /// Busy-loop delay performed after the operation
    pub delay: u32,
    /// Packed operation attributes, see [`AttributeView`]
    pub attribute: u32,
}

impl TableEntry {
    /// The all-zero entry that ends a table
    pub const TERMINATOR: Self = Self::new(0, 0, 0, 0);

    /// Create an entry from its four fields
    pub const fn new(address: u32, value: u32, delay: u32, attribute: u32) -> Self {
        Self {
            address,
            value,
            delay,
            attribute,
        }
    }

    /// Decode an entry from exactly 16 bytes
    pub fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> Self {
        let raw: RawEntry = zerocopy::transmute!(*bytes);
        Self::from(raw)
    }

    /// Encode the entry back into its 16-byte form
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let raw = RawEntry::from(*self);
        zerocopy::transmute!(raw)
    }

    /// Check whether this is the all-zero terminator
    pub const fn is_terminator(&self) -> bool {
        self.address == 0 && self.value == 0 && self.delay == 0 && self.attribute == 0
    }

    /// Decompose the attribute word
    pub const fn attributes(&self) -> AttributeView {
        AttributeView::from_raw(self.attribute)
    }
}

impl From<RawEntry> for TableEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            address: raw.address.get(),
            value: raw.value.get(),
            delay: raw.delay.get(),
            attribute: raw.attribute.get(),
        }
    }
}

impl From<TableEntry> for RawEntry {
    fn from(entry: TableEntry) -> Self {
        Self {
            address: U32::new(entry.address),
            value: U32::new(entry.value),
            delay: U32::new(entry.delay),
            attribute: U32::new(entry.attribute),
        }
    }
}

impl From<&[u8; ENTRY_SIZE]> for TableEntry {
    fn from(bytes: &[u8; ENTRY_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}
