//! Attribute word interpretation
//!
//! The attribute word packs a write operation in its low half and a read
//! operation in its high half:
//!
//! ```text
//!  31     27 26  24 23    19 18  16 15     11 10   8 7      3 2   0
//! +---------+------+--------+------+---------+------+--------+-----+
//! | rd start| rsvd | rd cnt | rd   | wr start| rsvd | wr cnt | wr  |
//! +---------+------+--------+------+---------+------+--------+-----+
//! ```
//!
//! Bit counts are stored minus one, so a count field of 0 selects one bit and
//! 31 selects all 32 bits.

use core::fmt;

const FLAG_MASK: u32 = 0x7;
const FIELD_MASK: u32 = 0x1F;
const RESERVED_MASK: u32 = 0x7;

const WRITE_FLAG_SHIFT: u32 = 0;
const WRITE_COUNT_SHIFT: u32 = 3;
const RESERVED_LOW_SHIFT: u32 = 8;
const WRITE_START_SHIFT: u32 = 11;
const READ_FLAG_SHIFT: u32 = 16;
const READ_COUNT_SHIFT: u32 = 19;
const RESERVED_HIGH_SHIFT: u32 = 24;
const READ_START_SHIFT: u32 = 27;

/// Largest allowed sum of bit count and start bit
pub const MAX_BIT_SPAN: u8 = 31;

/// Which of the two accepted "present" encodings a flag used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `0x4`, the value `init_registers()` tests for
    Canonical,
    /// `0x5`, emitted by the vendor spreadsheet macros; bit 2 is set so it
    /// behaves exactly like `0x4`
    Alias,
}

impl Encoding {
    /// Raw 3-bit value of this encoding
    pub const fn raw(self) -> u8 {
        match self {
            Self::Canonical => 0x4,
            Self::Alias => 0x5,
        }
    }
}

/// Interpretation of a 3-bit operation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpFlag {
    /// `0x0` - operation not requested
    Absent,
    /// `0x4` or `0x5` - operation requested
    Present(Encoding),
    /// `0x2` - selects the operation in "PM mode", which this decoder does
    /// not cover
    Reserved,
    /// Any other value
    Unrecognized(u8),
}

impl OpFlag {
    /// Interpret the low three bits of `bits`
    pub const fn from_bits(bits: u8) -> Self {
        match bits & FLAG_MASK as u8 {
            0x0 => Self::Absent,
            0x4 => Self::Present(Encoding::Canonical),
            0x5 => Self::Present(Encoding::Alias),
            0x2 => Self::Reserved,
            other => Self::Unrecognized(other),
        }
    }

    /// Raw 3-bit value, kept for display
    pub const fn raw(self) -> u8 {
        match self {
            Self::Absent => 0x0,
            Self::Present(encoding) => encoding.raw(),
            Self::Reserved => 0x2,
            Self::Unrecognized(bits) => bits,
        }
    }

    /// Check if the operation is requested
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Check if the operation is not requested
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Check if the flag is one of the values this decoder understands
    pub const fn is_recognized(self) -> bool {
        matches!(self, Self::Absent | Self::Present(_))
    }
}

impl fmt::Display for OpFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Present(encoding) => write!(f, "present (0x{:X})", encoding.raw()),
            Self::Reserved => write!(f, "PM mode (0x2)"),
            Self::Unrecognized(bits) => write!(f, "unrecognized (0x{:X})", bits),
        }
    }
}

/// Bit selection of a write or read operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitField {
    /// Number of bits minus one (0-31)
    pub count: u8,
    /// Shift applied to the value (0-31)
    pub start: u8,
}

impl BitField {
    /// Create a bit field from its raw subfields
    pub const fn new(count: u8, start: u8) -> Self {
        Self { count, start }
    }

    /// Number of bits selected
    pub const fn width(self) -> u8 {
        self.count.saturating_add(1)
    }

    /// Sum of count and start, must stay within [`MAX_BIT_SPAN`]
    pub const fn span(self) -> u8 {
        self.count.saturating_add(self.start)
    }

    /// Check if the selection runs past bit 31
    pub const fn overflows(self) -> bool {
        self.span() > MAX_BIT_SPAN
    }

    /// Check if both subfields are zero
    pub const fn is_zero(self) -> bool {
        self.count == 0 && self.start == 0
    }
}

/// Decomposed attribute word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeView {
    /// Bits [0:2]
    pub write_flag: OpFlag,
    /// Bits [3:7] (count) and [11:15] (start)
    pub write: BitField,
    /// Bits [8:10], must be zero
    pub reserved_low: u8,
    /// Bits [16:18]
    pub read_flag: OpFlag,
    /// Bits [19:23] (count) and [27:31] (start)
    pub read: BitField,
    /// Bits [24:26], must be zero
    pub reserved_high: u8,
}

impl AttributeView {
    /// Split an attribute word into its subfields
    pub const fn from_raw(attribute: u32) -> Self {
        Self {
            write_flag: OpFlag::from_bits(field(attribute, WRITE_FLAG_SHIFT, FLAG_MASK)),
            write: BitField::new(
                field(attribute, WRITE_COUNT_SHIFT, FIELD_MASK),
                field(attribute, WRITE_START_SHIFT, FIELD_MASK),
            ),
            reserved_low: field(attribute, RESERVED_LOW_SHIFT, RESERVED_MASK),
            read_flag: OpFlag::from_bits(field(attribute, READ_FLAG_SHIFT, FLAG_MASK)),
            read: BitField::new(
                field(attribute, READ_COUNT_SHIFT, FIELD_MASK),
                field(attribute, READ_START_SHIFT, FIELD_MASK),
            ),
            reserved_high: field(attribute, RESERVED_HIGH_SHIFT, RESERVED_MASK),
        }
    }

    /// Reassemble the attribute word
    pub const fn to_raw(&self) -> u32 {
        place(self.write_flag.raw(), WRITE_FLAG_SHIFT, FLAG_MASK)
            | place(self.write.count, WRITE_COUNT_SHIFT, FIELD_MASK)
            | place(self.reserved_low, RESERVED_LOW_SHIFT, RESERVED_MASK)
            | place(self.write.start, WRITE_START_SHIFT, FIELD_MASK)
            | place(self.read_flag.raw(), READ_FLAG_SHIFT, FLAG_MASK)
            | place(self.read.count, READ_COUNT_SHIFT, FIELD_MASK)
            | place(self.reserved_high, RESERVED_HIGH_SHIFT, RESERVED_MASK)
            | place(self.read.start, READ_START_SHIFT, FIELD_MASK)
    }

    /// Check if either reserved range holds a nonzero value
    pub const fn has_reserved_bits(&self) -> bool {
        self.reserved_low != 0 || self.reserved_high != 0
    }

    /// Check if both flags hold values this decoder understands
    pub const fn flags_recognized(&self) -> bool {
        self.write_flag.is_recognized() && self.read_flag.is_recognized()
    }
}

impl From<u32> for AttributeView {
    fn from(attribute: u32) -> Self {
        Self::from_raw(attribute)
    }
}

impl From<AttributeView> for u32 {
    fn from(view: AttributeView) -> Self {
        view.to_raw()
    }
}

const fn field(word: u32, shift: u32, mask: u32) -> u8 {
    ((word >> shift) & mask) as u8
}

const fn place(value: u8, shift: u32, mask: u32) -> u32 {
    (value as u32 & mask) << shift
}
