//! Entry classification and validity checks
//!
//! Classification decides what `init_registers()` would do with an entry.
//! Validity checks are independent predicates run in a fixed order; every
//! check that fires adds one [`Violation`] to the result. Neither step fails:
//! anomalies are findings, not errors.

use core::fmt;

use crate::attribute::{AttributeView, BitField, OpFlag};
use crate::entry::TableEntry;

/// What an entry makes the table walker do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// All-zero entry, the walk stops here
    Terminator,
    /// Read-modify-write of the selected bits
    Write(BitField),
    /// Poll until the selected bits equal the value field
    Read(BitField),
    /// No register access, only the delay loop
    DelayOnly,
    /// Neither operation nor delay; the entry does nothing useful
    Invalid,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminator => write!(f, "terminator"),
            Self::Write(bits) => write!(f, "write {} bit(s) at {}", bits.width(), bits.start),
            Self::Read(bits) => write!(f, "read {} bit(s) at {}", bits.width(), bits.start),
            Self::DelayOnly => write!(f, "delay only"),
            Self::Invalid => write!(f, "no operation"),
        }
    }
}

/// Reserved attribute bit range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    /// Bits [8:10]
    Low,
    /// Bits [24:26]
    High,
}

impl ReservedField {
    /// First and last bit of the range
    pub const fn bit_range(self) -> (u8, u8) {
        match self {
            Self::Low => (8, 10),
            Self::High => (24, 26),
        }
    }
}

impl fmt::Display for ReservedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = self.bit_range();
        write!(f, "[{}-{}]", first, last)
    }
}

/// A detected inconsistency in an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// Address is zero but the entry carries a payload
    NullAddress,
    /// Write and read flags are both set
    BothOperations,
    /// Write requested, read absent, yet read bit fields are nonzero
    RogueReadParameters,
    /// Read requested, write absent, yet write bit fields are nonzero
    RogueWriteParameters,
    /// A reserved bit range is nonzero
    ReservedBits(ReservedField),
    /// Write bit count plus start bit exceeds 31
    WriteRangeOverflow,
    /// Read bit count plus start bit exceeds 31
    ReadRangeOverflow,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullAddress => write!(f, "null address with non-zero payload"),
            Self::BothOperations => write!(f, "both write and read flags are set"),
            Self::RogueReadParameters => write!(f, "read parameters without read flag"),
            Self::RogueWriteParameters => write!(f, "write parameters without write flag"),
            Self::ReservedBits(field) => write!(f, "non-zero reserved attribute bits {}", field),
            Self::WriteRangeOverflow => write!(f, "write bit count plus start bit exceeds 31"),
            Self::ReadRangeOverflow => write!(f, "read bit count plus start bit exceeds 31"),
        }
    }
}

/// A named validity predicate
#[derive(Clone, Copy)]
pub struct Check {
    /// Short identifier of the check
    pub name: &'static str,
    /// Returns the violation when the entry fails the check
    pub run: fn(&TableEntry, &AttributeView) -> Option<Violation>,
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// All validity checks, in reporting order
pub const CHECKS: [Check; 8] = [
    Check {
        name: "null-address",
        run: check_null_address,
    },
    Check {
        name: "both-operations",
        run: check_both_operations,
    },
    Check {
        name: "rogue-read-parameters",
        run: check_rogue_read,
    },
    Check {
        name: "rogue-write-parameters",
        run: check_rogue_write,
    },
    Check {
        name: "reserved-low",
        run: check_reserved_low,
    },
    Check {
        name: "reserved-high",
        run: check_reserved_high,
    },
    Check {
        name: "write-range",
        run: check_write_range,
    },
    Check {
        name: "read-range",
        run: check_read_range,
    },
];

/// Upper bound on violations per entry (each check fires at most once)
pub const MAX_VIOLATIONS: usize = CHECKS.len();

/// Ordered list of violations for one entry
pub type Violations = heapless::Vec<Violation, MAX_VIOLATIONS>;

fn check_null_address(entry: &TableEntry, _: &AttributeView) -> Option<Violation> {
    let payload = entry.value != 0 || entry.delay != 0 || entry.attribute != 0;
    (entry.address == 0 && payload).then_some(Violation::NullAddress)
}

fn check_both_operations(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.write_flag.is_present() && view.read_flag.is_present())
        .then_some(Violation::BothOperations)
}

fn check_rogue_read(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.write_flag.is_present() && view.read_flag.is_absent() && !view.read.is_zero())
        .then_some(Violation::RogueReadParameters)
}

fn check_rogue_write(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.read_flag.is_present() && view.write_flag.is_absent() && !view.write.is_zero())
        .then_some(Violation::RogueWriteParameters)
}

// Skipped when a flag is already unrecognized so the entry is not reported twice
fn check_reserved_low(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.flags_recognized() && view.reserved_low != 0)
        .then_some(Violation::ReservedBits(ReservedField::Low))
}

fn check_reserved_high(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.flags_recognized() && view.reserved_high != 0)
        .then_some(Violation::ReservedBits(ReservedField::High))
}

fn check_write_range(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.write_flag.is_present() && view.write.overflows())
        .then_some(Violation::WriteRangeOverflow)
}

fn check_read_range(_: &TableEntry, view: &AttributeView) -> Option<Violation> {
    (view.read_flag.is_present() && view.read.overflows()).then_some(Violation::ReadRangeOverflow)
}

/// Flags holding values outside {0x0, 0x4, 0x5}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InvalidFlags {
    /// Write flag, if unrecognized
    pub write: Option<OpFlag>,
    /// Read flag, if unrecognized
    pub read: Option<OpFlag>,
}

impl InvalidFlags {
    /// Collect unrecognized flags from an attribute view
    pub const fn from_view(view: &AttributeView) -> Self {
        Self {
            write: if view.write_flag.is_recognized() {
                None
            } else {
                Some(view.write_flag)
            },
            read: if view.read_flag.is_recognized() {
                None
            } else {
                Some(view.read_flag)
            },
        }
    }

    /// Check if both flags are recognized
    pub const fn is_empty(&self) -> bool {
        self.write.is_none() && self.read.is_none()
    }

    /// Number of unrecognized flags
    pub const fn count(&self) -> usize {
        self.write.is_some() as usize + self.read.is_some() as usize
    }
}

/// Result of analyzing one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Operation classification
    pub operation: Operation,
    /// Flags with unsupported encodings
    pub invalid_flags: InvalidFlags,
    /// Violations, in check order
    pub violations: Violations,
}

impl Analysis {
    /// Check if the entry is free of violations and invalid flags
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.invalid_flags.is_empty()
    }
}

/// Classify an entry
pub fn classify(entry: &TableEntry, view: &AttributeView) -> Operation {
    if entry.is_terminator() {
        Operation::Terminator
    } else if view.write_flag.is_present() {
        Operation::Write(view.write)
    } else if view.read_flag.is_present() {
        Operation::Read(view.read)
    } else if entry.delay != 0 {
        Operation::DelayOnly
    } else {
        Operation::Invalid
    }
}

/// Run every check against an entry
pub fn violations(entry: &TableEntry, view: &AttributeView) -> Violations {
    CHECKS
        .iter()
        .filter_map(|check| (check.run)(entry, view))
        .collect()
}

/// Classify an entry and collect all of its violations
pub fn analyze(entry: &TableEntry, view: &AttributeView) -> Analysis {
    let analysis = Analysis {
        operation: classify(entry, view),
        invalid_flags: InvalidFlags::from_view(view),
        violations: violations(entry, view),
    };
    log::trace!(
        "0x{:08X}: {} ({} violation(s))",
        entry.address,
        analysis.operation,
        analysis.violations.len()
    );
    analysis
}
