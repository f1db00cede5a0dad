//! regtable-core - Decoder and analyzer for HiSilicon init register tables
//!
//! HiSilicon bootloaders carry a table of register initialization steps that
//! the early `init_registers()` routine walks before DDR is up. Each step is a
//! 16-byte record of four little-endian words: address, value, delay and
//! attribute. This crate turns those records into a classified representation
//! without touching any hardware.
//!
//! The pipeline is linear:
//!
//! ```text
//! bytes -> TableEntry -> AttributeView -> Analysis
//!               |
//!               +-> AddressResolver (region lookup)
//! ```
//!
//! # Features
//!
//! - `alloc` - Owned region tables and the sorted resolver
//! - `std` - CSV and TOML region table import (includes `alloc`)
//!
//! # Example
//!
//! ```
//! use regtable_core::{Inspection, LinearResolver, MemoryRegion, TableReader};
//!
//! let regions = [MemoryRegion::new("CRG", 0x1201_0000, u32::MAX)];
//! let resolver = LinearResolver::new(&regions);
//!
//! let mut image = [0u8; 16];
//! image[0..4].copy_from_slice(&0x1201_0044u32.to_le_bytes());
//! image[12..16].copy_from_slice(&0x0000_00fdu32.to_le_bytes());
//!
//! for (offset, entry) in TableReader::new(&image).unwrap() {
//!     let inspection = Inspection::inspect(offset, entry, &resolver);
//!     assert_eq!(inspection.region.unwrap().region.name, "CRG");
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod analysis;
pub mod attribute;
pub mod entry;
pub mod error;
pub mod inspect;
mod number;
pub mod region;
pub mod table;

pub use analysis::{analyze, classify, Analysis, InvalidFlags, Operation, Violation, Violations};
pub use attribute::{AttributeView, BitField, Encoding, OpFlag};
pub use entry::{TableEntry, ENTRY_SIZE};
pub use error::{Result, TableError};
pub use inspect::{Inspection, TableSummary};
pub use number::parse_number;
pub use region::{AddressResolver, LinearResolver, MemoryRegion, Resolution};
#[cfg(feature = "alloc")]
pub use region::{RegionSource, RegionTable, SortedResolver};
pub use table::{TableReader, TableWindow};
