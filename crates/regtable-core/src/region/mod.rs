//! Address region support
//!
//! A region table names the hardware blocks of a SoC's address space so that
//! table entries can be labelled with the block they touch. Tables can be:
//!
//! - Built in code from [`MemoryRegion`] slices (no allocation needed)
//! - Loaded from the CSV format used by SoC address maps
//! - Loaded from TOML files
//!
//! Region order is significant: when two regions share a base address the
//! one listed first wins.

mod resolver;
mod types;

#[cfg(feature = "std")]
mod csv;
#[cfg(feature = "std")]
mod error;
#[cfg(feature = "std")]
mod toml;

pub use resolver::{AddressResolver, LinearResolver, Resolution};
#[cfg(feature = "alloc")]
pub use resolver::SortedResolver;
pub use types::*;

#[cfg(feature = "std")]
pub use csv::parse_csv;
#[cfg(feature = "std")]
pub use error::RegionError;
