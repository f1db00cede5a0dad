//! Region types
//!
//! Core types for region tables that work in no_std environments.

#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use super::resolver::{LinearResolver, SortedResolver};

/// Maximum length of a region name in bytes
pub const REGION_NAME_LEN: usize = 14;

/// End address marking a region without an upper bound
pub const UNBOUNDED: u32 = u32::MAX;

/// Bounded region name
pub type RegionName = heapless::String<REGION_NAME_LEN>;

/// A named block of the SoC address space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Name of the block, truncated to [`REGION_NAME_LEN`] bytes
    pub name: RegionName,
    /// First address of the block
    pub base: u32,
    /// Last address of the block, or [`UNBOUNDED`]
    pub end: u32,
}

impl MemoryRegion {
    /// Create a new region, truncating the name if needed
    pub fn new(name: &str, base: u32, end: u32) -> Self {
        Self {
            name: truncate_name(name),
            base,
            end,
        }
    }

    /// Create a region without an upper bound
    pub fn unbounded(name: &str, base: u32) -> Self {
        Self::new(name, base, UNBOUNDED)
    }

    /// Check if the region has no upper bound
    pub const fn is_open_ended(&self) -> bool {
        self.end == UNBOUNDED
    }

    /// Check if an address is within the declared bounds
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.base && addr <= self.end
    }

    /// Offset of an address from the region base
    pub const fn offset_of(&self, addr: u32) -> u32 {
        addr.wrapping_sub(self.base)
    }
}

/// Truncate a name to [`REGION_NAME_LEN`] bytes on a character boundary
fn truncate_name(name: &str) -> RegionName {
    let mut out = RegionName::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Where a region table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSource {
    /// The built-in single-region table
    Builtin,
    /// Imported from a CSV address map
    Csv,
    /// Loaded from a TOML file
    Toml,
    /// Built in code
    Manual,
}

/// An ordered, owned list of regions
#[derive(Debug, Clone)]
#[cfg(feature = "alloc")]
pub struct RegionTable {
    /// Optional name for this table
    pub name: Option<String>,
    /// Source of this table
    pub source: RegionSource,
    /// Regions, in lookup priority order
    pub regions: Vec<MemoryRegion>,
}

#[cfg(feature = "alloc")]
impl RegionTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::with_source(RegionSource::Manual)
    }

    /// Create an empty table with a specific source
    pub fn with_source(source: RegionSource) -> Self {
        Self {
            name: None,
            source,
            regions: Vec::new(),
        }
    }

    /// The table used when no address map is given
    ///
    /// A single unnamed region covers the whole address space, so every
    /// lookup succeeds and only the address is meaningful.
    pub fn none() -> Self {
        let mut table = Self::with_source(RegionSource::Builtin);
        table.add_region(MemoryRegion::new("", 0, UNBOUNDED));
        table
    }

    /// Add a region at the end of the table
    pub fn add_region(&mut self, region: MemoryRegion) {
        self.regions.push(region);
    }

    /// Find a region by name (case-insensitive)
    pub fn find_region(&self, name: &str) -> Option<&MemoryRegion> {
        self.regions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Get the number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Resolver scanning the table linearly
    pub fn linear_resolver(&self) -> LinearResolver<'_> {
        LinearResolver::new(&self.regions)
    }

    /// Resolver using a sorted index and binary search
    pub fn sorted_resolver(&self) -> SortedResolver<'_> {
        SortedResolver::new(&self.regions)
    }
}

#[cfg(feature = "alloc")]
impl Default for RegionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "alloc")]
impl FromIterator<MemoryRegion> for RegionTable {
    fn from_iter<I: IntoIterator<Item = MemoryRegion>>(iter: I) -> Self {
        Self {
            name: None,
            source: RegionSource::Manual,
            regions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_truncation() {
        let region = MemoryRegion::new("DDR_PHY_CONTROLLER", 0x1206_0000, UNBOUNDED);
        assert_eq!(region.name, "DDR_PHY_CONTRO");
        assert_eq!(region.name.len(), REGION_NAME_LEN);

        // Multi-byte characters are never split
        let region = MemoryRegion::new("ÄÄÄÄÄÄÄÄ", 0, 0);
        assert_eq!(region.name.len(), 14);
        let region = MemoryRegion::new("aÄÄÄÄÄÄÄ", 0, 0);
        assert_eq!(region.name.len(), 13);
    }

    #[test]
    fn test_bounds() {
        let region = MemoryRegion::new("UART0", 0x1209_0000, 0x1209_0FFF);
        assert!(region.contains(0x1209_0000));
        assert!(region.contains(0x1209_0FFF));
        assert!(!region.contains(0x1209_1000));
        assert!(!region.is_open_ended());
        assert_eq!(region.offset_of(0x1209_0018), 0x18);
        assert!(MemoryRegion::unbounded("REG", 0).is_open_ended());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_none_table() {
        let table = RegionTable::none();
        assert_eq!(table.len(), 1);
        assert_eq!(table.source, RegionSource::Builtin);
        assert_eq!(table.regions[0].base, 0);
        assert!(table.regions[0].is_open_ended());
        assert!(table.regions[0].name.is_empty());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_find_region() {
        let table: RegionTable = [
            MemoryRegion::unbounded("CRG", 0x1201_0000),
            MemoryRegion::unbounded("SYSCTRL", 0x1202_0000),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.find_region("sysctrl").map(|r| r.base), Some(0x1202_0000));
        assert!(table.find_region("ddrc").is_none());
    }
}
