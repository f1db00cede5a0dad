//! Address to region resolution
//!
//! An address belongs to the region with the closest base at or below it.
//! Declared end addresses are not used to exclude regions. Duplicate bases
//! resolve to the region listed first.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::types::MemoryRegion;

/// Result of resolving an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Index of the region in the table
    pub index: usize,
    /// The region itself
    pub region: &'a MemoryRegion,
    /// False when no base was at or below the address and the first region
    /// was returned as a fallback
    pub matched: bool,
}

impl Resolution<'_> {
    /// Offset of an address from the resolved region's base
    pub const fn offset(&self, address: u32) -> u32 {
        self.region.offset_of(address)
    }
}

/// Maps addresses to regions of a table
pub trait AddressResolver {
    /// The regions in table order
    fn regions(&self) -> &[MemoryRegion];

    /// Index of the region whose base is the largest one not above `address`
    ///
    /// Returns `None` if every base is above the address or the table is
    /// empty.
    fn closest_preceding(&self, address: u32) -> Option<usize>;

    /// Index of the matching region, falling back to 0 when nothing matches
    fn resolve_index(&self, address: u32) -> usize {
        self.closest_preceding(address).unwrap_or(0)
    }

    /// Resolve an address to a region
    ///
    /// Returns `None` only for an empty table.
    fn resolve(&self, address: u32) -> Option<Resolution<'_>> {
        let regions = self.regions();
        match self.closest_preceding(address) {
            Some(index) => regions.get(index).map(|region| Resolution {
                index,
                region,
                matched: true,
            }),
            None => regions.first().map(|region| Resolution {
                index: 0,
                region,
                matched: false,
            }),
        }
    }
}

/// Resolver scanning every region on each lookup
#[derive(Debug, Clone, Copy)]
pub struct LinearResolver<'a> {
    regions: &'a [MemoryRegion],
}

impl<'a> LinearResolver<'a> {
    /// Create a resolver over a region slice
    pub const fn new(regions: &'a [MemoryRegion]) -> Self {
        Self { regions }
    }
}

impl AddressResolver for LinearResolver<'_> {
    fn regions(&self) -> &[MemoryRegion] {
        self.regions
    }

    fn closest_preceding(&self, address: u32) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (index, region) in self.regions.iter().enumerate() {
            if region.base > address {
                continue;
            }
            let distance = address - region.base;
            // Strictly closer only, so earlier duplicates are kept
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Resolver using a base-sorted index and binary search
///
/// The index is sorted stably, so regions sharing a base stay in table
/// order and the first of them is returned.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct SortedResolver<'a> {
    regions: &'a [MemoryRegion],
    order: Vec<usize>,
}

#[cfg(feature = "alloc")]
impl<'a> SortedResolver<'a> {
    /// Build the sorted index over a region slice
    pub fn new(regions: &'a [MemoryRegion]) -> Self {
        let mut order: Vec<usize> = (0..regions.len()).collect();
        order.sort_by_key(|&index| regions[index].base);
        log::debug!("Built sorted region index ({} regions)", order.len());
        Self { regions, order }
    }

    fn base(&self, index: usize) -> u32 {
        self.regions[index].base
    }
}

#[cfg(feature = "alloc")]
impl AddressResolver for SortedResolver<'_> {
    fn regions(&self) -> &[MemoryRegion] {
        self.regions
    }

    fn closest_preceding(&self, address: u32) -> Option<usize> {
        let above = self
            .order
            .partition_point(|&index| self.base(index) <= address);
        let closest = self.base(*self.order.get(above.checked_sub(1)?)?);
        let first = self
            .order
            .partition_point(|&index| self.base(index) < closest);
        self.order.get(first).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::UNBOUNDED;

    fn regions() -> [MemoryRegion; 3] {
        [
            MemoryRegion::new("A", 0x1000, UNBOUNDED),
            MemoryRegion::new("B", 0x2000, UNBOUNDED),
            MemoryRegion::new("C", 0x1000, UNBOUNDED),
        ]
    }

    fn check_resolver(resolver: &dyn AddressResolver) {
        let hit = resolver.resolve(0x1500).unwrap();
        assert_eq!(hit.region.name, "A");
        assert_eq!(hit.index, 0);
        assert!(hit.matched);
        assert_eq!(hit.offset(0x1500), 0x500);

        assert_eq!(resolver.resolve_index(0x2000), 1);
        assert_eq!(resolver.resolve_index(0xFFFF_FFFF), 1);
        assert_eq!(resolver.closest_preceding(0x1000), Some(0));

        // Below every base: first region as the fallback
        assert_eq!(resolver.closest_preceding(0x0500), None);
        assert_eq!(resolver.resolve_index(0x0500), 0);
        let miss = resolver.resolve(0x0500).unwrap();
        assert_eq!(miss.region.name, "A");
        assert!(!miss.matched);
    }

    #[test]
    fn test_linear_resolver() {
        let regions = regions();
        check_resolver(&LinearResolver::new(&regions));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_sorted_resolver() {
        let regions = regions();
        check_resolver(&SortedResolver::new(&regions));
    }

    #[test]
    fn test_end_address_not_used() {
        let regions = [
            MemoryRegion::new("UART0", 0x1209_0000, 0x1209_0FFF),
            MemoryRegion::new("DDRC", 0x1206_0000, 0x1206_FFFF),
        ];
        let resolver = LinearResolver::new(&regions);
        let hit = resolver.resolve(0x1209_8000).unwrap();
        assert_eq!(hit.region.name, "UART0");
        assert!(hit.matched);
        assert!(!hit.region.contains(0x1209_8000));
    }

    #[test]
    fn test_empty_table() {
        let resolver = LinearResolver::new(&[]);
        assert_eq!(resolver.closest_preceding(0x1000), None);
        assert_eq!(resolver.resolve_index(0x1000), 0);
        assert!(resolver.resolve(0x1000).is_none());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_sorted_empty_table() {
        let resolver = SortedResolver::new(&[]);
        assert_eq!(resolver.closest_preceding(0x1000), None);
        assert!(resolver.resolve(0x1000).is_none());
    }
}
