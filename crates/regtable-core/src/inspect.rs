//! Per-entry inspection records and run totals

use crate::analysis::{analyze, Analysis, Operation};
use crate::attribute::AttributeView;
use crate::entry::TableEntry;
use crate::region::{AddressResolver, Resolution};

/// Everything known about one table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection<'r> {
    /// Byte offset of the entry in the input
    pub offset: usize,
    /// The decoded entry
    pub entry: TableEntry,
    /// Decoded attribute word
    pub attributes: AttributeView,
    /// Region the address resolves to, `None` for an empty region table
    pub region: Option<Resolution<'r>>,
    /// Classification and violations
    pub analysis: Analysis,
}

impl<'r> Inspection<'r> {
    /// Decode, analyze and resolve one entry
    pub fn inspect<R: AddressResolver + ?Sized>(
        offset: usize,
        entry: TableEntry,
        resolver: &'r R,
    ) -> Self {
        let attributes = entry.attributes();
        Self {
            offset,
            entry,
            attributes,
            region: resolver.resolve(entry.address),
            analysis: analyze(&entry, &attributes),
        }
    }

    /// Number of violations plus unrecognized flags
    pub fn finding_count(&self) -> usize {
        self.analysis.violations.len() + self.analysis.invalid_flags.count()
    }

    /// Check if anything about the entry is suspicious
    pub fn has_findings(&self) -> bool {
        self.finding_count() != 0
    }
}

/// Totals over a table run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSummary {
    /// Entries seen
    pub rows: usize,
    /// Write entries
    pub writes: usize,
    /// Read entries
    pub reads: usize,
    /// Delay-only entries
    pub delay_only: usize,
    /// Entries doing nothing
    pub invalid: usize,
    /// All-zero entries
    pub terminators: usize,
    /// Unrecognized operation flags
    pub invalid_flags: usize,
    /// Violations over all entries
    pub violations: usize,
    /// Entries with at least one violation
    pub entries_with_violations: usize,
}

impl TableSummary {
    /// Add one entry to the totals
    pub fn record(&mut self, analysis: &Analysis) {
        self.rows += 1;
        match analysis.operation {
            Operation::Terminator => self.terminators += 1,
            Operation::Write(_) => self.writes += 1,
            Operation::Read(_) => self.reads += 1,
            Operation::DelayOnly => self.delay_only += 1,
            Operation::Invalid => self.invalid += 1,
        }
        self.invalid_flags += analysis.invalid_flags.count();
        self.violations += analysis.violations.len();
        if !analysis.violations.is_empty() {
            self.entries_with_violations += 1;
        }
    }

    /// Check if no entry had a violation or invalid flag
    pub const fn is_clean(&self) -> bool {
        self.violations == 0 && self.invalid_flags == 0
    }
}

impl<'r> Extend<&'r Analysis> for TableSummary {
    fn extend<I: IntoIterator<Item = &'r Analysis>>(&mut self, iter: I) {
        for analysis in iter {
            self.record(analysis);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Violation;
    use crate::region::{LinearResolver, MemoryRegion, UNBOUNDED};

    fn regions() -> [MemoryRegion; 2] {
        [
            MemoryRegion::new("CRG", 0x1201_0000, 0x1201_FFFF),
            MemoryRegion::new("SYSCTRL", 0x1202_0000, UNBOUNDED),
        ]
    }

    #[test]
    fn test_inspect_write() {
        let regions = regions();
        let resolver = LinearResolver::new(&regions);
        // 32-bit write at bit 0 of CRG + 0x44
        let entry = TableEntry::new(0x1201_0044, 0x0000_0123, 0, 0x0000_00FD);
        let inspection = Inspection::inspect(0x40, entry, &resolver);

        assert_eq!(inspection.offset, 0x40);
        let region = inspection.region.unwrap();
        assert_eq!(region.region.name, "CRG");
        assert_eq!(region.offset(entry.address), 0x44);
        assert!(matches!(
            inspection.analysis.operation,
            Operation::Write(bits) if bits.width() == 32
        ));
        assert!(!inspection.has_findings());
    }

    #[test]
    fn test_inspect_findings() {
        let regions = regions();
        let resolver = LinearResolver::new(&regions);
        let entry = TableEntry::new(0x1202_0000, 0, 0, 0x0005_0004);
        let inspection = Inspection::inspect(0, entry, &resolver);

        assert_eq!(inspection.region.unwrap().region.name, "SYSCTRL");
        assert_eq!(inspection.analysis.violations.as_slice(), &[Violation::BothOperations]);
        assert_eq!(inspection.finding_count(), 1);

        // Unrecognized flags count as findings without being violations
        let entry = TableEntry::new(0x1202_0000, 0, 0, 0x0000_0007);
        let inspection = Inspection::inspect(0, entry, &resolver);
        assert!(inspection.analysis.violations.is_empty());
        assert_eq!(inspection.finding_count(), 1);
    }

    #[test]
    fn test_inspect_empty_table() {
        let resolver = LinearResolver::new(&[]);
        let inspection = Inspection::inspect(0, TableEntry::TERMINATOR, &resolver);
        assert!(inspection.region.is_none());
        assert_eq!(inspection.analysis.operation, Operation::Terminator);
    }

    #[test]
    fn test_summary() {
        let entries = [
            TableEntry::new(0x1201_0000, 1, 0, 0x0000_00FD),
            TableEntry::new(0x1201_0004, 1, 0, 0x0000_0004 | (0x3 << 19)),
            TableEntry::new(0x1201_0008, 0, 0, 0x0005_0000),
            TableEntry::new(0, 0, 100, 0),
            TableEntry::new(0x1201_000C, 0, 0, 0x0000_0003),
            TableEntry::TERMINATOR,
        ];
        let analyses: [Analysis; 6] = entries.map(|e| analyze(&e, &e.attributes()));

        let mut summary = TableSummary::default();
        summary.extend(analyses.iter());

        assert_eq!(summary.rows, 6);
        assert_eq!(summary.writes, 2);
        assert_eq!(summary.reads, 1);
        assert_eq!(summary.delay_only, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.terminators, 1);
        assert_eq!(summary.invalid_flags, 1);
        // Rogue read fields, then the null-address delay entry
        assert_eq!(summary.violations, 2);
        assert_eq!(summary.entries_with_violations, 2);
        assert!(!summary.is_clean());
    }
}
