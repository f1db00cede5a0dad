//! Table decoding command

use crate::cli::ResolverKind;
use crate::report::{Report, ReportConfig};
use regtable_core::{AddressResolver, Inspection, RegionTable, TableReader, TableSummary};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Decode the table at `offset..offset + count` of `input` and print the report
pub fn cmd_parse(
    input: &Path,
    offset: usize,
    count: usize,
    table: &RegionTable,
    resolver: ResolverKind,
    config: ReportConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    log::debug!("Read {} bytes from {}", data.len(), input.display());

    let resolver: Box<dyn AddressResolver + '_> = match resolver {
        ResolverKind::Linear => Box::new(table.linear_resolver()),
        ResolverKind::Sorted => Box::new(table.sorted_resolver()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = write_report(&mut out, &data, offset, count, resolver.as_ref(), config)?;
    out.flush()?;

    log::info!(
        "{} rows: {} write, {} read, {} delay only, {} invalid, {} terminator",
        summary.rows,
        summary.writes,
        summary.reads,
        summary.delay_only,
        summary.invalid,
        summary.terminators
    );
    if summary.is_clean() {
        log::info!("No attribute errors found");
    } else {
        log::warn!(
            "{} violation(s) in {} entries, {} invalid flag(s)",
            summary.violations,
            summary.entries_with_violations,
            summary.invalid_flags
        );
    }

    Ok(())
}

/// Write the header and one line per entry, returning the run totals
pub fn write_report<W: Write>(
    out: &mut W,
    data: &[u8],
    offset: usize,
    count: usize,
    resolver: &dyn AddressResolver,
    config: ReportConfig,
) -> Result<TableSummary, Box<dyn std::error::Error>> {
    let reader = TableReader::with_window(data, offset, count)?;
    let report = Report::new(config);

    if let Some(header) = report.header(&reader.window()) {
        writeln!(out, "{}", header)?;
    }

    let mut summary = TableSummary::default();
    for (entry_offset, entry) in reader {
        let inspection = Inspection::inspect(entry_offset, entry, resolver);
        summary.record(&inspection.analysis);
        writeln!(out, "{}", report.line(&inspection))?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regtable_core::{MemoryRegion, TableEntry, TableError};

    fn image(entries: &[TableEntry]) -> Vec<u8> {
        let mut data = vec![0xAA; 64];
        for entry in entries {
            data.extend_from_slice(&entry.to_bytes());
        }
        data
    }

    fn plain() -> ReportConfig {
        ReportConfig {
            color: false,
            ..ReportConfig::default()
        }
    }

    #[test]
    fn test_write_report() {
        let data = image(&[
            TableEntry::new(0x1201_0044, 0x123, 0, 0x0000_00FD),
            TableEntry::new(0x1202_0000, 0, 0, 0x0005_0004),
            TableEntry::TERMINATOR,
        ]);
        let table: RegionTable = [
            MemoryRegion::unbounded("CRG", 0x1201_0000),
            MemoryRegion::unbounded("SYSCTRL", 0x1202_0000),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        let summary =
            write_report(&mut out, &data, 64, 48, &table.sorted_resolver(), plain()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Start from 64 0x40 - End to 112 0x70 - Range 48 0x30 - Rows 3 "
        );
        assert!(lines[1].starts_with("ADDR: 0x12010044 CRG "));
        assert!(lines[2].contains(" SYSCTRL "));
        assert!(lines[2].ends_with("(BOTH READ AND WRITE FLAGS ARE PRESENT)"));
        assert!(lines[3].ends_with("(TERMINATE) "));

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.writes, 2);
        assert_eq!(summary.terminators, 1);
        assert_eq!(summary.violations, 1);
    }

    #[test]
    fn test_addresses_only() {
        let data = image(&[TableEntry::new(0x1201_0044, 0, 0, 0x0000_00FD)]);
        let table = RegionTable::none();
        let config = ReportConfig {
            addresses_only: true,
            ..plain()
        };

        let mut out = Vec::new();
        write_report(&mut out, &data, 64, 16, &table.linear_resolver(), config).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0x12010044\n");
    }

    #[test]
    fn test_bad_window() {
        let data = image(&[TableEntry::TERMINATOR]);
        let table = RegionTable::none();
        let resolver = table.linear_resolver();

        let err = write_report(&mut Vec::new(), &data, 64, 20, &resolver, plain()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::UnalignedLength {
                len: 20,
                lower: Some(16),
                upper: Some(32)
            })
        );

        let err = write_report(&mut Vec::new(), &data, 64, 32, &resolver, plain()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::OutOfBounds { .. })
        ));
    }
}
