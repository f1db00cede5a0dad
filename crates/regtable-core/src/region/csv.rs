//! CSV address map import
//!
//! SoC address maps are commonly kept as a three-column CSV with a header
//! line that is skipped:
//!
//! ```text
//! BASE,       END(OPT),   NAME
//! 0x12010000, 0x1201FFFF, CRG
//! 0x12020000,           , SYSCTRL
//! ```
//!
//! Numbers take C-style prefixes (`0x` hex, leading `0` octal). An empty end
//! column means the region has no upper bound. Names longer than
//! [`REGION_NAME_LEN`](super::REGION_NAME_LEN) bytes are truncated.

use std::format;
use std::fs;
use std::path::Path;
use std::string::ToString;

use super::{MemoryRegion, RegionError, RegionSource, RegionTable, UNBOUNDED};
use crate::number::parse_number;

/// Number of header lines before the data
const HEADER_LINES: usize = 1;

/// Parse a CSV address map
pub fn parse_csv(content: &str) -> Result<RegionTable, RegionError> {
    let mut table = RegionTable::with_source(RegionSource::Csv);

    for (index, line) in content.lines().enumerate().skip(HEADER_LINES) {
        let line_no = index + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let region = parse_line(line).map_err(|message| RegionError::Csv {
            line: line_no,
            message: message.to_string(),
        })?;
        log::trace!(
            "CSV line {}: {} at 0x{:08X}",
            line_no,
            region.name,
            region.base
        );
        table.add_region(region);
    }

    if table.is_empty() {
        return Err(RegionError::Empty);
    }

    log::debug!("Imported {} regions from CSV", table.len());
    Ok(table)
}

fn parse_line(line: &str) -> Result<MemoryRegion, &'static str> {
    let mut fields = line.splitn(3, ',');

    let base_field = fields.next().unwrap_or_default().trim_start_matches(' ');
    if !base_field.starts_with(|c: char| c.is_ascii_digit()) {
        return Err("base address must start with a digit");
    }
    let base = parse_number(base_field).ok_or("invalid base address")?;

    let end_field = fields.next().ok_or("missing end address column")?.trim();
    let end = if end_field.is_empty() {
        UNBOUNDED
    } else {
        parse_number(end_field).ok_or("invalid end address")?
    };

    let name = fields.next().ok_or("missing name column")?.trim();
    if name.is_empty() {
        return Err("empty region name");
    }

    Ok(MemoryRegion::new(name, base, end))
}

impl RegionTable {
    /// Parse a table from CSV text
    pub fn from_csv_str(content: &str) -> Result<Self, RegionError> {
        parse_csv(content)
    }

    /// Load a table from a CSV file
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut table = parse_csv(&content)?;
        table.name = path
            .file_stem()
            .map(|stem| format!("{}", stem.to_string_lossy()));
        Ok(table)
    }
}
