//! Text report of an inspected table
//!
//! One line per entry, in the column layout HiSilicon table dumps are usually
//! shared in:
//!
//! ```text
//! ADDR: 0x12010044 CRG               VALUE: 0x00000123   DELAY: 0x00000000 DEC 0000000000   ATTR: 0x000000fd  -->  WRITE(0x5)   COUNT(0-31): 31 START(0-31): 00
//! ```

use colored::{Color, Colorize};
use regtable_core::analysis::ReservedField;
use regtable_core::{AttributeView, BitField, Encoding, Inspection, OpFlag, TableWindow, Violation};

/// How violations are shown after the operation column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationOutput {
    /// Name the first `limit` violations
    List {
        /// Maximum number of violations named per entry
        limit: usize,
        /// Append "(N more)" when violations were left out
        show_omitted: bool,
    },
    /// Only print how many violations were found
    Count,
}

/// Report options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Emit ANSI colors
    pub color: bool,
    /// Print nothing but the address of each entry
    pub addresses_only: bool,
    /// Leave out the address column
    pub no_address: bool,
    /// Print the region base and the offset into the region
    pub print_offset: bool,
    /// Violation output mode
    pub violations: ViolationOutput,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: true,
            addresses_only: false,
            no_address: false,
            print_offset: false,
            violations: ViolationOutput::List {
                limit: 1,
                show_omitted: true,
            },
        }
    }
}

const ADDR_LABEL: &str = "ADDR: ";
const VALUE_LABEL: &str = "   VALUE: ";
const DELAY_LABEL: &str = "   DELAY: ";
const ATTR_LABEL: &str = "   ATTR: ";
const COUNT_LABEL: &str = " COUNT(0-31): ";
const START_LABEL: &str = " START(0-31): ";

/// Renders report lines for a fixed configuration
#[derive(Debug, Clone, Copy)]
pub struct Report {
    config: ReportConfig,
}

impl Report {
    /// Create a renderer
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// The range line printed before the entries, `None` in address-only mode
    pub fn header(&self, window: &TableWindow) -> Option<String> {
        if self.config.addresses_only {
            return None;
        }
        let end = window.end();
        Some(format!(
            "Start from {} 0x{:x} - End to {} 0x{:x} - Range {} 0x{:x} - Rows {} ",
            window.offset,
            window.offset,
            end,
            end,
            window.len,
            window.len,
            window.rows()
        ))
    }

    /// One report line, without the trailing newline
    pub fn line(&self, inspection: &Inspection<'_>) -> String {
        let entry = &inspection.entry;
        let mut out = String::new();

        if !self.config.no_address {
            if !self.config.addresses_only {
                out.push_str(&self.paint(ADDR_LABEL, Color::Green));
            }
            out.push_str(&format!("0x{:08x}", entry.address));
        }
        if self.config.addresses_only {
            return out;
        }

        let name = inspection
            .region
            .as_ref()
            .map_or("", |resolution| resolution.region.name.as_str());
        out.push_str(&format!(" {:<15}", name));
        if self.config.print_offset {
            if let Some(resolution) = &inspection.region {
                out.push_str(&format!(
                    "0x{:08x}+0x{:08x}",
                    resolution.region.base,
                    resolution.offset(entry.address)
                ));
            }
        }

        out.push_str(&self.paint(VALUE_LABEL, Color::Green));
        out.push_str(&format!("0x{:08x}", entry.value));
        out.push_str(&self.paint(DELAY_LABEL, Color::Green));
        let delay = format!("0x{:08x} DEC {:010}", entry.delay, entry.delay);
        if entry.delay != 0 {
            out.push_str(&self.paint(&delay, Color::Yellow));
        } else {
            out.push_str(&delay);
        }
        out.push_str(&self.paint(ATTR_LABEL, Color::Green));
        out.push_str(&format!("0x{:08x}  -->", entry.attribute));

        self.push_operation(&mut out, inspection);
        self.push_violations(&mut out, &inspection.analysis.violations);
        out
    }

    fn push_operation(&self, out: &mut String, inspection: &Inspection<'_>) {
        let view: &AttributeView = &inspection.attributes;
        let entry = &inspection.entry;

        self.push_flag(out, view.write_flag, view.write, "WRITE", Color::Blue);
        self.push_flag(out, view.read_flag, view.read, "READ", Color::Yellow);

        if view.write_flag.is_absent() && view.read_flag.is_absent() {
            if entry.delay != 0 {
                out.push_str(&self.paint("  DELAY ONLY  ", Color::Yellow));
            } else if entry.is_terminator() {
                out.push_str("  (TERMINATE) ");
            } else {
                out.push_str(&self.paint("  NONE(INVLD) ", Color::Red));
            }
        }
    }

    fn push_flag(&self, out: &mut String, flag: OpFlag, bits: BitField, op: &str, color: Color) {
        match flag {
            OpFlag::Absent => {}
            OpFlag::Present(encoding) => {
                let tag = match encoding {
                    Encoding::Canonical => "(0x4)",
                    Encoding::Alias => "(0x5)",
                };
                let label = format!("  {:<12}", format!("{}{}", op, tag));
                out.push_str(&self.paint(&label, color));
                out.push_str(&self.paint(COUNT_LABEL, Color::Green));
                out.push_str(&format!("{:02}", bits.count));
                out.push_str(&self.paint(START_LABEL, Color::Green));
                out.push_str(&format!("{:02}", bits.start));
            }
            OpFlag::Reserved | OpFlag::Unrecognized(_) => {
                let label = format!("  {:<12}", format!("{}(INVLD)", op));
                out.push_str(&self.paint(&label, Color::Red));
            }
        }
    }

    fn push_violations(&self, out: &mut String, violations: &[Violation]) {
        if violations.is_empty() {
            return;
        }

        let mut text = String::new();
        match self.config.violations {
            ViolationOutput::List {
                limit,
                show_omitted,
            } => {
                for violation in violations.iter().take(limit) {
                    text.push_str(violation_label(violation));
                }
                if show_omitted && violations.len() > limit {
                    text.push_str(&format!("({} more)", violations.len() - limit));
                }
            }
            ViolationOutput::Count => {
                text.push_str(&format!("({} attribute errors)", violations.len()));
            }
        }

        out.push(' ');
        out.push_str(&self.paint(&text, Color::Red));
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.config.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn violation_label(violation: &Violation) -> &'static str {
    match violation {
        Violation::NullAddress => "(NULL ADDR)",
        Violation::BothOperations => "(BOTH READ AND WRITE FLAGS ARE PRESENT)",
        Violation::RogueReadParameters => "(READ PARAMETERS W/O READ FLAG)",
        Violation::RogueWriteParameters => "(WRITE PARAMETERS W/O WRITE FLAG)",
        Violation::ReservedBits(ReservedField::Low) => "(NON-ZERO ATTR BYTE RANGE [8-10])",
        Violation::ReservedBits(ReservedField::High) => "(NON-ZERO ATTR BYTE RANGE [24-26])",
        Violation::WriteRangeOverflow => "(WRITE SUM OF BIT COUNT AND START BIT >31)",
        Violation::ReadRangeOverflow => "(READ SUM OF BIT COUNT AND START BIT >31)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regtable_core::{LinearResolver, MemoryRegion, TableEntry};

    fn plain() -> Report {
        Report::new(ReportConfig {
            color: false,
            ..ReportConfig::default()
        })
    }

    fn regions() -> [MemoryRegion; 1] {
        [MemoryRegion::new("CRG", 0x1201_0000, 0x1201_FFFF)]
    }

    fn render(report: &Report, entry: TableEntry) -> String {
        let regions = regions();
        let resolver = LinearResolver::new(&regions);
        report.line(&Inspection::inspect(0, entry, &resolver))
    }

    #[test]
    fn test_header() {
        let window = TableWindow::new(8192, 64, 4096).unwrap();
        assert_eq!(
            plain().header(&window).unwrap(),
            "Start from 64 0x40 - End to 4160 0x1040 - Range 4096 0x1000 - Rows 256 "
        );

        let report = Report::new(ReportConfig {
            addresses_only: true,
            ..ReportConfig::default()
        });
        assert!(report.header(&window).is_none());
    }

    #[test]
    fn test_write_line() {
        let line = render(&plain(), TableEntry::new(0x1201_0044, 0x123, 0, 0x0000_00FD));
        assert_eq!(
            line,
            "ADDR: 0x12010044 CRG               VALUE: 0x00000123   DELAY: 0x00000000 DEC 0000000000   \
             ATTR: 0x000000fd  -->  WRITE(0x5)   COUNT(0-31): 31 START(0-31): 00"
        );
    }

    #[test]
    fn test_read_and_delay_lines() {
        let line = render(&plain(), TableEntry::new(0x1201_0010, 1, 0, 0x0004_0000));
        assert!(line.ends_with("-->  READ(0x4)    COUNT(0-31): 00 START(0-31): 00"));

        let line = render(&plain(), TableEntry::new(0x1201_0010, 0, 100, 0));
        assert!(line.contains("DELAY: 0x00000064 DEC 0000000100"));
        assert!(line.ends_with("-->  DELAY ONLY  "));

        let line = render(&plain(), TableEntry::TERMINATOR);
        assert!(line.ends_with("-->  (TERMINATE) "));

        let line = render(&plain(), TableEntry::new(0x1201_0010, 5, 0, 0));
        assert!(line.ends_with("-->  NONE(INVLD) "));
    }

    #[test]
    fn test_invalid_flag_line() {
        let line = render(&plain(), TableEntry::new(0x1201_0010, 0, 0, 0x0000_0007));
        assert!(line.ends_with("-->  WRITE(INVLD)"));
    }

    #[test]
    fn test_violation_output() {
        // Null address and both operations
        let entry = TableEntry::new(0, 0, 0, 0x0005_0004);

        let line = render(&plain(), entry);
        assert!(line.ends_with(" (NULL ADDR)(1 more)"));

        let report = Report::new(ReportConfig {
            color: false,
            violations: ViolationOutput::List {
                limit: usize::MAX,
                show_omitted: true,
            },
            ..ReportConfig::default()
        });
        assert!(
            render(&report, entry).ends_with(" (NULL ADDR)(BOTH READ AND WRITE FLAGS ARE PRESENT)")
        );

        let report = Report::new(ReportConfig {
            color: false,
            violations: ViolationOutput::Count,
            ..ReportConfig::default()
        });
        assert!(render(&report, entry).ends_with(" (2 attribute errors)"));
    }

    #[test]
    fn test_address_columns() {
        let entry = TableEntry::new(0x1201_0044, 0, 0, 0x0000_00FD);

        let report = Report::new(ReportConfig {
            color: false,
            addresses_only: true,
            ..ReportConfig::default()
        });
        assert_eq!(render(&report, entry), "0x12010044");

        let report = Report::new(ReportConfig {
            color: false,
            no_address: true,
            ..ReportConfig::default()
        });
        assert!(render(&report, entry).starts_with(" CRG "));

        let report = Report::new(ReportConfig {
            color: false,
            print_offset: true,
            ..ReportConfig::default()
        });
        assert!(render(&report, entry).contains("CRG            0x12010000+0x00000044   VALUE:"));
    }

    #[test]
    fn test_color_output() {
        colored::control::set_override(true);
        let report = Report::new(ReportConfig::default());
        let line = render(&report, TableEntry::new(0x1201_0044, 0, 0, 0x0000_00FD));
        assert!(line.contains("\x1b["));
        colored::control::unset_override();
    }
}
