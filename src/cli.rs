//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parse a byte offset (`0x` hex, leading-`0` octal or decimal)
fn parse_offset(s: &str) -> Result<usize, String> {
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return Err("offset must start with a digit".to_string());
    }
    regtable_core::parse_number(s)
        .map(|n| n as usize)
        .ok_or_else(|| format!("Invalid offset: {}", s))
}

/// Parse a byte count (`0x` hex, or decimal with an optional `k` suffix)
fn parse_count(s: &str) -> Result<usize, String> {
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return Err("count must start with a digit".to_string());
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if !hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex value: {}", s));
        }
        return usize::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e));
    }
    let (digits, multiplier) = match s.strip_suffix(['k', 'K']) {
        Some(digits) => (digits, 1024),
        None => (s, 1),
    };
    digits
        .parse::<usize>()
        .map_err(|e| format!("Invalid number: {}", e))?
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Count too large: {}", s))
}

/// Parse a 32-bit address (`0x` hex, leading-`0` octal or decimal)
fn parse_address(s: &str) -> Result<u32, String> {
    regtable_core::parse_number(s).ok_or_else(|| format!("Invalid address: {}", s))
}

#[derive(Parser)]
#[command(name = "hisi-regtable")]
#[command(
    author,
    version,
    about = "HiSilicon init register table decoder",
    long_about = None
)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Address map used to name register addresses
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocType {
    /// No address map, every address is unnamed
    #[default]
    None,
    /// CSV address map (BASE, END, NAME), requires --regions
    Csv,
    /// TOML region table, requires --regions
    Toml,
}

/// Region lookup strategy
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    /// Scan every region for each entry
    #[default]
    Linear,
    /// Binary search over a base-sorted index
    Sorted,
}

/// Output options for the parse command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print only the entry addresses
    #[arg(long)]
    pub addr_only: bool,

    /// Omit the address column
    #[arg(long)]
    pub no_address: bool,

    /// Print the resolved region base and the offset into it
    #[arg(long)]
    pub print_offset: bool,

    /// Print only the number of detected attribute errors per entry
    #[arg(long, conflicts_with = "all_errors")]
    pub error_count: bool,

    /// Print every detected attribute error instead of the first one
    #[arg(long)]
    pub all_errors: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode and check a register table inside a bootloader image
    Parse {
        /// Bootloader image
        input: PathBuf,

        /// Byte offset of the table (e.g. 64, 0x40)
        #[arg(long, value_parser = parse_offset)]
        offset: usize,

        /// Table length in bytes, a multiple of 16 (e.g. 4k, 0x1000)
        #[arg(long, value_parser = parse_count)]
        count: usize,

        /// Address map type
        #[arg(long, value_enum, default_value_t = SocType::None)]
        soc: SocType,

        /// Address map file for --soc csv or --soc toml
        #[arg(long)]
        regions: Option<PathBuf>,

        /// Region lookup strategy
        #[arg(long, value_enum, default_value_t = ResolverKind::Linear)]
        resolver: ResolverKind,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Region table operations
    #[command(subcommand)]
    Regions(RegionCommands),

    /// Resolve an address against a region table
    Resolve {
        /// Address to resolve (e.g. 0x12010044)
        #[arg(value_parser = parse_address)]
        address: u32,

        /// Region table file (CSV or TOML, by extension)
        #[arg(short, long)]
        regions: PathBuf,
    },
}

/// Region table subcommands
#[derive(Subcommand)]
pub enum RegionCommands {
    /// Show a region table
    Show {
        /// Region table file (CSV or TOML, by extension)
        file: PathBuf,
    },

    /// Convert a CSV address map to a TOML region table
    Convert {
        /// Input file (CSV format)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (TOML format)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4k"), Ok(4096));
        assert_eq!(parse_count("4096"), Ok(4096));
        assert_eq!(parse_count("0x1000"), Ok(4096));
        assert_eq!(parse_count("100"), Ok(100));
        assert!(parse_count("k").is_err());
        assert!(parse_count("0xk").is_err());
        assert!(parse_count("abc").is_err());
        assert!(parse_count("0x+10").is_err());
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("64"), Ok(64));
        assert_eq!(parse_offset("0x40"), Ok(64));
        assert!(parse_offset("x40").is_err());
        assert!(parse_offset("0x+40").is_err());
        assert!(parse_address("+5").is_err());
    }

    #[test]
    fn test_cli_parse() {
        let cli = Cli::try_parse_from([
            "hisi-regtable",
            "parse",
            "u-boot.bin",
            "--offset",
            "64",
            "--count",
            "4k",
            "--soc",
            "csv",
            "--regions",
            "hi3516a.csv",
            "--print-offset",
        ])
        .unwrap();
        match cli.command {
            Commands::Parse {
                offset,
                count,
                soc,
                output,
                ..
            } => {
                assert_eq!(offset, 64);
                assert_eq!(count, 4096);
                assert_eq!(soc, SocType::Csv);
                assert!(output.print_offset);
                assert!(!output.no_color);
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_error_count_conflicts_with_all_errors() {
        let result = Cli::try_parse_from([
            "hisi-regtable",
            "parse",
            "u-boot.bin",
            "--offset",
            "0",
            "--count",
            "16",
            "--error-count",
            "--all-errors",
        ]);
        assert!(result.is_err());
    }
}
