//! hisi-regtable - HiSilicon init register table decoder
//!
//! HiSilicon bootloaders initialize clocks, pin muxing and DDR by walking a
//! table of register steps stored near the start of the image. This tool
//! decodes such a table, labels each address with the hardware block it
//! belongs to, and flags entries whose attribute word is inconsistent.
//!
//! # Architecture
//!
//! All decoding lives in `regtable-core`:
//! - **Entry decoding** - 16-byte little-endian records and attribute fields
//! - **Analysis** - operation classification and validity checks
//! - **Regions** - address maps loaded from CSV or TOML and the resolvers
//!   that look addresses up in them
//!
//! This binary only selects the input window, loads the address map and
//! renders the report.

mod cli;
mod commands;
mod report;

use clap::Parser;
use cli::{Cli, Commands, OutputArgs, RegionCommands};
use report::{ReportConfig, ViolationOutput};

fn main() {
    let cli = Cli::parse();

    // Initialize logger, RUST_LOG overrides the verbosity flags
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Parse {
            input,
            offset,
            count,
            soc,
            regions,
            resolver,
            output,
        } => {
            let table = commands::regions::load_region_table(soc, regions.as_deref())?;
            commands::parse::cmd_parse(
                &input,
                offset,
                count,
                &table,
                resolver,
                report_config(&output),
            )
        }
        Commands::Regions(subcmd) => match subcmd {
            RegionCommands::Show { file } => commands::regions::cmd_show(&file),
            RegionCommands::Convert { input, output } => {
                commands::regions::cmd_convert(&input, &output)
            }
        },
        Commands::Resolve { address, regions } => {
            commands::regions::cmd_resolve(address, &regions)
        }
    }
}

/// Fold the output flags into a report configuration
fn report_config(args: &OutputArgs) -> ReportConfig {
    let violations = if args.error_count {
        ViolationOutput::Count
    } else if args.all_errors {
        ViolationOutput::List {
            limit: usize::MAX,
            show_omitted: true,
        }
    } else {
        ViolationOutput::List {
            limit: 1,
            show_omitted: true,
        }
    };

    ReportConfig {
        color: !args.no_color,
        addresses_only: args.addr_only,
        no_address: args.no_address,
        print_offset: args.print_offset,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config() {
        let config = report_config(&OutputArgs::default());
        assert_eq!(config, ReportConfig::default());

        let config = report_config(&OutputArgs {
            no_color: true,
            error_count: true,
            ..OutputArgs::default()
        });
        assert!(!config.color);
        assert_eq!(config.violations, ViolationOutput::Count);

        let config = report_config(&OutputArgs {
            all_errors: true,
            ..OutputArgs::default()
        });
        assert_eq!(
            config.violations,
            ViolationOutput::List {
                limit: usize::MAX,
                show_omitted: true
            }
        );
    }
}
