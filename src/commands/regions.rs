//! Region table command implementations

use crate::cli::SocType;
use regtable_core::{AddressResolver, RegionSource, RegionTable};
use std::path::Path;

/// Load the region table selected on the command line
pub fn load_region_table(
    soc: SocType,
    path: Option<&Path>,
) -> Result<RegionTable, Box<dyn std::error::Error>> {
    let table = match (soc, path) {
        (SocType::None, None) => RegionTable::none(),
        (SocType::None, Some(path)) => {
            log::warn!(
                "Ignoring {} (use --soc csv or --soc toml to load it)",
                path.display()
            );
            RegionTable::none()
        }
        (SocType::Csv, Some(path)) => RegionTable::from_csv_file(path)?,
        (SocType::Toml, Some(path)) => RegionTable::from_toml_file(path)?,
        (_, None) => return Err("--regions <FILE> is required for this SoC type".into()),
    };

    log::info!("Loaded {} region(s)", table.len());
    Ok(table)
}

/// Load a region table, picking the format from the file extension
pub fn load_by_extension(path: &Path) -> Result<RegionTable, Box<dyn std::error::Error>> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let soc = if is_toml { SocType::Toml } else { SocType::Csv };
    load_region_table(soc, Some(path))
}

/// Show a region table from a file
pub fn cmd_show(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_by_extension(file)?;
    print_table(&table);
    Ok(())
}

/// Convert a CSV address map to TOML
pub fn cmd_convert(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = RegionTable::from_csv_file(input)?;
    print_table(&table);

    table.to_toml_file(output)?;
    println!("\nSaved region table to {:?}", output);

    Ok(())
}

/// Resolve one address and print the matching region
pub fn cmd_resolve(address: u32, regions: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_by_extension(regions)?;
    let resolver = table.linear_resolver();
    let resolution = resolver
        .resolve(address)
        .ok_or("Region table is empty")?;

    if !resolution.matched {
        log::warn!(
            "0x{:08X} is below every region base, using the first region",
            address
        );
    }

    println!("Address: {:#010X}", address);
    println!(
        "Region:  {} (#{})",
        display_name(&resolution.region.name),
        resolution.index
    );
    println!("Base:    {:#010X}", resolution.region.base);
    println!("Offset:  {:#010X}", resolution.offset(address));
    if !resolution.region.contains(address) {
        println!("Note:    address is past the declared end of the region");
    }

    Ok(())
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

/// Print region table information
pub fn print_table(table: &RegionTable) {
    println!("Region Table");
    println!("============");

    if let Some(name) = &table.name {
        println!("Name:   {}", name);
    }

    println!(
        "Source: {}",
        match table.source {
            RegionSource::Builtin => "Built-in",
            RegionSource::Csv => "CSV file",
            RegionSource::Toml => "TOML file",
            RegionSource::Manual => "Manual",
        }
    );

    println!("\nRegions ({}):", table.len());
    println!("{:<16} {:>10} {:>10}", "Name", "Base", "End");
    println!("{:-<38}", "");

    for region in &table.regions {
        let end = if region.is_open_ended() {
            "-".to_string()
        } else {
            format!("{:#010X}", region.end)
        };
        println!(
            "{:<16} {:#010X} {:>10}",
            display_name(&region.name),
            region.base,
            end
        );
    }
}
