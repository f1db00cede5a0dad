//! TOML region table files
//!
//! Region tables can be kept in TOML:
//!
//! ```toml
//! [table]
//! name = "hi3516a"
//!
//! [[region]]
//! name = "CRG"
//! base = 0x12010000
//! end = 0x1201FFFF
//!
//! [[region]]
//! name = "DDR"
//! base = "0x80000000"
//! ```
//!
//! `end` is optional and defaults to no upper bound. Regions keep the order
//! they are listed in.

use std::format;
use std::fs;
use std::path::Path;
use std::string::String;
use std::vec::Vec;

use super::{MemoryRegion, RegionError, RegionSource, RegionTable, UNBOUNDED};
use crate::number::parse_number;

/// TOML region file structure
#[derive(Debug, serde::Deserialize)]
struct TomlRegionFile {
    table: Option<TomlTableMeta>,
    #[serde(default)]
    region: Vec<TomlRegion>,
}

/// Table metadata
#[derive(Debug, serde::Deserialize)]
struct TomlTableMeta {
    name: Option<String>,
}

/// Region definition in TOML
#[derive(Debug, serde::Deserialize)]
struct TomlRegion {
    name: String,
    #[serde(deserialize_with = "deserialize_hex_u32")]
    base: u32,
    #[serde(default, deserialize_with = "deserialize_opt_hex_u32")]
    end: Option<u32>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum HexOrInt {
    Int(u32),
    Str(String),
}

impl HexOrInt {
    fn value<E: serde::de::Error>(self) -> Result<u32, E> {
        match self {
            HexOrInt::Int(n) => Ok(n),
            HexOrInt::Str(s) => parse_number(&s)
                .ok_or_else(|| E::custom(format!("invalid number: {}", s))),
        }
    }
}

/// Deserialize a u32 given as an integer or a C-style number string
fn deserialize_hex_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    HexOrInt::deserialize(deserializer)?.value()
}

fn deserialize_opt_hex_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Option::<HexOrInt>::deserialize(deserializer)?
        .map(HexOrInt::value)
        .transpose()
}

impl RegionTable {
    /// Load a table from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a table from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, RegionError> {
        let file: TomlRegionFile = toml::from_str(content)?;

        let mut table = RegionTable::with_source(RegionSource::Toml);
        table.name = file.table.and_then(|meta| meta.name);

        for region in file.region {
            table.add_region(MemoryRegion::new(
                &region.name,
                region.base,
                region.end.unwrap_or(UNBOUNDED),
            ));
        }

        if table.is_empty() {
            return Err(RegionError::Empty);
        }

        log::debug!("Loaded {} regions from TOML", table.len());
        Ok(table)
    }

    /// Save the table to a TOML file
    pub fn to_toml_file(&self, path: impl AsRef<Path>) -> Result<(), RegionError> {
        fs::write(path, self.to_toml_string())?;
        Ok(())
    }

    /// Convert the table to a TOML string
    pub fn to_toml_string(&self) -> String {
        let mut output = String::new();

        if let Some(name) = &self.name {
            output.push_str("[table]\n");
            output.push_str(&format!("name = \"{}\"\n", escape(name)));
            output.push('\n');
        }

        for region in &self.regions {
            output.push_str("[[region]]\n");
            output.push_str(&format!("name = \"{}\"\n", escape(&region.name)));
            output.push_str(&format!("base = 0x{:08X}\n", region.base));
            if !region.is_open_ended() {
                output.push_str(&format!("end = 0x{:08X}\n", region.end));
            }
            output.push('\n');
        }

        output
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
