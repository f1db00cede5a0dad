//! CLI command implementations
//!
//! ## Parse
//!
//! The `parse` module walks a table window of a bootloader image and prints
//! one report line per entry.
//!
//! ## Regions
//!
//! The `regions` module loads, shows and converts region tables and resolves
//! single addresses against them.

pub mod parse;
pub mod regions;
