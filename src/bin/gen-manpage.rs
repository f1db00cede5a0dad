//! Man page generator for hisi-regtable
//!
//! Writes `hisi-regtable.1` plus one page per subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

#[path = "../cli.rs"]
mod cli;

fn render(cmd: clap::Command, title: &str, output_dir: &Path) -> std::io::Result<PathBuf> {
    let man = clap_mangen::Man::new(cmd).title(title.to_uppercase());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    let output_path = output_dir.join(format!("{}.1", title));
    fs::write(&output_path, buffer)?;
    Ok(output_path)
}

fn main() -> std::io::Result<()> {
    // Default to ./man directory
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    let cmd = cli::Cli::command();
    for sub in cmd.get_subcommands() {
        let title = format!("{}-{}", cmd.get_name(), sub.get_name());
        let path = render(sub.clone(), &title, &output_dir)?;
        println!("Man page generated at: {}", path.display());
    }

    let main_page = render(cmd.clone(), "hisi-regtable", &output_dir)?;
    println!("Man page generated at: {}", main_page.display());
    println!("\nTo view the man page:");
    println!("  man -l {}", main_page.display());

    Ok(())
}
