pub mod estimate;
pub mod list;
pub mod scenarios;

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Exit code for `--strict` runs where some prices were missing.
pub const EXIT_INCOMPLETE: i32 = 2;

/// Write to `out`, or print to stdout. HTML without `--out` goes to `default_file`.
pub fn write_or_print(content: &str, out: Option<&PathBuf>, default_file: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!("{} Written to {}", "✓".green(), path.display());
        }
        None if content.starts_with("<!DOCTYPE") => {
            let path = PathBuf::from(default_file);
            std::fs::write(&path, content)?;
            eprintln!("{} Written to {}", "✓".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
