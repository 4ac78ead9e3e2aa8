use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

/// Pretty-prints `value` to `out`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
