//! Filesystem helpers for output files
//!
//! JSON is written pretty-printed with two-space indentation, to a sibling
//! temp file first and then renamed into place.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Creates `dir` and every missing ancestor
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Renders a value the way it is written to files and pipes
pub fn render_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize source")
}

/// Writes `value` to `path`, creating parent directories as needed
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let rendered = render_json(value)?;
    let temp_path = path.with_extension("json.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(rendered.as_bytes())
            .with_context(|| format!("Failed to write output: {}", temp_path.display()))?;
        writer.flush().context("Failed to flush output")?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
