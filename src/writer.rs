use crate::config::OutputFormat;
use crate::error::Result;
use crate::types::{FrequencyTable, Region};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn output_path(dir: &Path, region: &Region, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", region.file_stem(), format.extension()))
}

/// Writes the header line then one line per row, cells separated by tabs.
/// An existing file is truncated.
pub fn write_table(table: &FrequencyTable, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", table.headers.join("\t"))?;
    for row in &table.rows {
        writeln!(out, "{}", row.join("\t"))?;
    }
    out.flush()?;
    debug!(path = %path.display(), rows = table.rows.len(), "Wrote frequency table");
    Ok(())
}

pub fn write_html_dump(pretty_html: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, pretty_html)?;
    debug!(path = %path.display(), bytes = pretty_html.len(), "Wrote page dump");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
