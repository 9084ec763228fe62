use crate::error::{Result, ScraperError};
use crate::types::Region;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a tab-separated region list (`id<TAB>name` per line).
pub fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScraperError::RegionList(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    let regions = parse_regions(&content)?;
    debug!(count = regions.len(), path = %path.display(), "Loaded region list");
    Ok(regions)
}

/// Parses region list text. A leading line whose first column is not a
/// number is taken as a header and skipped; blank lines are ignored.
pub fn parse_regions(content: &str) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    let mut seen = HashSet::new();
    let mut first_line = true;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let is_first = std::mem::replace(&mut first_line, false);
        let mut columns = line.split('\t');
        let id_field = columns.next().unwrap_or("").trim();
        let name = columns.next().map(str::trim).unwrap_or("");

        let id: u32 = match id_field.parse() {
            Ok(id) => id,
            Err(_) if is_first => {
                debug!(line = line_no, "Skipping region list header");
                continue;
            }
            Err(_) => {
                return Err(ScraperError::RegionList(format!(
                    "line {}: region id '{}' is not a number",
                    line_no, id_field
                )))
            }
        };

        if name.is_empty() {
            return Err(ScraperError::RegionList(format!(
                "line {}: missing region name for id {}",
                line_no, id
            )));
        }
        if !seen.insert(id) {
            return Err(ScraperError::RegionList(format!(
                "line {}: duplicate region id {}",
                line_no, id
            )));
        }

        regions.push(Region::new(id, name));
    }

    Ok(regions)
}
