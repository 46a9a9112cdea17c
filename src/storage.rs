use crate::models::AnnualSeries;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Create `dir` if needed and delete the regular files already in it.
/// Sub-directories are left alone. Returns the number of files removed.
pub fn prepare_output_dir<P: AsRef<Path>>(dir: P) -> Result<usize> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut removed = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
            removed += 1;
        }
    }
    if removed > 0 {
        info!("cleared {removed} existing files from {}", dir.display());
    }
    Ok(removed)
}

/// Spreadsheet apps execute cells starting with these.
fn neutralize_formula(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save an annual series as CSV with header.
pub fn save_series_csv<P: AsRef<Path>>(series: &AnnualSeries, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("region_name", "region_tier", "year", "value"))?;
    for p in &series.points {
        wtr.serialize((
            neutralize_formula(&p.region_name),
            neutralize_formula(&p.region_tier),
            p.year,
            p.value,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a series as CSV or JSON depending on the extension (CSV when unknown).
pub fn export_series<P: AsRef<Path>>(series: &AnnualSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => save_json(series, path),
        _ => save_series_csv(series, path),
    }
    .with_context(|| format!("exporting series to {}", path.display()))
}
