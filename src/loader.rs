//! Spreadsheet loading: read the first worksheet (or a CSV export of it) and cut the
//! regional block out of the published layout.

use crate::config::LayoutConfig;
use crate::error::PipelineError;
use crate::models::{CellValue, RawTable};
use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use log::{debug, warn};
use std::path::Path;

/// Load the input file and apply the layout (header row, description rows, row cap).
pub fn load_table<P: AsRef<Path>>(path: P, layout: &LayoutConfig) -> Result<RawTable, PipelineError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PipelineError::InputAccess {
            path: path.to_path_buf(),
            reason: "file not found".into(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let grid = match ext.as_str() {
        "csv" => read_csv_grid(path)?,
        _ => read_workbook_grid(path)?,
    };
    debug!("read {} physical rows from {}", grid.len(), path.display());

    let table = shape_rows(grid, layout)?;
    debug!("columns: {:?}", table.headers);
    for row in table.rows.iter().take(5) {
        debug!("row: {:?}", row);
    }
    Ok(table)
}

fn access_error(path: &Path, reason: impl ToString) -> PipelineError {
    PipelineError::InputAccess {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_workbook_grid(path: &Path) -> Result<Vec<Vec<CellValue>>, PipelineError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| access_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| access_error(path, "workbook has no worksheets"))?
        .map_err(|e| access_error(path, e))?;

    // calamine ranges start at the first used cell; pad back to physical coordinates
    // so `header_row` keeps meaning "row N of the sheet".
    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut grid: Vec<Vec<CellValue>> = (0..row0).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col0 as usize];
        cells.extend(row.iter().map(cell_from_data));
        grid.push(cells);
    }
    Ok(grid)
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn read_csv_grid(path: &Path) -> Result<Vec<Vec<CellValue>>, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| access_error(path, e))?;
    let mut grid = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| access_error(path, e))?;
        grid.push(
            record
                .iter()
                .map(|s| {
                    if s.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(s.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

/// Cut a physical cell grid into a [`RawTable`] following `layout`.
///
/// Empty header cells become `Unnamed: <index>`. Trailing blank rows are ignored before
/// the row cap applies; rows removed by the cap are reported with a warning since the
/// cap relies on the position of the percentile block rather than on its content.
pub fn shape_rows(grid: Vec<Vec<CellValue>>, layout: &LayoutConfig) -> Result<RawTable, PipelineError> {
    let mut rows = grid.into_iter().skip(layout.header_row);
    let header_cells = rows.next().ok_or_else(|| {
        PipelineError::Schema(format!("no header row at index {}", layout.header_row))
    })?;
    let headers: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let t = c.to_text();
            if t.is_empty() { format!("Unnamed: {i}") } else { t }
        })
        .collect();

    let mut data: Vec<Vec<CellValue>> = rows.skip(layout.description_rows).collect();
    while data
        .last()
        .is_some_and(|r| r.iter().all(CellValue::is_empty))
    {
        data.pop();
    }

    if let Some(cap) = layout.max_rows
        && data.len() > cap
    {
        let dropped = data.split_off(cap);
        let first = dropped
            .first()
            .and_then(|r| r.first())
            .map(CellValue::to_text)
            .unwrap_or_default();
        warn!(
            "row cap {cap} discarded {} trailing rows (first discarded: {first:?}); \
             verify the cap still matches the table layout",
            dropped.len()
        );
    }

    let missing: Vec<&str> = [&layout.region_column, &layout.tier_column]
        .into_iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::Schema(format!(
            "required columns not found: {}",
            missing.join(", ")
        )));
    }

    Ok(RawTable::new(headers, data))
}
