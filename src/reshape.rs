use crate::error::PipelineError;
use crate::models::{Observation, RawTable};

/// Wide → long: one [`Observation`] per (row, period column).
///
/// Every column other than the two identifier columns is a period column whose header
/// is the period label.
pub fn melt(
    table: &RawTable,
    region_column: &str,
    tier_column: &str,
) -> Result<Vec<Observation>, PipelineError> {
    let (name_idx, tier_idx) = match (
        table.column_index(region_column),
        table.column_index(tier_column),
    ) {
        (Some(n), Some(t)) => (n, t),
        _ => {
            return Err(PipelineError::Schema(format!(
                "columns '{region_column}' or '{tier_column}' not found"
            )));
        }
    };

    let periods: Vec<(usize, &str)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx && *i != tier_idx)
        .map(|(i, h)| (i, h.as_str()))
        .collect();

    let mut out = Vec::with_capacity(table.rows.len() * periods.len());
    for row in 0..table.rows.len() {
        let region_name = table.cell(row, name_idx).to_text();
        let region_tier = table.cell(row, tier_idx).to_text();
        for (col, label) in &periods {
            out.push(Observation {
                region_name: region_name.clone(),
                region_tier: region_tier.clone(),
                period_label: (*label).to_string(),
                value_raw: table.cell(row, *col).clone(),
            });
        }
    }
    Ok(out)
}
