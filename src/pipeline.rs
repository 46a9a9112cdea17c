//! End-to-end run: load → reshape → per-region charts → national statistics and trend.

use crate::config::Config;
use crate::filter::{annual_series, distinct_regions, national_series};
use crate::loader::load_table;
use crate::models::{AnnualSeries, RawTable};
use crate::naming::OutputKey;
use crate::regression::{self, FitQuality, RegressionResult};
use crate::reshape::melt;
use crate::stats::{Summary, describe_series};
use crate::{report, storage};
use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Chart output seam. Implementations decide format and location; the pipeline only
/// hands over data and the sanitized key.
pub trait ChartRenderer {
    fn region_chart(&mut self, key: &OutputKey, series: &AnnualSeries) -> Result<PathBuf>;
    fn national_line_chart(&mut self, series: &AnnualSeries) -> Result<PathBuf>;
    fn regression_chart(&mut self, series: &AnnualSeries, fit: &RegressionResult) -> Result<PathBuf>;
}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub region_charts: Vec<PathBuf>,
    /// Regions without a single usable annual observation.
    pub skipped_regions: Vec<String>,
    pub national: AnnualSeries,
    pub summary: Summary,
    pub fit: RegressionResult,
    pub quality: FitQuality,
    pub national_charts: Vec<PathBuf>,
}

/// Prepare the output directory, load the configured input, and analyze it.
pub fn run<R: ChartRenderer, W: Write>(cfg: &Config, renderer: &mut R, out: &mut W) -> Result<RunReport> {
    storage::prepare_output_dir(&cfg.output_dir)?;
    let table = load_table(&cfg.input, &cfg.layout)?;
    analyze(&table, cfg, renderer, out)
}

/// Everything after loading. Stage failures propagate; nothing is rolled back.
pub fn analyze<R: ChartRenderer, W: Write>(
    table: &RawTable,
    cfg: &Config,
    renderer: &mut R,
    out: &mut W,
) -> Result<RunReport> {
    let observations = melt(table, &cfg.layout.region_column, &cfg.layout.tier_column)
        .context("the reshape step did not finish; the data could not be processed")?;
    debug!("{} long-form observations", observations.len());

    writeln!(out, "\nCreating diagrams by county...")?;
    let mut region_charts = Vec::new();
    let mut skipped_regions = Vec::new();
    for region in distinct_regions(&observations) {
        let series = annual_series(&observations, &region, &cfg.annual_marker);
        let Some(tier) = series.tier() else {
            warn!("no annual data for '{region}', chart skipped");
            skipped_regions.push(region);
            continue;
        };
        let key = OutputKey::new(&region, tier);
        let path = renderer
            .region_chart(&key, &series)
            .with_context(|| format!("rendering chart for '{region}'"))?;
        writeln!(out, "Diagram saved to: {}", path.display())?;
        region_charts.push(path);
    }

    let national = national_series(&observations, &cfg.national_region, &cfg.annual_marker)?;
    report::write_national_table(out, &national)?;

    let summary = describe_series(&national).ok_or_else(|| anyhow!("national series is empty"))?;
    report::write_summary(out, &summary)?;

    let mut national_charts = Vec::new();
    let line = renderer
        .national_line_chart(&national)
        .context("rendering national line chart")?;
    writeln!(out, "Line chart saved: {}", line.display())?;
    national_charts.push(line);

    let fit = regression::fit(&national)?;
    info!(
        "fit over {} years: slope={:.2} intercept={:.2} r2={:.4}",
        fit.n, fit.slope, fit.intercept, fit.r_squared
    );
    let scatter = renderer
        .regression_chart(&national, &fit)
        .context("rendering regression chart")?;
    writeln!(out, "Regression scatter plot saved: {}", scatter.display())?;
    national_charts.push(scatter);

    report::write_regression(out, &fit, &cfg.thresholds)?;

    Ok(RunReport {
        region_charts,
        skipped_regions,
        quality: fit.quality(&cfg.thresholds),
        national,
        summary,
        fit,
        national_charts,
    })
}
