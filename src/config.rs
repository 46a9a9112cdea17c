//! Run configuration: input layout, filters, thresholds, and chart settings.
//!
//! Defaults describe the KSH STADAT table `mun0206` ("Bruttó átlagkereset területi
//! egységenként"). A JSON file may override any subset of fields:
//!
//! ```json
//! { "input": "data/mun0206.xlsx", "layout": { "max_rows": 25 }, "chart": { "locale": "hu" } }
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "stadat-mun0206-20.2.2.9-hu.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "diagrams";
pub const REGION_NAME_COLUMN: &str = "Területi egység neve";
pub const REGION_TIER_COLUMN: &str = "Területi egység szintje";
pub const NATIONAL_REGION: &str = "Ország összesen";
/// Period label fragment of a full-year (all four quarters) figure.
pub const ANNUAL_MARKER: &str = "I–IV. negyedév";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub layout: LayoutConfig,
    pub national_region: String,
    pub annual_marker: String,
    pub thresholds: Thresholds,
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            layout: LayoutConfig::default(),
            national_region: NATIONAL_REGION.to_string(),
            annual_marker: ANNUAL_MARKER.to_string(),
            thresholds: Thresholds::default(),
            chart: ChartConfig::default(),
        }
    }
}

/// Where the data sits inside the worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Zero-based physical row holding the column headers.
    pub header_row: usize,
    /// Rows right after the header that describe categories, not regions.
    pub description_rows: usize,
    /// Keep at most this many data rows. The published table appends percentile
    /// rows after the regional block; `None` keeps everything.
    pub max_rows: Option<usize>,
    pub region_column: String,
    pub tier_column: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_row: 1,
            description_rows: 1,
            max_rows: Some(30),
            region_column: REGION_NAME_COLUMN.to_string(),
            tier_column: REGION_TIER_COLUMN.to_string(),
        }
    }
}

/// Lower bounds (inclusive) of the r² interpretation bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub high: f64,
    pub good: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.9,
            good: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Marker radius in pixels.
    pub point_radius: u32,
    pub line_width: u32,
    /// Opacity of the dashed-looking grid lines.
    pub grid_alpha: f64,
    /// Tick label locale tag (`en`, `hu`, `de`, ...).
    pub locale: String,
    /// TrueType font used for captions and labels. Falls back to well-known system paths.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            point_radius: 4,
            line_width: 2,
            grid_alpha: 0.6,
            locale: "en".to_string(),
            font_path: None,
        }
    }
}

impl Config {
    /// Read a (partial) JSON configuration; unspecified fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.thresholds;
        if !(0.0..=1.0).contains(&t.high) || !(0.0..=1.0).contains(&t.good) {
            bail!("r² thresholds must lie in [0, 1] (high={}, good={})", t.high, t.good);
        }
        if t.good > t.high {
            bail!("'good' threshold {} exceeds 'high' threshold {}", t.good, t.high);
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            bail!("chart dimensions must be non-zero");
        }
        if self.layout.region_column == self.layout.tier_column {
            bail!("region and tier columns must differ");
        }
        Ok(())
    }
}
