//! Visualization: render annual earnings series to **PNG** or **SVG**.
//!
//! - Line + markers for per-region and national series
//! - Scatter with fitted OLS line for the national trend
//! - Locale-aware forint tick labels (`403,600 Ft` vs `403 600 Ft`), integer year ticks
//!
//! Without a registered font the charts are still written, minus caption, axis labels
//! and legend.

pub mod fonts;
pub mod types;
pub mod util;

pub use types::PlotKind;

use crate::config::ChartConfig;
use crate::models::AnnualSeries;
use crate::naming::{NATIONAL_LINE_CHART, OutputKey, REGRESSION_CHART};
use crate::pipeline::ChartRenderer;
use crate::regression::RegressionResult;
use anyhow::{Result, anyhow};
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};

use fonts::ensure_fonts_registered;
use types::{NATIONAL_LINE_TITLE, REGRESSION_TITLE, X_DESC, Y_DESC, region_title};
use util::{
    FIT_RED, compute_left_label_area_px, format_forint, map_locale, office_color, value_bounds,
    year_bounds,
};

/// Draw one annual series. The backend follows the file extension (`.svg`, else bitmap).
///
/// `legend` labels the series inside the plot area when given.
pub fn plot_chart<P: AsRef<Path>>(
    series: &AnnualSeries,
    out_path: P,
    cfg: &ChartConfig,
    title: &str,
    legend: Option<&str>,
    kind: PlotKind,
) -> Result<()> {
    if series.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let with_text = ensure_fonts_registered(cfg.font_path.as_deref());
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let points: Vec<(f64, f64)> = series
        .pairs()
        .into_iter()
        .map(|(y, v)| (y as f64, v))
        .collect();
    let years: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    let mut values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    if let PlotKind::ScatterWithFit(fit) = kind {
        // keep the fitted line's ends inside the plot
        values.extend(years.iter().map(|x| fit.predict(*x)));
    }
    let (x_min, x_max) = year_bounds(&years).ok_or_else(|| anyhow!("no valid years"))?;
    let (y_min, y_max) = value_bounds(&values).ok_or_else(|| anyhow!("no numeric values to plot"))?;

    let frame = Frame {
        x: (x_min, x_max),
        y: (y_min, y_max),
        locale: map_locale(&cfg.locale),
        with_text,
    };

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (cfg.width, cfg.height)).into_drawing_area();
        draw_chart(root, &points, &frame, cfg, title, legend, kind)?;
    } else {
        let root =
            BitMapBackend::new(path_string.as_str(), (cfg.width, cfg.height)).into_drawing_area();
        draw_chart(root, &points, &frame, cfg, title, legend, kind)?;
    }
    Ok(())
}

struct Frame {
    x: (f64, f64),
    y: (f64, f64),
    locale: &'static Locale,
    with_text: bool,
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    frame: &Frame,
    cfg: &ChartConfig,
    title: &str,
    legend: Option<&str>,
    kind: PlotKind,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (x_min, x_max) = frame.x;
    let (y_min, y_max) = frame.y;
    let year_span = (x_max.floor() - x_min.ceil()) as usize + 1;
    let x_label_count = year_span.clamp(2, 12);
    let y_label_count = 8usize;
    let x_label_fmt = |x: &f64| {
        if (x - x.round()).abs() < 1e-6 {
            (x.round() as i32).to_string()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |v: &f64| format_forint(*v, frame.locale);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(16);
    if frame.with_text {
        builder
            .caption(title, (FontFamily::SansSerif, 22))
            .set_label_area_size(
                LabelAreaPosition::Left,
                compute_left_label_area_px(y_min, y_max, frame.locale, 12),
            )
            .set_label_area_size(LabelAreaPosition::Bottom, 48);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 15))
        .bold_line_style(BLACK.mix(0.25 * cfg.grid_alpha))
        .light_line_style(WHITE.mix(0.0))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = office_color(0);
    let radius = cfg.point_radius as i32;
    match kind {
        PlotKind::LinePoints => {
            let style = color.stroke_width(cfg.line_width);
            let elem = chart
                .draw_series(LineSeries::new(points.iter().copied(), style))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(text) = legend {
                elem.label(text.to_string()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|(x, y)| Circle::new((*x, *y), radius, color.filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        PlotKind::ScatterWithFit(fit) => {
            let elem = chart
                .draw_series(
                    points
                        .iter()
                        .map(|(x, y)| Circle::new((*x, *y), radius, color.mix(0.8).filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(text) = legend {
                elem.label(text.to_string())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
            }
            draw_fit_line(&mut chart, points, &fit, cfg.line_width)?;
        }
    }

    if frame.with_text && legend.is_some() {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_fit_line<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    points: &[(f64, f64)],
    fit: &RegressionResult,
    line_width: u32,
) -> Result<()> {
    let first = points.first().map(|p| p.0);
    let last = points.last().map(|p| p.0);
    if let (Some(a), Some(b)) = (first, last) {
        chart
            .draw_series(LineSeries::new(
                vec![(a, fit.predict(a)), (b, fit.predict(b))],
                FIT_RED.stroke_width(line_width),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Writes charts into one output directory with the fixed national file names.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    pub out_dir: PathBuf,
    pub chart: ChartConfig,
}

impl PlottersRenderer {
    pub fn new<P: Into<PathBuf>>(out_dir: P, chart: ChartConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            chart,
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn region_chart(&mut self, key: &OutputKey, series: &AnnualSeries) -> Result<PathBuf> {
        let path = key.path_in(&self.out_dir);
        plot_chart(
            series,
            &path,
            &self.chart,
            &region_title(&series.label),
            Some(&series.label),
            PlotKind::LinePoints,
        )?;
        Ok(path)
    }

    fn national_line_chart(&mut self, series: &AnnualSeries) -> Result<PathBuf> {
        let path = self.out_dir.join(NATIONAL_LINE_CHART);
        plot_chart(
            series,
            &path,
            &self.chart,
            NATIONAL_LINE_TITLE,
            None,
            PlotKind::LinePoints,
        )?;
        Ok(path)
    }

    fn regression_chart(&mut self, series: &AnnualSeries, fit: &RegressionResult) -> Result<PathBuf> {
        let path = self.out_dir.join(REGRESSION_CHART);
        plot_chart(
            series,
            &path,
            &self.chart,
            REGRESSION_TITLE,
            None,
            PlotKind::ScatterWithFit(*fit),
        )?;
        Ok(path)
    }
}
