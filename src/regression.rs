//! Ordinary least-squares trend of earnings over years.
//!
//! Fits `value ≈ slope * year + intercept` with centered sums, which keeps the normal
//! equations well-conditioned for four-digit years.
//!
//! Degenerate inputs are defined rather than rejected:
//! - a single observation (or zero year variance) gives `slope = 0` and
//!   `intercept = mean(value)`;
//! - when every value is identical (`SS_tot = 0`) the fit is a perfect constant and
//!   `r_squared = 1.0`.

use crate::config::Thresholds;
use crate::error::PipelineError;
use crate::models::AnnualSeries;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination in `[0, 1]`.
    pub r_squared: f64,
    pub n: usize,
}

impl RegressionResult {
    pub fn predict(&self, year: f64) -> f64 {
        self.slope * year + self.intercept
    }

    pub fn quality(&self, thresholds: &Thresholds) -> FitQuality {
        FitQuality::classify(self.r_squared, thresholds)
    }
}

/// Qualitative band of the coefficient of determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitQuality {
    High,
    Good,
    Weak,
}

impl FitQuality {
    /// Lower bounds are inclusive: `r² == high` is `High`.
    pub fn classify(r_squared: f64, thresholds: &Thresholds) -> Self {
        if r_squared >= thresholds.high {
            FitQuality::High
        } else if r_squared >= thresholds.good {
            FitQuality::Good
        } else {
            FitQuality::Weak
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            FitQuality::High => {
                "The R-squared value is very high. This means that the average earnings growth \
                 in this short period followed an almost perfectly linear trend."
            }
            FitQuality::Good => {
                "The R-squared value is strong. Time explains well the earnings growth."
            }
            FitQuality::Weak => {
                "The R-squared value is moderate or weak. The earnings change was not clearly linear."
            }
        }
    }
}

/// Fit OLS over an annual series.
pub fn fit(series: &AnnualSeries) -> Result<RegressionResult, PipelineError> {
    let xy: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (p.year as f64, p.value))
        .collect();
    fit_points(&xy).map_err(|e| match e {
        PipelineError::EmptyResult { .. } => PipelineError::EmptyResult {
            region: series.label.clone(),
        },
        other => other,
    })
}

/// Fit OLS over raw `(x, y)` pairs.
pub fn fit_points(xy: &[(f64, f64)]) -> Result<RegressionResult, PipelineError> {
    let n = xy.len();
    if n == 0 {
        return Err(PipelineError::EmptyResult {
            region: String::new(),
        });
    }
    if let Some((x, y)) = xy.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(PipelineError::Numeric(format!(
            "non-finite regression input ({x}, {y})"
        )));
    }

    let nf = n as f64;
    let x_mean = xy.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let y_mean = xy.iter().map(|(_, y)| y).sum::<f64>() / nf;
    let sxx: f64 = xy.iter().map(|(x, _)| (x - x_mean).powi(2)).sum();
    let sxy: f64 = xy.iter().map(|(x, y)| (x - x_mean) * (y - y_mean)).sum();

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let ss_tot: f64 = xy.iter().map(|(_, y)| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = xy
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    if !slope.is_finite() || !intercept.is_finite() || !r_squared.is_finite() {
        return Err(PipelineError::Numeric(
            "regression produced non-finite coefficients".into(),
        ));
    }

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared,
        n,
    })
}
