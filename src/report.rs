//! Console text for the national series, its statistics, and the trend fit.

use crate::config::Thresholds;
use crate::models::AnnualSeries;
use crate::regression::RegressionResult;
use crate::stats::Summary;
use num_format::{Locale, ToFormattedString};
use std::io::{self, Write};

/// `1234567.891` → `"1,234,567.89"` for `decimals = 2`.
pub fn format_thousands(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let s = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if v < 0.0 && s.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn forint(v: f64) -> String {
    format!("{} Ft", format_thousands(v, 0))
}

pub fn write_national_table<W: Write>(out: &mut W, series: &AnnualSeries) -> io::Result<()> {
    writeln!(out, "--- Cleaned, annual national data ---")?;
    writeln!(out, "{:>6}  {:>14}", "Year", "Earnings")?;
    for p in &series.points {
        writeln!(out, "{:>6}  {:>14}", p.year, forint(p.value))?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(
        out,
        "--- Descriptive Statistics (National Annual Average Earnings) ---"
    )?;
    let rows: [(&str, String); 8] = [
        ("count", summary.count.to_string()),
        ("mean", forint(summary.mean)),
        ("std", summary.std.map_or_else(|| "NA".to_string(), forint)),
        ("min", forint(summary.min)),
        ("25%", forint(summary.q1)),
        ("50%", forint(summary.median)),
        ("75%", forint(summary.q3)),
        ("max", forint(summary.max)),
    ];
    for (name, value) in rows {
        writeln!(out, "{name:<6}{value:>16}")?;
    }
    Ok(())
}

pub fn write_regression<W: Write>(
    out: &mut W,
    fit: &RegressionResult,
    thresholds: &Thresholds,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Linear Regression Results (Trend) ---")?;
    writeln!(
        out,
        "Model equation: Average Earnings = {} + {} * Year",
        format_thousands(fit.intercept, 2),
        format_thousands(fit.slope, 2)
    )?;
    writeln!(out, "R-squared value: {:.4}", fit.r_squared)?;
    writeln!(out, "{}", fit.quality(thresholds).interpretation())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping_and_sign() {
        assert_eq!(format_thousands(-201_700.0, 2), "-201,700.00");
        assert_eq!(format_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(403_600.4, 0), "403,600");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
    }
}
