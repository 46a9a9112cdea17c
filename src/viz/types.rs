//! Public types and constants for the visualization module.

use crate::regression::RegressionResult;

/// Plot types supported by this module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotKind {
    /// Line + markers overlay.
    LinePoints,
    /// Markers only, with the fitted trend line drawn across the year range.
    ScatterWithFit(RegressionResult),
}

pub const X_DESC: &str = "Év";
pub const Y_DESC: &str = "Bruttó Átlagkereset (Ft)";
pub const NATIONAL_LINE_TITLE: &str = "Bruttó Átlagkereset Alakulása (Országos, Éves Adatok)";
pub const REGRESSION_TITLE: &str = "Bruttó Átlagkereset Trendje (Lineáris Regresszió)";

pub fn region_title(region_name: &str) -> String {
    format!("Bruttó Átlagkereset Alakulása ({region_name})")
}
