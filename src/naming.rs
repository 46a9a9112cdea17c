//! Output file names derived from region identity.

use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const NATIONAL_LINE_CHART: &str = "vonaldiagram_eves_kereset.png";
pub const REGRESSION_CHART: &str = "pontdiagram_regresszio_trend.png";

/// Make text safe for a file name: strip diacritics, drop spaces, `,` and path
/// separators become `_`.
pub fn sanitize_for_filename(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Sanitized (region, tier) pair naming one per-region chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputKey {
    pub region: String,
    pub tier: String,
}

impl OutputKey {
    pub fn new(region_name: &str, tier: &str) -> Self {
        Self {
            region: sanitize_for_filename(region_name),
            tier: sanitize_for_filename(tier),
        }
    }

    pub fn file_name(&self) -> String {
        format!("diagram_{}_{}.png", self.region, self.tier)
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}
