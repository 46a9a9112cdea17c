//! Utility functions for visualization: colors, axis bounds, locale-aware labels.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette, first entries.
const OFFICE: [RGBColor; 4] = [
    RGBColor(68, 114, 196), // blue      (#4472C4)
    RGBColor(237, 125, 49), // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray     (#A5A5A5)
    RGBColor(255, 192, 0),  // gold      (#FFC000)
];

/// Fitted-line red.
pub const FIT_RED: RGBColor = RGBColor(214, 39, 40);

#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE[idx % OFFICE.len()].to_rgba()
}

/// Map a locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `hu`, `de`, `fr`, `es`, `it`, `pt`, `nl`.
/// Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "hu" | "hu_hu" | "hungarian" => &Locale::hu,
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Whole forints with locale thousands separators, e.g. `"403,600 Ft"`.
pub fn format_forint(v: f64, locale: &Locale) -> String {
    format!("{} Ft", (v.round() as i64).to_formatted_string(locale))
}

/// X range over years; a single year is widened by one on each side.
pub fn year_bounds(years: &[f64]) -> Option<(f64, f64)> {
    let min = years.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = years.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if (max - min).abs() < f64::EPSILON {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min - 0.25, max + 0.25))
    }
}

/// Y range with 5% headroom; a flat series gets ±1 around its value.
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let span = max - min;
    if span.abs() < f64::EPSILON {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min - span * 0.05, max + span * 0.05))
    }
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Left label area wide enough for the formatted Y tick labels, plus the axis title.
pub fn compute_left_label_area_px(ymin: f64, ymax: f64, locale: &Locale, font_px: u32) -> u32 {
    let widest = [ymin, ymax]
        .iter()
        .map(|v| estimate_text_width_px(&format_forint(*v, locale), font_px))
        .max()
        .unwrap_or(0);
    // tick marks + rotated axis description
    widest.saturating_add(40).clamp(60, 180)
}
