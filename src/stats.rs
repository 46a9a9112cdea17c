use crate::models::{AnnualSeries, Observation};
use crate::normalize::parse_earnings_value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive statistics of a value sample (pandas `describe()` layout).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Describe a sample; `None` when it is empty.
pub fn describe(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let mut vals = values.to_vec();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });
    Some(Summary {
        count,
        mean,
        std,
        min: vals[0],
        q1: quantile_sorted(&vals, 0.25),
        median: quantile_sorted(&vals, 0.5),
        q3: quantile_sorted(&vals, 0.75),
        max: vals[count - 1],
    })
}

pub fn describe_series(series: &AnnualSeries) -> Option<Summary> {
    describe(&series.values())
}

/// Linear interpolation between closest ranks over an ascending, non-empty slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Per-region tallies over raw observations (before year handling).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Group observations accepted by `keep` by region name and tally parsed values.
/// Cells that are absent or unparseable count as missing.
pub fn grouped_summary<F>(observations: &[Observation], keep: F) -> Vec<RegionSummary>
where
    F: Fn(&Observation) -> bool,
{
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<&str, usize> = BTreeMap::new();
    for o in observations.iter().filter(|o| keep(o)) {
        let key = o.region_name.as_str();
        match parse_earnings_value(&o.value_raw) {
            Ok(Some(v)) => groups.entry(key).or_default().push(v),
            _ => *missing.entry(key).or_default() += 1,
        }
    }
    for key in missing.keys() {
        groups.entry(*key).or_default();
    }

    let mut out = Vec::new();
    for (key, vals) in groups {
        let summary = describe(&vals);
        out.push(RegionSummary {
            region: key.to_string(),
            count: vals.len(),
            missing: missing.get(key).copied().unwrap_or(0),
            min: summary.as_ref().map(|s| s.min),
            max: summary.as_ref().map(|s| s.max),
            mean: summary.as_ref().map(|s| s.mean),
            median: summary.as_ref().map(|s| s.median),
        });
    }
    out
}
