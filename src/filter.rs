//! Selection of annual observations per region and conversion into [`AnnualSeries`].

use crate::error::PipelineError;
use crate::models::{AnnualSeries, CleanedObservation, Observation};
use crate::normalize::{parse_earnings_value, parse_year};
use log::{debug, warn};
use std::collections::BTreeSet;

pub fn region_equals(obs: &Observation, name: &str) -> bool {
    obs.region_name == name
}

/// Full-year periods carry `marker` in their label; quarterly and percentile columns do not.
pub fn is_annual_period(label: &str, marker: &str) -> bool {
    label.contains(marker)
}

/// Region names in order of first appearance.
pub fn distinct_regions(observations: &[Observation]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    observations
        .iter()
        .filter(|o| seen.insert(o.region_name.as_str()))
        .map(|o| o.region_name.clone())
        .collect()
}

/// Annual, cleaned, year-sorted series of one region.
///
/// Cells that are missing or fail to parse are dropped. Should two observations share a
/// year, the first in input order wins.
pub fn annual_series(
    observations: &[Observation],
    region: &str,
    annual_marker: &str,
) -> AnnualSeries {
    let mut points: Vec<CleanedObservation> = observations
        .iter()
        .filter(|o| region_equals(o, region))
        .filter(|o| is_annual_period(&o.period_label, annual_marker))
        .filter_map(clean)
        .collect();

    // stable: equal years keep input order
    points.sort_by_key(|p| p.year);
    let before = points.len();
    points.dedup_by_key(|p| p.year);
    if points.len() != before {
        warn!(
            "{} duplicate year(s) dropped for {region}",
            before - points.len()
        );
    }

    AnnualSeries {
        label: region.to_string(),
        points,
    }
}

fn clean(obs: &Observation) -> Option<CleanedObservation> {
    let value = match parse_earnings_value(&obs.value_raw) {
        Ok(Some(v)) => v,
        Ok(None) => {
            debug!("{} / {}: no data", obs.region_name, obs.period_label);
            return None;
        }
        Err(e) => {
            debug!("{} / {}: dropped ({e})", obs.region_name, obs.period_label);
            return None;
        }
    };
    let year = match parse_year(&obs.period_label) {
        Ok(y) => y,
        Err(e) => {
            debug!("{}: dropped ({e})", obs.region_name);
            return None;
        }
    };
    Some(CleanedObservation {
        region_name: obs.region_name.clone(),
        region_tier: obs.region_tier.clone(),
        year,
        value,
    })
}

/// The national aggregate's annual series; an empty result is fatal.
pub fn national_series(
    observations: &[Observation],
    national_region: &str,
    annual_marker: &str,
) -> Result<AnnualSeries, PipelineError> {
    let series = annual_series(observations, national_region, annual_marker);
    if series.is_empty() {
        return Err(PipelineError::EmptyResult {
            region: national_region.to_string(),
        });
    }
    Ok(series)
}
