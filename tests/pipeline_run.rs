use anyhow::Result;
use ksh_earnings::config::Config;
use ksh_earnings::models::{AnnualSeries, CellValue, RawTable};
use ksh_earnings::naming::OutputKey;
use ksh_earnings::pipeline::{ChartRenderer, analyze, run};
use ksh_earnings::regression::RegressionResult;
use ksh_earnings::{FitQuality, PipelineError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    regions: Vec<(OutputKey, Vec<(i32, f64)>)>,
    national_lines: usize,
    fits: Vec<RegressionResult>,
}

impl ChartRenderer for Recorder {
    fn region_chart(&mut self, key: &OutputKey, series: &AnnualSeries) -> Result<PathBuf> {
        self.regions.push((key.clone(), series.pairs()));
        Ok(PathBuf::from(key.file_name()))
    }

    fn national_line_chart(&mut self, _series: &AnnualSeries) -> Result<PathBuf> {
        self.national_lines += 1;
        Ok(PathBuf::from("line.png"))
    }

    fn regression_chart(&mut self, _series: &AnnualSeries, fit: &RegressionResult) -> Result<PathBuf> {
        self.fits.push(*fit);
        Ok(PathBuf::from("scatter.png"))
    }
}

fn table(national: [&str; 3]) -> RawTable {
    let headers = vec![
        "Területi egység neve".to_string(),
        "Területi egység szintje".to_string(),
        "2018. I–IV. negyedév".to_string(),
        "2019. I. negyedév".to_string(),
        "2019. I–IV. negyedév".to_string(),
        "2020. I–IV. negyedév".to_string(),
    ];
    let row = |name: &str, tier: &str, vals: [&str; 4]| {
        let mut r = vec![CellValue::from(name), CellValue::from(tier)];
        r.extend(vals.iter().map(|v| CellValue::from(*v)));
        r
    };
    RawTable::new(
        headers,
        vec![
            row(
                "Ország összesen",
                "ország",
                [national[0], "999", national[1], national[2]],
            ),
            row("Győr-Moson-Sopron", "vármegye", ["900", "950", "1 000", "1 100"]),
            row("Heves", "vármegye", ["...", "...", "…", "..."]),
        ],
    )
}

#[test]
fn end_to_end_drops_missing_marker_and_fits_trend() {
    let cfg = Config::default();
    let mut rec = Recorder::default();
    let mut out = Vec::new();
    let report = analyze(&table(["1 000", "...", "1 500"]), &cfg, &mut rec, &mut out).unwrap();

    assert_eq!(report.national.years(), vec![2018, 2020]);
    assert_eq!(report.national.values(), vec![1000.0, 1500.0]);
    assert_eq!(report.summary.count, 2);
    assert!((report.fit.slope - 250.0).abs() < 1e-9);
    assert_eq!(report.fit.r_squared, 1.0);
    assert_eq!(report.quality, FitQuality::High);

    // national + one county charted, the all-missing county skipped
    assert_eq!(rec.regions.len(), 2);
    assert_eq!(rec.regions[1].0.file_name(), "diagram_Gyor-Moson-Sopron_varmegye.png");
    assert_eq!(rec.regions[1].1, vec![(2018, 900.0), (2019, 1000.0), (2020, 1100.0)]);
    assert_eq!(report.skipped_regions, vec!["Heves".to_string()]);
    assert_eq!(rec.national_lines, 1);
    assert_eq!(rec.fits.len(), 1);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("--- Descriptive Statistics"));
    assert!(text.contains("1,250 Ft"));
    assert!(text.contains("Model equation: Average Earnings = -503,500.00 + 250.00 * Year"));
    assert!(text.contains("R-squared value: 1.0000"));
    assert!(text.contains("very high"));
}

#[test]
fn empty_national_series_aborts_before_national_charts() {
    let cfg = Config::default();
    let mut rec = Recorder::default();
    let err = analyze(&table(["...", "…", ""]), &cfg, &mut rec, &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::EmptyResult { .. })
    ));
    assert_eq!(rec.national_lines, 0);
    assert!(rec.fits.is_empty());
}

#[test]
fn missing_identifier_columns_abort() {
    let mut t = table(["1", "2", "3"]);
    t.headers[1] = "Szint".into();
    let err = analyze(&t, &Config::default(), &mut Recorder::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err.root_cause().downcast_ref::<PipelineError>(),
        Some(PipelineError::Schema(_))
    ));
}

#[test]
fn run_clears_output_dir_and_reports_missing_input() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("diagrams");
    fs::create_dir(&out_dir).unwrap();
    fs::write(out_dir.join("stale.png"), b"old").unwrap();

    let cfg = Config {
        input: dir.path().join("missing.xlsx"),
        output_dir: out_dir.clone(),
        ..Config::default()
    };
    let err = run(&cfg, &mut Recorder::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::InputAccess { .. })
    ));
    assert!(!out_dir.join("stale.png").exists());
}

#[test]
fn run_reads_csv_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("earnings.csv");
    fs::write(
        &input,
        "KSH 20.2.2.9.,,,\n\
         Területi egység neve,Területi egység szintje,2021. I–IV. negyedév,2022. I–IV. negyedév\n\
         Forint/fő/hó,,,\n\
         Ország összesen,ország,438 800,517 300\n\
         Pest,vármegye,420 000,480 000\n",
    )
    .unwrap();
    let cfg = Config {
        input,
        output_dir: dir.path().join("out"),
        ..Config::default()
    };
    let mut rec = Recorder::default();
    let report = run(&cfg, &mut rec, &mut Vec::new()).unwrap();
    assert_eq!(report.national.pairs(), vec![(2021, 438_800.0), (2022, 517_300.0)]);
    assert_eq!(rec.regions.len(), 2);
    assert!(dir.path().join("out").is_dir());
}
