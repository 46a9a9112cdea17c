use ksh_earnings::filter::is_annual_period;
use ksh_earnings::models::{CellValue, Observation};
use ksh_earnings::stats::{describe, grouped_summary};

#[test]
fn describe_matches_pandas_layout() {
    let s = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!(s.count, 4);
    assert!((s.mean - 2.5).abs() < 1e-12);
    assert!((s.std.unwrap() - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    assert_eq!(s.min, 1.0);
    assert!((s.q1 - 1.75).abs() < 1e-12);
    assert!((s.median - 2.5).abs() < 1e-12);
    assert!((s.q3 - 3.25).abs() < 1e-12);
    assert_eq!(s.max, 4.0);
}

#[test]
fn describe_single_and_empty() {
    let s = describe(&[7.0]).unwrap();
    assert_eq!(s.std, None);
    assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (7.0, 7.0, 7.0, 7.0, 7.0));
    assert!(describe(&[]).is_none());
}

fn obs(region: &str, period: &str, raw: &str) -> Observation {
    Observation {
        region_name: region.into(),
        region_tier: "vármegye".into(),
        period_label: period.into(),
        value_raw: CellValue::from(raw),
    }
}

#[test]
fn grouped_stats_count_missing_cells() {
    let rows = vec![
        obs("Baranya", "2019. I–IV. negyedév", "300 000"),
        obs("Baranya", "2020. I–IV. negyedév", "..."),
        obs("Baranya", "2021. I–IV. negyedév", "340 000"),
        obs("Baranya", "2021. I. negyedév", "1"),
        obs("Zala", "2019. I–IV. negyedév", "…"),
    ];
    let got = grouped_summary(&rows, |o| is_annual_period(&o.period_label, "I–IV. negyedév"));
    assert_eq!(got.len(), 2);

    let b = &got[0];
    assert_eq!(b.region, "Baranya");
    assert_eq!(b.count, 2);
    assert_eq!(b.missing, 1);
    assert_eq!(b.min, Some(300_000.0));
    assert_eq!(b.max, Some(340_000.0));
    assert_eq!(b.median, Some(320_000.0));

    let z = &got[1];
    assert_eq!(z.region, "Zala");
    assert_eq!(z.count, 0);
    assert_eq!(z.missing, 1);
    assert_eq!(z.mean, None);
}
