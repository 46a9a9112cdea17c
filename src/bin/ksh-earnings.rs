use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ksh_earnings::config::Config;
use ksh_earnings::filter::is_annual_period;
use ksh_earnings::viz::PlottersRenderer;
use ksh_earnings::{loader, pipeline, reshape, stats, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ksh-earnings",
    version,
    about = "Chart and trend-fit KSH regional gross average earnings"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full analysis: per-region charts, national statistics, and trend.
    Analyze(AnalyzeArgs),
    /// Load and reshape only; print the columns and per-region summaries.
    Inspect(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input spreadsheet (.xlsx/.xls/.ods) or CSV export.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Keep at most this many data rows after the description row.
    #[arg(long, conflicts_with = "no_row_cap")]
    max_rows: Option<usize>,
    /// Keep every data row (the table's percentile block included).
    #[arg(long, default_value_t = false)]
    no_row_cap: bool,
    /// Debug-level logging (same as RUST_LOG=debug).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Directory for the chart images; its files are deleted first.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Width of the charts.
    #[arg(long)]
    width: Option<u32>,
    /// Height of the charts.
    #[arg(long)]
    height: Option<u32>,
    /// Tick label locale (en, hu, de, ...).
    #[arg(long)]
    locale: Option<String>,
    /// TrueType font for chart text.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Save the national annual series (format by extension: .csv or .json).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Save statistics and regression results as JSON.
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(args: &InputArgs) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(input) = &args.input {
        cfg.input = input.clone();
    }
    if args.no_row_cap {
        cfg.layout.max_rows = None;
    } else if let Some(n) = args.max_rows {
        cfg.layout.max_rows = Some(n);
    }
    Ok(cfg)
}

fn print_program_info() {
    println!("KSH earnings analysis");
    println!("Analyzing gross average earnings in Hungary based on KSH data");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_analyze(args: AnalyzeArgs) -> Result<()> {
    init_logging(args.input.verbose);
    let mut cfg = load_config(&args.input)?;
    if let Some(dir) = args.out_dir {
        cfg.output_dir = dir;
    }
    if let Some(w) = args.width {
        cfg.chart.width = w;
    }
    if let Some(h) = args.height {
        cfg.chart.height = h;
    }
    if let Some(locale) = args.locale {
        cfg.chart.locale = locale;
    }
    if let Some(font) = args.font {
        cfg.chart.font_path = Some(font);
    }
    cfg.validate()?;

    print_program_info();
    log::debug!("reading data from {}", cfg.input.display());

    let mut renderer = PlottersRenderer::new(&cfg.output_dir, cfg.chart.clone());
    let report = pipeline::run(&cfg, &mut renderer, &mut std::io::stdout())?;

    if let Some(path) = args.export.as_ref() {
        storage::export_series(&report.national, path)?;
        eprintln!("Saved {} rows to {}", report.national.len(), path.display());
    }
    if let Some(path) = args.report_json.as_ref() {
        storage::save_json(&report, path)?;
        eprintln!("Wrote report to {}", path.display());
    }

    println!("\nAnalysis completed.");
    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{:.0}", x),
        _ => "NA".to_string(),
    }
}

fn cmd_inspect(args: InputArgs) -> Result<()> {
    init_logging(args.verbose);
    let cfg = load_config(&args)?;
    cfg.validate()?;

    let table = loader::load_table(&cfg.input, &cfg.layout)?;
    println!("Columns ({}):", table.headers.len());
    for h in &table.headers {
        println!("  {h}");
    }
    println!("Data rows: {}", table.rows.len());

    let observations =
        reshape::melt(&table, &cfg.layout.region_column, &cfg.layout.tier_column)?;
    let summaries = stats::grouped_summary(&observations, |o| {
        is_annual_period(&o.period_label, &cfg.annual_marker)
    });
    for s in summaries {
        println!(
            "{}  count={} missing={}  min={} max={} mean={} median={}",
            s.region,
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}
