//! ksh_earnings
//!
//! Reshape, clean, summarize, chart, and trend-fit the KSH table of gross average
//! earnings by territorial unit. Pairs with the `ksh-earnings` CLI.
//!
//! ### Features
//! - Load the first worksheet of an `.xlsx` (or a `.csv` export) with the published layout
//! - Wide → long reshape and cleaning of space-grouped numbers and `...` markers
//! - Annual series per region, PNG/SVG line charts
//! - National descriptive statistics and an OLS trend with r² interpretation
//!
//! ### Example
//! ```no_run
//! use ksh_earnings::{Config, pipeline, viz::PlottersRenderer};
//!
//! let cfg = Config::default();
//! let mut renderer = PlottersRenderer::new(&cfg.output_dir, cfg.chart.clone());
//! let report = pipeline::run(&cfg, &mut renderer, &mut std::io::stdout())?;
//! println!("r² = {:.4}", report.fit.r_squared);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod naming;
pub mod normalize;
pub mod pipeline;
pub mod regression;
pub mod report;
pub mod reshape;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::Config;
pub use error::{ParseError, PipelineError};
pub use models::{AnnualSeries, CellValue, CleanedObservation, Observation, RawTable};
pub use regression::{FitQuality, RegressionResult};
