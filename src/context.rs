//! Runtime parameters.
//!
//! This module defines the `RateContext` struct holding every parameter the
//! analysis needs at runtime. It is meant to be built from command line
//! parameters.
//! ```no_run
//! use rpc_rate::{cli::CLI, context::RateContext};
//! use clap::Parser;
//!
//! let args = CLI::parse();
//! let ctx = RateContext::from(&args);
//! ```
//! Default parameter values are defined in the `cli` module.

use std::path::PathBuf;

use crate::cli::{AnalysisMode, CLI};
use crate::io::OutputDirectory;

/// Contains all analysis parameters.
#[derive(Debug, Clone)]
pub struct RateContext {
    /// Event log to analyse.
    pub input: PathBuf,
    /// Selects how rows are parsed and grouped.
    pub mode: AnalysisMode,
    /// Where charts and reports are written.
    pub output_dir: OutputDirectory,
    /// Bin width, in seconds.
    pub window: i64,
    /// Weight of the previous raw sample in the moving average.
    pub smoothing: f64,
    /// Fixed y-axis upper bound. The axis is fitted to the data when unset.
    pub y_max: Option<f64>,
    /// If true, write the analysed series as JSON next to the chart.
    pub export_json: bool,
}

impl From<&CLI> for RateContext {
    fn from(cli_opts: &CLI) -> Self {
        Self {
            input: cli_opts.input().clone(),
            mode: cli_opts.mode(),
            output_dir: OutputDirectory::from(cli_opts),
            window: cli_opts.window,
            smoothing: cli_opts.smoothing,
            y_max: cli_opts.y_max(),
            export_json: cli_opts.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::RateContext;
    use crate::cli::{AnalysisMode, CLI};

    #[test]
    fn test_context_from_cli() {
        let cli = CLI::parse_from([
            "rpc-rate",
            "--window",
            "2",
            "--smoothing",
            "0.25",
            "run",
            "run.csv",
        ]);
        let ctx = RateContext::from(&cli);

        assert_eq!(ctx.mode, AnalysisMode::Run);
        assert_eq!(ctx.input, Path::new("run.csv"));
        assert_eq!(ctx.window, 2);
        assert_eq!(ctx.smoothing, 0.25);
        assert_eq!(ctx.y_max, Some(20.0));
        assert_eq!(ctx.output_dir.path(), Path::new("."));
        assert!(!ctx.export_json);
    }
}
