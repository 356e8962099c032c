//! Command line interface.
//!
//! Default parameter values live here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::rate::smooth::DEFAULT_SMOOTHING;

/// Default event log read by `sweep`.
pub const DEFAULT_SWEEP_INPUT: &str = "SWEEP.csv";
/// Default y-axis upper bound of single run charts.
pub const DEFAULT_RUN_Y_MAX: f64 = 20.0;
/// Default bin width, in seconds.
pub const DEFAULT_WINDOW: i64 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot smoothed RPC completion rates", long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub command: RateSubCommand,

    /// Directory charts and reports are written to. Defaults to the working
    /// directory.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Bin width in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW)]
    pub window: i64,

    /// Weight of the previous raw sample in the moving average.
    #[arg(long, global = true, default_value_t = DEFAULT_SMOOTHING)]
    pub smoothing: f64,

    /// Also write the analysed series as JSON next to the chart.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum RateSubCommand {
    /// Compare runs of a parameter sweep, one curve per group size `n`.
    Sweep {
        /// Event log with a group size column.
        #[arg(long, default_value = DEFAULT_SWEEP_INPUT)]
        input: PathBuf,
    },

    /// Plot the absolute RPC rate of a single run.
    Run {
        /// Event log of the run.
        input: PathBuf,

        /// Upper bound of the y-axis.
        #[arg(long, default_value_t = DEFAULT_RUN_Y_MAX)]
        y_max: f64,
    },
}

/// How the event log is partitioned before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Sweep,
    Run,
}

impl CLI {
    pub fn input(&self) -> &PathBuf {
        match &self.command {
            RateSubCommand::Sweep { input } => input,
            RateSubCommand::Run { input, .. } => input,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        match self.command {
            RateSubCommand::Sweep { .. } => AnalysisMode::Sweep,
            RateSubCommand::Run { .. } => AnalysisMode::Run,
        }
    }

    /// Fixed y-axis range, if the subcommand uses one.
    pub fn y_max(&self) -> Option<f64> {
        match self.command {
            RateSubCommand::Sweep { .. } => None,
            RateSubCommand::Run { y_max, .. } => Some(y_max),
        }
    }
}
