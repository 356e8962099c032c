//! Single run analysis.
//!
//! All events form one series of absolute rates. The chart is named after the
//! `k` and `alpha` parameters of the last event read.

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    cli::DEFAULT_RUN_Y_MAX,
    context::RateContext,
    events::Event,
    io::OutputSubject,
    plot::ChartLayout,
    rate::{report::RunParams, RateAnalyzer, RateReport},
    EventProcessor,
};

use super::save_outputs;

pub struct RunAnalyzer {
    timestamps: Vec<i64>,
    last_params: Option<RunParams>,
}

impl RunAnalyzer {
    pub fn new() -> Self {
        Self {
            timestamps: Vec::new(),
            last_params: None,
        }
    }

    /// Parameters of the last consumed event.
    pub fn params(&self) -> Option<RunParams> {
        self.last_params
    }

    pub fn report(&self, ctx: &RateContext) -> Result<RateReport> {
        let analyzer = RateAnalyzer::try_from(ctx)?;
        let series = analyzer.analyze(&self.timestamps, None)?;

        let mut report = RateReport::new(self.timestamps.len(), self.last_params, ctx.smoothing);
        report.push(series);

        Ok(report)
    }
}

impl Default for RunAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RateContext> for RunAnalyzer {
    fn from(_ctx: &RateContext) -> Self {
        RunAnalyzer::new()
    }
}

impl EventProcessor for RunAnalyzer {
    fn init(&mut self, ctx: &RateContext) -> Result<()> {
        ctx.output_dir.create_dir()
    }

    fn consume_event(&mut self, event: Event, _ctx: &RateContext) -> Result<()> {
        self.timestamps.push(event.ts);
        self.last_params = Some(RunParams {
            k: event.k,
            alpha: event.alpha,
        });

        Ok(())
    }

    fn finalize(&mut self, ctx: &RateContext) -> Result<()> {
        let report = self.report(ctx)?;
        let params = self
            .last_params
            .context("No event was read, cannot name the chart")?;

        let layout = ChartLayout::run(ctx.y_max.unwrap_or(DEFAULT_RUN_Y_MAX));
        save_outputs(ctx, OutputSubject::Run(params), &layout, &report)?;

        info!("Results saved in {}.", ctx.output_dir.path().display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, fs::File, path::PathBuf};

    use clap::Parser;

    use super::RunAnalyzer;
    use crate::{
        cli::CLI,
        context::RateContext,
        error::AnalysisError,
        io::{OutputSubject, RateFile},
        rate::report::RunParams,
        trace::reader::CsvEventReader,
        EventSource,
    };

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rpc-rate-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn ctx() -> RateContext {
        RateContext::from(&CLI::parse_from(["rpc-rate", "run", "run.csv"]))
    }

    fn load(data: &str) -> RunAnalyzer {
        let mut run = RunAnalyzer::new();
        let mut src = CsvEventReader::from_reader(data.as_bytes(), "run.csv");
        src.event_loop(&mut run, &ctx()).unwrap();
        run
    }

    #[test]
    fn test_run_series() {
        let run = load("a,0,1,1\nb,0,1,1\nc,1,1,1\nd,2,1,1\ne,2,1,1\nf,2,1,1\ng,4,3,7\n");

        let report = run.report(&ctx()).unwrap();
        let s = &report.series()[0];

        assert_eq!(s.counts, vec![2, 1, 3, 0]);
        assert_eq!(s.rates, vec![2.0, 1.0, 3.0, 0.0]);
        assert_eq!(s.n, None);
    }

    #[test]
    fn test_chart_named_after_last_row() {
        let run = load("a,0,1,2,9\nb,1,5,5,9\nc,2,3,7,9\n");
        let params = run.params().unwrap();

        assert_eq!(params, RunParams { k: 3, alpha: 7 });
        assert_eq!(
            RateFile::Chart(OutputSubject::Run(params)).to_string(),
            "performance-k-3-a-7.png"
        );
    }

    #[test]
    fn test_group_column_is_not_required() {
        let run = load("a,0,1,1\nb,1,1,1,0\n");

        assert!(run.report(&ctx()).is_ok());
    }

    #[test]
    fn test_single_event() {
        let run = load("a,0,1,1\n");

        let err = run.report(&ctx()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::TooFewEvents {
                key: None,
                found: 1
            })
        );
    }

    #[test]
    fn test_group_column_ignored_in_run_mode() {
        let run = load("a,0,3,7,node-a\nb,1,3,7,node-a\nc,2,3,7,-1\n");

        let report = run.report(&ctx()).unwrap();
        assert_eq!(report.series()[0].counts, vec![1, 1]);
        assert_eq!(run.params(), Some(RunParams { k: 3, alpha: 7 }));
    }

    #[test]
    fn test_outputs_written() {
        let dir = scratch_dir("run-outputs");
        let ctx = RateContext::from(&CLI::parse_from([
            "rpc-rate",
            "--output-dir",
            dir.to_str().unwrap(),
            "--json",
            "run",
            "run.csv",
        ]));

        let mut src = CsvEventReader::from_reader(
            "a,0,1,1\nb,0,1,1\nc,1,1,1\nd,2,1,1\ne,2,1,1\nf,2,1,1\ng,4,3,7\n".as_bytes(),
            "run.csv",
        );
        src.process_events(RunAnalyzer::new(), &ctx).unwrap();

        assert!(dir.join("performance-k-3-a-7.png").is_file());

        let report: serde_json::Value =
            serde_json::from_reader(File::open(dir.join("performance-k-3-a-7.json")).unwrap())
                .unwrap();
        assert_eq!(report["events"], 7);
        assert_eq!(report["params"]["k"], 3);
        assert_eq!(report["params"]["alpha"], 7);
        assert_eq!(report["series"][0]["counts"], serde_json::json!([2, 1, 3, 0]));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_report_only_on_request() {
        let dir = scratch_dir("run-chart-only");
        let ctx = RateContext::from(&CLI::parse_from([
            "rpc-rate",
            "--output-dir",
            dir.to_str().unwrap(),
            "run",
            "run.csv",
        ]));

        let data = "a,0,2,5\nb,1,2,5\nc,2,2,5\n";
        let mut src = CsvEventReader::from_reader(data.as_bytes(), "run.csv");
        src.process_events(RunAnalyzer::new(), &ctx).unwrap();

        assert!(dir.join("performance-k-2-a-5.png").is_file());
        assert!(!dir.join("performance-k-2-a-5.json").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
