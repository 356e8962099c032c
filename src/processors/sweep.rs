//! Parameter sweep analysis.
//!
//! Events are split by group size `n`. Each group gets its own rate curve,
//! normalized to a per-node rate, and all curves share one chart.

use anyhow::Result;
use tracing::info;

use crate::{
    context::RateContext,
    events::Event,
    io::OutputSubject,
    plot::ChartLayout,
    rate::{self, report::RunParams, RateAnalyzer, RateReport},
    EventProcessor,
};

use super::save_outputs;

pub struct SweepAnalyzer {
    events: Vec<Event>,
}

impl SweepAnalyzer {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Groups the consumed events and analyzes every group.
    pub fn report(&self, ctx: &RateContext) -> Result<RateReport> {
        let analyzer = RateAnalyzer::try_from(ctx)?;
        let groups = rate::group(&self.events)?;

        let ns: Vec<u64> = groups.iter().map(|(n, _)| *n).collect();
        info!("Ns = {:?}", ns);

        let params = self.events.last().map(|e| RunParams {
            k: e.k,
            alpha: e.alpha,
        });
        let mut report = RateReport::new(self.events.len(), params, ctx.smoothing);

        for (n, timestamps) in groups {
            let series = analyzer.analyze(&timestamps, Some(n))?;
            report.push(series);
        }

        Ok(report)
    }
}

impl Default for SweepAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RateContext> for SweepAnalyzer {
    fn from(_ctx: &RateContext) -> Self {
        SweepAnalyzer::new()
    }
}

impl EventProcessor for SweepAnalyzer {
    fn init(&mut self, ctx: &RateContext) -> Result<()> {
        ctx.output_dir.create_dir()
    }

    fn consume_event(&mut self, event: Event, _ctx: &RateContext) -> Result<()> {
        self.events.push(event);

        Ok(())
    }

    fn finalize(&mut self, ctx: &RateContext) -> Result<()> {
        let report = self.report(ctx)?;

        save_outputs(ctx, OutputSubject::Sweep, &ChartLayout::sweep(), &report)?;

        info!("Results saved in {}.", ctx.output_dir.path().display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, fs::File};

    use clap::Parser;

    use super::SweepAnalyzer;
    use crate::{
        cli::CLI, context::RateContext, error::AnalysisError, trace::reader::CsvEventReader,
        EventSource,
    };

    fn ctx() -> RateContext {
        RateContext::from(&CLI::parse_from(["rpc-rate", "sweep"]))
    }

    fn load(data: &str) -> SweepAnalyzer {
        let mut sweep = SweepAnalyzer::new();
        let mut src = CsvEventReader::from_reader(data.as_bytes(), "SWEEP.csv");
        src.event_loop(&mut sweep, &ctx()).unwrap();
        sweep
    }

    #[test]
    fn test_interleaved_groups() {
        let sweep = load(
            "0,0,3,7,10\n\
             1,0,3,7,5\n\
             2,0,3,7,10\n\
             3,1,3,7,5\n\
             4,1,3,7,10\n\
             5,2,3,7,5\n\
             6,2,3,7,10\n\
             7,3,3,7,5\n",
        );

        let report = sweep.report(&ctx()).unwrap();
        let series = report.series();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].n, Some(5));
        assert_eq!(series[0].counts, vec![1, 1, 1]);
        assert_eq!(series[0].rates, vec![0.2, 0.2, 0.2]);
        assert_eq!(series[1].n, Some(10));
        assert_eq!(series[1].counts, vec![2, 1]);
        assert_eq!(series[1].rates, vec![0.2, 0.1]);
        for s in series {
            assert_eq!(s.smoothed.len(), s.counts.len());
        }
    }

    #[test]
    fn test_small_group_is_rejected() {
        let sweep = load("0,0,3,7,2\n0,1,3,7,2\n0,5,3,7,4\n");

        let err = sweep.report(&ctx()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::TooFewEvents {
                key: Some(4),
                found: 1
            })
        );
    }

    #[test]
    fn test_missing_group_column() {
        let sweep = load("0,0,3,7,2\n0,1,3,7\n");

        let err = sweep.report(&ctx()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::MissingGroup { line: 2 })
        );
    }

    #[test]
    fn test_outputs_written() {
        let dir = std::env::temp_dir().join(format!("rpc-rate-{}-sweep", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let ctx = RateContext::from(&CLI::parse_from([
            "rpc-rate",
            "--output-dir",
            dir.to_str().unwrap(),
            "--json",
            "sweep",
        ]));

        let data = "0,0,3,7,10\n1,0,3,7,5\n2,1,3,7,10\n3,1,3,7,5\n4,2,3,7,5\n5,3,3,7,5\n";
        let mut src = CsvEventReader::from_reader(data.as_bytes(), "SWEEP.csv");
        src.process_events(SweepAnalyzer::new(), &ctx).unwrap();

        assert!(dir.join("performance-sweep.png").is_file());

        let report: serde_json::Value =
            serde_json::from_reader(File::open(dir.join("performance-sweep.json")).unwrap())
                .unwrap();
        assert_eq!(report["events"], 6);
        assert_eq!(report["series"][0]["n"], 5);
        assert_eq!(report["series"][0]["counts"], serde_json::json!([1, 1, 1]));
        assert_eq!(report["series"][1]["n"], 10);
        assert_eq!(report["series"][1]["counts"], serde_json::json!([1]));

        fs::remove_dir_all(&dir).unwrap();
    }
}
