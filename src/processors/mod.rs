//! Event processors.
//!
//! This module contains the front-end of the rate analyses. Each processor is
//! invoked by a different CLI subcommand.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    context::RateContext,
    io::{OutputSubject, RateFile},
    plot::{self, ChartLayout},
    rate::RateReport,
};

pub mod single_run;
pub mod sweep;

/// Renders the chart of `report` and, if requested, saves the report itself.
fn save_outputs(
    ctx: &RateContext,
    subject: OutputSubject,
    layout: &ChartLayout,
    report: &RateReport,
) -> Result<()> {
    let chart = ctx.output_dir.file_path(&RateFile::Chart(subject));

    plot::render(&chart, layout, report.series())
        .with_context(|| format!("Could not render {}", chart.display()))?;

    info!(path = %chart.display(), "Chart saved");

    if ctx.export_json {
        let f = RateFile::Report(subject);
        let mut w = ctx.output_dir.create_file(&f)?;

        report.write_json(&mut w)?;
        w.flush()?;

        info!(path = %ctx.output_dir.file_path(&f).display(), "Report saved");
    }

    Ok(())
}
