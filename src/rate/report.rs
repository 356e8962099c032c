//! Rate analysis output data definitions.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::RateSeries;

/// Run parameters read from the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunParams {
    pub k: i64,
    pub alpha: i64,
}

#[derive(Debug, Serialize)]
pub struct RateReport {
    /// Total number of events read.
    events: usize,

    /// Parameters of the last event read.
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<RunParams>,

    /// Smoothing factor applied to every series.
    smoothing: f64,

    /// One entry per group, sorted by group size. Runs hold a single entry.
    series: Vec<RateSeries>,
}

impl RateReport {
    pub fn new(events: usize, params: Option<RunParams>, smoothing: f64) -> Self {
        Self {
            events,
            params,
            smoothing,
            series: Vec::new(),
        }
    }

    pub fn push(&mut self, series: RateSeries) {
        self.series.push(series)
    }

    pub fn series(&self) -> &[RateSeries] {
        &self.series
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Could not serialize rate report")
    }
}
