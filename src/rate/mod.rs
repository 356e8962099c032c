//! Rate curve extraction.
//!
//! Turns timestamp sequences into smoothed per-second rate curves. The
//! pipeline for a single sequence is
//!
//! 1. [`bins::bin`]: count events per fixed-width window,
//! 2. [`normalize`]: divide by the group size (sweeps only),
//! 3. [`smooth::smooth`]: lagged exponential smoothing.
//!
//! [`RateAnalyzer`] strings the steps together with the parameters of a
//! [`RateContext`].

use serde::Serialize;

use crate::{context::RateContext, error::AnalysisError, events::Event, utils::Dispatcher};

pub mod bins;
pub mod report;
pub mod smooth;

pub use self::bins::Bins;
pub use self::report::RateReport;

/// Identifies a series. `Some(n)` for a sweep group of size `n`, `None` for
/// the single series of a run.
pub type GroupKey = Option<u64>;

/// Splits events by group size, preserving arrival order inside each group.
/// Groups are returned sorted by size.
pub fn group<'a, I>(events: I) -> Result<Vec<(u64, Vec<i64>)>, AnalysisError>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut groups: Dispatcher<u64, Vec<i64>> = Dispatcher::new();

    for e in events {
        let n = e.group_size()?;
        groups.get_or_default(&n).push(e.ts);
    }

    Ok(groups.into_sorted())
}

/// Per-node rates: every count divided by the group size.
pub fn normalize(counts: &[u64], n: u64) -> Vec<f64> {
    counts.iter().map(|&c| c as f64 / n as f64).collect()
}

/// Rate curve of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: GroupKey,
    pub start: i64,
    /// Timestamp of the last event.
    pub last: i64,
    pub window: i64,
    /// Raw events per window.
    pub counts: Vec<u64>,
    /// Counts after normalization.
    pub rates: Vec<f64>,
    pub smoothed: Vec<f64>,
}

impl RateSeries {
    /// Legend entry of the series.
    pub fn label(&self) -> Option<String> {
        self.n.map(|n| format!("n = {}", n))
    }

    pub fn max_smoothed(&self) -> Option<f64> {
        self.smoothed.iter().copied().reduce(f64::max)
    }
}

/// Bins, normalizes and smooths timestamp sequences.
pub struct RateAnalyzer {
    window: i64,
    smoothing: f64,
}

impl RateAnalyzer {
    pub fn new(window: i64, smoothing: f64) -> Result<Self, AnalysisError> {
        if window <= 0 {
            return Err(AnalysisError::Config(format!(
                "window width must be positive, got {}",
                window
            )));
        }

        if !(0.0..=1.0).contains(&smoothing) {
            return Err(AnalysisError::Config(format!(
                "smoothing factor must lie in [0, 1], got {}",
                smoothing
            )));
        }

        Ok(Self { window, smoothing })
    }

    /// Analyzes `timestamps`. With `key = Some(n)` counts are divided by `n`,
    /// otherwise they are kept as absolute rates.
    pub fn analyze(&self, timestamps: &[i64], key: GroupKey) -> Result<RateSeries, AnalysisError> {
        let bins = bins::bin(timestamps, self.window, key)?;

        let rates = match key {
            Some(n) => normalize(&bins.counts, n),
            None => bins.counts.iter().map(|&c| c as f64).collect(),
        };

        let smoothed = smooth::smooth(&rates, self.smoothing);

        if bins.is_empty() {
            tracing::warn!(
                n = ?key,
                start = bins.start,
                "all events fall in the last window, the rate curve is empty"
            );
        }

        Ok(RateSeries {
            n: key,
            start: bins.start,
            last: bins.last,
            window: bins.window,
            counts: bins.counts,
            rates,
            smoothed,
        })
    }
}

impl TryFrom<&RateContext> for RateAnalyzer {
    type Error = AnalysisError;

    fn try_from(ctx: &RateContext) -> Result<Self, Self::Error> {
        RateAnalyzer::new(ctx.window, ctx.smoothing)
    }
}
