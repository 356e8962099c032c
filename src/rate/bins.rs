//! Fixed-width time binning.

use crate::error::AnalysisError;

use super::GroupKey;

/// Upper bound on the number of windows of one series.
pub const MAX_BINS: u64 = 1 << 24;

/// Per-window event counts of one timestamp sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bins {
    /// Timestamp of the first event; left edge of the first window.
    pub start: i64,
    /// Timestamp of the last event.
    pub last: i64,
    pub window: i64,
    pub counts: Vec<u64>,
}

impl Bins {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Right edge of the last produced window. Every timestamp below it is
    /// accounted for in `counts`.
    #[cfg(test)]
    fn covered_until(&self) -> i64 {
        self.start + self.counts.len() as i64 * self.window
    }
}

/// Returns the position of the first timestamp smaller than its predecessor.
fn first_decrease(timestamps: &[i64]) -> Option<usize> {
    timestamps
        .windows(2)
        .position(|w| w[1] < w[0])
        .map(|p| p + 1)
}

/// Counts `timestamps` into `window`-wide bins.
///
/// Windows start at the first timestamp and are produced while their right
/// edge stays below `last + 1`. The window holding the last timestamp is
/// therefore never emitted. A single cursor walks the timestamps, so the input
/// must be non-decreasing.
pub fn bin(timestamps: &[i64], window: i64, key: GroupKey) -> Result<Bins, AnalysisError> {
    if window <= 0 {
        return Err(AnalysisError::Config(format!(
            "window width must be positive, got {}",
            window
        )));
    }

    let (first, last) = match timestamps {
        [first, .., last] => (*first, *last),
        _ => {
            return Err(AnalysisError::TooFewEvents {
                key,
                found: timestamps.len(),
            })
        }
    };

    if let Some(position) = first_decrease(timestamps) {
        return Err(AnalysisError::UnorderedTimestamps {
            key,
            position,
            ts: timestamps[position],
        });
    }

    // Right edges first + k * window, k >= 1, stay below last + 1 for
    // k <= (last - first) / window. Computed wide so no edge overflows.
    let n_bins = (last as i128 - first as i128) / window as i128;
    if n_bins > MAX_BINS as i128 {
        return Err(AnalysisError::SpanTooLarge {
            key,
            first,
            last,
            max: MAX_BINS,
        });
    }

    let mut counts = Vec::with_capacity(n_bins as usize);
    let mut next = first as i128;
    let mut cursor = 0;

    for _ in 0..n_bins {
        next += window as i128;
        let mut count = 0;
        while cursor < timestamps.len() && (timestamps[cursor] as i128) < next {
            count += 1;
            cursor += 1;
        }
        counts.push(count);
    }

    Ok(Bins {
        start: first,
        last,
        window,
        counts,
    })
}
