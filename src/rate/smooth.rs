//! Exponential smoothing of rate series.

/// Default weight given to the previous raw sample.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Exponential moving average lagging its input by one sample.
///
/// The first sample is passed through. Each following output mixes the
/// *previous* raw sample with the previous output:
/// `s[i] = factor * x[i-1] + (1 - factor) * s[i-1]`.
///
/// NOTE: the lag shifts the curve one window to the right compared to a
/// textbook EMA. Published plots were produced this way, keep it.
pub struct LaggedEma {
    factor: f64,
    state: Option<(f64, f64)>,
}

impl LaggedEma {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            state: None,
        }
    }

    /// Feeds the next raw sample and returns the smoothed value for its index.
    pub fn update(&mut self, raw: f64) -> f64 {
        let smoothed = match self.state {
            None => raw,
            Some((prev_raw, prev_smoothed)) => {
                self.factor * prev_raw + (1.0 - self.factor) * prev_smoothed
            }
        };

        self.state = Some((raw, smoothed));

        smoothed
    }
}

/// Smooths a whole series. The output has the same length as the input.
pub fn smooth(values: &[f64], factor: f64) -> Vec<f64> {
    let mut ema = LaggedEma::new(factor);
    let ret: Vec<f64> = values.iter().map(|&v| ema.update(v)).collect();

    debug_assert_eq!(ret.len(), values.len());

    ret
}
