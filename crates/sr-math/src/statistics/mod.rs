//! Sample statistics.
//!
//! An incremental accumulator for cross-sectional summaries and a rolling
//! standard deviation for trailing-window estimates over daily series.

use sr_core::Real;

/// Incremental statistics accumulator.
///
/// Collects samples one at a time and reports count, mean, unbiased
/// variance, standard deviation, minimum, and maximum.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: usize,
    sum: Real,
    sum_sq: Real,
    min: Real,
    max: Real,
}

impl Statistics {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Adds a sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Number of samples added so far.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean. `None` until at least one sample has been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Real)
        }
    }

    /// Unbiased sample variance. `None` for fewer than two samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum / n;
        let s2 = self.sum_sq / n - m * m;
        // Bessel correction, clamp round-off below zero
        Some((s2 * n / (n - 1.0)).max(0.0))
    }

    /// Sample standard deviation. `None` for fewer than two samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Smallest sample seen. `None` until at least one sample has been added.
    pub fn minimum(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Largest sample seen. `None` until at least one sample has been added.
    pub fn maximum(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Clears the accumulator back to its empty state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Rolling sample standard deviation over a trailing window.
///
/// Entry `t` of the result holds the unbiased standard deviation of
/// `values[t + 1 - window ..= t]`. Positions before the first full window
/// are `None`, as is any position whose window contains a non-finite value.
///
/// Runs in a single pass: sums slide as the window advances, and non-finite
/// entries are counted in and out rather than folded into the sums.
///
/// # Panics
///
/// Panics if `window < 2`; a single sample has no sample deviation.
pub fn rolling_std(values: &[Real], window: usize) -> Vec<Option<Real>> {
    assert!(window >= 2, "window must hold at least two samples");
    let n = values.len();
    let mut out = vec![None; n];
    if n < window {
        return out;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut non_finite = 0usize;

    for (t, &x) in values.iter().enumerate() {
        if x.is_finite() {
            sum += x;
            sum_sq += x * x;
        } else {
            non_finite += 1;
        }
        if t >= window {
            let old = values[t - window];
            if old.is_finite() {
                sum -= old;
                sum_sq -= old * old;
            } else {
                non_finite -= 1;
            }
        }
        if t + 1 >= window && non_finite == 0 {
            let w = window as Real;
            let mean = sum / w;
            let var = ((sum_sq - w * mean * mean) / (w - 1.0)).max(0.0);
            out[t] = Some(var.sqrt());
        }
    }
    out
}
