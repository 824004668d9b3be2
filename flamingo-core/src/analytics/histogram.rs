//! Probability-density histogram, drawn underneath the KDE curve.

use serde::{Deserialize, Serialize};

/// Equal-width bins over `[min, max]` with densities normalised so that
/// `Σ density · width == 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub lo: f64,
    pub width: f64,
    pub counts: Vec<usize>,
    pub densities: Vec<f64>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Left and right edge of bin `i`.
    pub fn bin_edges(&self, i: usize) -> (f64, f64) {
        let left = self.lo + self.width * i as f64;
        (left, left + self.width)
    }

    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }
}

/// Sturges' rule: `ceil(log2 n) + 1`, at least one bin.
pub fn default_bin_count(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Bin the finite values of `returns` into `bins` equal-width bins.
///
/// Empty input, `bins == 0`, or a zero range gives an empty histogram.
pub fn histogram(returns: &[f64], bins: usize) -> Histogram {
    let values: Vec<f64> = returns.iter().copied().filter(|v| v.is_finite()).collect();
    if bins == 0 || values.is_empty() {
        return Histogram::default();
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return Histogram::default();
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &values {
        // The maximum lands exactly on the right edge; fold it into the last bin.
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let total = values.len() as f64;
    let densities = counts.iter().map(|&c| c as f64 / (total * width)).collect();

    Histogram {
        lo,
        width,
        counts,
        densities,
    }
}
