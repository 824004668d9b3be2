//! Period-over-period simple returns from a close-price series.

use serde::{Deserialize, Serialize};

/// Fractional returns `(c[i] - c[i-1]) / c[i-1]`.
///
/// `gaps` lists the close indices `i` whose return could not be computed
/// (previous close zero, negative or non-finite, or current close negative
/// or non-finite).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    values: Vec<f64>,
    gaps: Vec<usize>,
}

impl ReturnSeries {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_gaps(&self) -> bool {
        !self.gaps.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

}

/// Compute simple returns from chronologically ordered closes.
///
/// Fewer than two closes yields an empty series. Elements with an invalid
/// denominator or a negative close are skipped rather than propagated.
pub fn compute_returns(closes: &[f64]) -> ReturnSeries {
    if closes.len() < 2 {
        return ReturnSeries::default();
    }

    let mut values = Vec::with_capacity(closes.len() - 1);
    let mut gaps = Vec::new();

    for (i, w) in closes.windows(2).enumerate() {
        let (prev, curr) = (w[0], w[1]);
        if !prev.is_finite() || prev <= 0.0 || !curr.is_finite() || curr < 0.0 {
            gaps.push(i + 1);
            continue;
        }
        values.push((curr - prev) / prev);
    }

    if !gaps.is_empty() {
        log::warn!(
            "skipped {} of {} returns with an unusable close (indices {:?})",
            gaps.len(),
            closes.len() - 1,
            gaps
        );
    }

    ReturnSeries { values, gaps }
}
