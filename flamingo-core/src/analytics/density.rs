//! Gaussian kernel density estimate over a return series.
//!
//! The bandwidth is the sample standard deviation scaled by a rule-of-thumb
//! factor. Scott's rule is the default; Silverman's robust rule and a fixed
//! bandwidth are available through [`estimate_density_with`].

use serde::{Deserialize, Serialize};
use statrs::consts::SQRT_2PI;
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::fmt;
use std::str::FromStr;

/// Number of evaluation points used by the dashboard.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Bandwidth selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bandwidth {
    /// `σ · n^(-1/5)`
    #[default]
    Scott,
    /// `0.9 · min(σ, IQR / 1.34) · n^(-1/5)`
    Silverman,
    /// Explicit kernel width.
    Fixed(f64),
}

impl Bandwidth {
    /// Resolve the kernel width for `values` (finite, at least two distinct).
    fn resolve(self, values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let sigma = values.iter().std_dev();
        let scott = sigma * n.powf(-0.2);
        match self {
            Bandwidth::Scott => scott,
            Bandwidth::Silverman => {
                let iqr = Data::new(values.to_vec()).interquartile_range();
                let spread = if iqr > 0.0 { sigma.min(iqr / 1.34) } else { sigma };
                0.9 * spread * n.powf(-0.2)
            }
            Bandwidth::Fixed(h) if h.is_finite() && h > 0.0 => h,
            Bandwidth::Fixed(h) => {
                log::warn!("ignoring unusable fixed bandwidth {h}; using Scott's rule");
                scott
            }
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bandwidth::Scott => f.write_str("scott"),
            Bandwidth::Silverman => f.write_str("silverman"),
            Bandwidth::Fixed(h) => write!(f, "{h}"),
        }
    }
}

impl FromStr for Bandwidth {
    type Err = String;

    /// `scott`, `silverman`, or a positive number for a fixed width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scott" => Ok(Bandwidth::Scott),
            "silverman" => Ok(Bandwidth::Silverman),
            other => match other.parse::<f64>() {
                Ok(h) if h.is_finite() && h > 0.0 => Ok(Bandwidth::Fixed(h)),
                _ => Err(format!(
                    "invalid bandwidth '{s}' (expected scott, silverman or a positive number)"
                )),
            },
        }
    }
}

/// Sampled probability density: `(x, density)` pairs with strictly increasing x.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    points: Vec<(f64, f64)>,
    bandwidth: Option<f64>,
}

impl DensityCurve {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(x, _)| x)
    }

    pub fn densities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, d)| d)
    }

    /// Kernel width used, `None` for an empty curve.
    pub fn bandwidth(&self) -> Option<f64> {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .reduce(|best, p| if p.1 > best.1 { p } else { best })
    }

    /// Trapezoid-rule area under the sampled curve.
    pub fn area(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }
}

/// Estimate the density of `returns` at `sample_count` evenly spaced points
/// spanning `[min, max]`, using Scott's rule.
pub fn estimate_density(returns: &[f64], sample_count: usize) -> DensityCurve {
    estimate_density_with(returns, sample_count, Bandwidth::Scott)
}

/// As [`estimate_density`] with an explicit bandwidth rule.
///
/// Returns an empty curve when `sample_count` is zero, the finite inputs
/// have fewer than two distinct values, or the bandwidth underflows to zero.
/// A range too narrow for `sample_count` distinct points yields fewer points.
pub fn estimate_density_with(
    returns: &[f64],
    sample_count: usize,
    bandwidth: Bandwidth,
) -> DensityCurve {
    let values: Vec<f64> = returns.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() < returns.len() {
        log::warn!(
            "ignoring {} non-finite returns in density estimate",
            returns.len() - values.len()
        );
    }
    if sample_count == 0 || values.len() < 2 {
        return DensityCurve::default();
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return DensityCurve::default();
    }

    let h = bandwidth.resolve(&values);
    if !h.is_finite() || h <= 0.0 {
        return DensityCurve::default();
    }

    let norm = 1.0 / (values.len() as f64 * h * SQRT_2PI);
    let points = linspace(lo, hi, sample_count)
        .into_iter()
        .map(|x| {
            let sum: f64 = values
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / h;
                    (-0.5 * u * u).exp()
                })
                .sum();
            (x, sum * norm)
        })
        .collect();

    DensityCurve {
        points,
        bandwidth: Some(h),
    }
}

/// Evenly spaced points from `lo` to `hi` inclusive; endpoints are exact.
///
/// When `[lo, hi]` holds fewer representable values than `count`, rounding
/// collapses neighbouring steps and only the distinct points are kept, so the
/// result stays strictly increasing with `len <= count`.
fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (count - 1) as f64;
            let mut xs: Vec<f64> = (0..count).map(|i| (lo + step * i as f64).min(hi)).collect();
            xs[count - 1] = hi;
            xs.dedup_by(|next, prev| *next <= *prev);
            xs
        }
    }
}
