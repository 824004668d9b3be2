//! Returns analytics: simple returns, kernel density estimate, density histogram.
//!
//! Everything here is a pure function over slices. Degenerate input never
//! fails: it yields an empty result, and per-element anomalies are skipped
//! and logged as data-quality notes.

pub mod density;
pub mod histogram;
pub mod returns;

pub use density::{estimate_density, estimate_density_with, Bandwidth, DensityCurve, DEFAULT_SAMPLE_COUNT};
pub use histogram::{default_bin_count, histogram, Histogram};
pub use returns::{compute_returns, ReturnSeries};
