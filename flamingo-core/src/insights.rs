//! Placeholder figures shown alongside real data.
//!
//! Nothing here is a forecast. The "AI insights" are uniformly random
//! numbers and the ownership split is a fixed illustration; front-ends must
//! show [`DISCLAIMER`] wherever these appear.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DISCLAIMER: &str = "Note: AI predictions are simulated for demonstration purposes only. \
This is not financial advice. Past performance does not guarantee future results. \
Always conduct your own research.";

/// Illustrative ownership split (label, percent). Not sourced from any filing.
pub const OWNERSHIP_PLACEHOLDER: [(&str, u8); 3] =
    [("Institutional", 45), ("Retail", 35), ("Insider", 20)];

/// Simulated sentiment and seven-day "forecast".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedInsights {
    /// Percent change, one decimal, in [-3.5, 5.5].
    pub forecast_7d_pct: f64,
    /// In [40, 85].
    pub bullish_pct: u8,
    /// `100 - bullish_pct`.
    pub bearish_pct: u8,
}

impl SimulatedInsights {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bullish_pct: u8 = rng.gen_range(40..=85);
        let forecast: f64 = rng.gen_range(-3.5..5.5);
        Self {
            forecast_7d_pct: (forecast * 10.0).round() / 10.0,
            bullish_pct,
            bearish_pct: 100 - bullish_pct,
        }
    }
}
