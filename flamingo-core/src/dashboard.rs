//! Dashboard assembly: one selection in, one immutable snapshot out.
//!
//! Remote failures never escape this module as errors. A failed symbol
//! listing becomes an empty list, and a failed or empty history becomes
//! `None` ("data unavailable"), which front-ends render as a warning.

use serde::{Deserialize, Serialize};

use crate::analytics::{
    compute_returns, default_bin_count, estimate_density_with, histogram, Bandwidth, DensityCurve,
    Histogram, ReturnSeries, DEFAULT_SAMPLE_COUNT,
};
use crate::data::{History, HistorySource, Metadata, SymbolSource};
use crate::domain::{LookbackPeriod, PriceSeries};
use crate::metrics::{secondary_metrics, top_metrics, CompanyOverview, MetricCard};

/// Parameters for the returns-distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    pub density_samples: usize,
    pub histogram_bins: Option<usize>,
    pub bandwidth: Bandwidth,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            density_samples: DEFAULT_SAMPLE_COUNT,
            histogram_bins: None,
            bandwidth: Bandwidth::Scott,
        }
    }
}

/// Everything the dashboard shows for one (symbol, period) selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub symbol: String,
    pub period: LookbackPeriod,
    pub series: PriceSeries,
    pub metadata: Metadata,
    pub top_cards: Vec<MetricCard>,
    pub secondary_cards: Vec<MetricCard>,
    pub overview: Option<CompanyOverview>,
    pub returns: ReturnSeries,
    pub density: DensityCurve,
    pub histogram: Histogram,
}

impl DashboardSnapshot {
    /// Derive every card and chart input from a fetched history. Pure.
    pub fn build(
        symbol: &str,
        period: LookbackPeriod,
        history: History,
        settings: &AnalyticsSettings,
    ) -> Self {
        let History { series, metadata } = history;

        let returns = compute_returns(&series.closes());
        let density =
            estimate_density_with(returns.values(), settings.density_samples, settings.bandwidth);
        let bins = settings
            .histogram_bins
            .unwrap_or_else(|| default_bin_count(returns.len()));
        let histogram = histogram(returns.values(), bins);

        Self {
            symbol: symbol.to_string(),
            period,
            top_cards: top_metrics(&series, &metadata),
            secondary_cards: secondary_metrics(&metadata),
            overview: CompanyOverview::from_metadata(&metadata),
            series,
            metadata,
            returns,
            density,
            histogram,
        }
    }

    pub fn visible_top_cards(&self) -> impl Iterator<Item = &MetricCard> {
        self.top_cards.iter().filter(|c| c.is_visible())
    }

    pub fn visible_secondary_cards(&self) -> impl Iterator<Item = &MetricCard> {
        self.secondary_cards.iter().filter(|c| c.is_visible())
    }
}

/// Fetch and assemble a snapshot; `None` means "data unavailable".
pub fn load_snapshot<H: HistorySource + ?Sized>(
    source: &H,
    symbol: &str,
    period: LookbackPeriod,
    settings: &AnalyticsSettings,
) -> Option<DashboardSnapshot> {
    let history = history_or_empty(source, symbol, period);
    if history.is_empty() {
        return None;
    }
    Some(DashboardSnapshot::build(symbol, period, history, settings))
}

/// History for a selection, or an empty one when the source fails.
pub fn history_or_empty<H: HistorySource + ?Sized>(
    source: &H,
    symbol: &str,
    period: LookbackPeriod,
) -> History {
    match source.fetch_history(symbol, period) {
        Ok(history) => history,
        Err(e) => {
            log::warn!("no {period} data for {symbol} from {}: {e}", source.name());
            History::empty(symbol, period)
        }
    }
}

/// Sorted symbol list, or an empty one when the source fails.
pub fn symbols_or_empty<S: SymbolSource + ?Sized>(source: &S) -> Vec<String> {
    match source.list_symbols() {
        Ok(symbols) => symbols.into_iter().collect(),
        Err(e) => {
            log::warn!("no symbols available from {}: {e}", source.name());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataError, MetaValue};
    use crate::domain::PriceBar;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    struct FixedHistory(Vec<f64>);

    impl HistorySource for FixedHistory {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_history(&self, ticker: &str, period: LookbackPeriod) -> Result<History, DataError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let bars = self
                .0
                .iter()
                .enumerate()
                .map(|(i, &c)| PriceBar {
                    date: start + chrono::Duration::days(i as i64),
                    open: c,
                    high: c * 1.01,
                    low: c * 0.99,
                    close: c,
                    volume: 1_000 + i as u64,
                })
                .collect();
            let mut metadata = Metadata::new();
            metadata.insert("trailingPE".into(), MetaValue::Number(21.0));
            Ok(History {
                series: PriceSeries::new(ticker, period, bars).unwrap(),
                metadata,
            })
        }
    }

    struct Offline;

    impl HistorySource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn fetch_history(&self, _: &str, _: LookbackPeriod) -> Result<History, DataError> {
            Err(DataError::Network("no route to host".into()))
        }
    }

    impl SymbolSource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn list_symbols(&self) -> Result<BTreeSet<String>, DataError> {
            Err(DataError::Network("no route to host".into()))
        }
    }

    #[test]
    fn snapshot_carries_every_panel() {
        let closes = vec![100.0, 102.0, 101.0, 104.0, 103.5, 105.0, 104.0, 106.0];
        let snap = load_snapshot(
            &FixedHistory(closes.clone()),
            "ITC",
            LookbackPeriod::ThreeMonths,
            &AnalyticsSettings::default(),
        )
        .unwrap();

        assert_eq!(snap.symbol, "ITC");
        assert_eq!(snap.series.len(), closes.len());
        assert_eq!(snap.returns.len(), closes.len() - 1);
        assert_eq!(snap.density.len(), 100);
        assert_eq!(snap.histogram.bin_count(), default_bin_count(closes.len() - 1));
        assert_eq!(snap.visible_top_cards().count(), 2); // price + P/E
        assert_eq!(snap.visible_secondary_cards().count(), 0);
        assert!(snap.overview.is_none());
    }

    #[test]
    fn settings_drive_the_distribution() {
        let settings = AnalyticsSettings {
            density_samples: 25,
            histogram_bins: Some(5),
            bandwidth: Bandwidth::Silverman,
        };
        let snap = load_snapshot(
            &FixedHistory(vec![10.0, 11.0, 10.5, 12.0]),
            "ITC",
            LookbackPeriod::OneMonth,
            &settings,
        )
        .unwrap();
        assert_eq!(snap.density.len(), 25);
        assert_eq!(snap.histogram.bin_count(), 5);
    }

    #[test]
    fn single_bar_still_renders_without_distribution() {
        let snap = load_snapshot(
            &FixedHistory(vec![250.0]),
            "ITC",
            LookbackPeriod::OneMonth,
            &AnalyticsSettings::default(),
        )
        .unwrap();
        assert!(snap.returns.is_empty());
        assert!(snap.density.is_empty());
        assert!(snap.histogram.is_empty());
    }

    #[test]
    fn failures_become_unavailable() {
        assert!(load_snapshot(&Offline, "ITC", LookbackPeriod::OneYear, &AnalyticsSettings::default()).is_none());
        assert!(symbols_or_empty(&Offline).is_empty());
    }

    #[test]
    fn empty_history_is_unavailable() {
        assert!(load_snapshot(
            &FixedHistory(vec![]),
            "ITC",
            LookbackPeriod::OneYear,
            &AnalyticsSettings::default()
        )
        .is_none());
    }
}
