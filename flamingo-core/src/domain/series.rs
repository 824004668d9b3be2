//! PriceSeries: ordered bars for one symbol over one lookback period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::PriceBar;
use super::period::LookbackPeriod;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar dates must be strictly increasing: {previous} is followed by {next}")]
    NotIncreasing { previous: NaiveDate, next: NaiveDate },
}

/// Chronologically ordered OHLCV history.
///
/// Invariant: bar dates are strictly increasing (hence unique). `new` checks
/// it; `from_unordered` establishes it for provider data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    period: LookbackPeriod,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(
        symbol: impl Into<String>,
        period: LookbackPeriod,
        bars: Vec<PriceBar>,
    ) -> Result<Self, SeriesError> {
        for w in bars.windows(2) {
            if w[0].date >= w[1].date {
                return Err(SeriesError::NotIncreasing {
                    previous: w[0].date,
                    next: w[1].date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            period,
            bars,
        })
    }

    /// Sort by date and drop duplicate dates, keeping the last bar seen for a date.
    pub fn from_unordered(
        symbol: impl Into<String>,
        period: LookbackPeriod,
        mut bars: Vec<PriceBar>,
    ) -> Self {
        // Stable sort keeps arrival order within a date, so the later duplicate wins.
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            symbol: symbol.into(),
            period,
            bars: deduped,
        }
    }

    /// An empty series: "no data for this selection".
    pub fn empty(symbol: impl Into<String>, period: LookbackPeriod) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn period(&self) -> LookbackPeriod {
        self.period
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Lowest low and highest high across the series, ignoring NaN.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.bars.is_empty() {
            return None;
        }
        let low = self.bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high = self
            .bars
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);
        (low.is_finite() && high.is_finite()).then_some((low, high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100,
        }
    }

    #[test]
    fn new_accepts_increasing_dates() {
        let s = PriceSeries::new("INFY", LookbackPeriod::OneMonth, vec![bar(1, 10.0), bar(4, 11.0)])
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.closes(), vec![10.0, 11.0]);
        assert_eq!(s.last_close(), Some(11.0));
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let err = PriceSeries::new("INFY", LookbackPeriod::OneMonth, vec![bar(1, 10.0), bar(1, 11.0)])
            .unwrap_err();
        assert!(matches!(err, SeriesError::NotIncreasing { .. }));
    }

    #[test]
    fn new_rejects_decreasing_dates() {
        assert!(
            PriceSeries::new("INFY", LookbackPeriod::OneMonth, vec![bar(5, 10.0), bar(4, 11.0)])
                .is_err()
        );
    }

    #[test]
    fn from_unordered_sorts_and_keeps_last_duplicate() {
        let s = PriceSeries::from_unordered(
            "TCS",
            LookbackPeriod::OneMonth,
            vec![bar(5, 50.0), bar(2, 20.0), bar(5, 55.0), bar(3, 30.0)],
        );
        assert_eq!(s.closes(), vec![20.0, 30.0, 55.0]);
        for w in s.bars().windows(2) {
            assert!(w[0].date < w[1].date);
        }
    }

    #[test]
    fn empty_series_has_no_range() {
        let s = PriceSeries::empty("TCS", LookbackPeriod::OneYear);
        assert!(s.is_empty());
        assert_eq!(s.price_range(), None);
        assert_eq!(s.last_close(), None);
    }

    #[test]
    fn price_range_spans_lows_and_highs() {
        let s = PriceSeries::new("TCS", LookbackPeriod::OneMonth, vec![bar(1, 10.0), bar(2, 20.0)])
            .unwrap();
        assert_eq!(s.price_range(), Some((9.0, 21.0)));
    }
}
