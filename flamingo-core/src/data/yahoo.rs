//! Yahoo Finance history provider.
//!
//! Daily OHLCV comes from the v8 chart API (`range={period}&interval=1d`);
//! descriptive metadata is merged from the chart `meta` block and the
//! quoteSummary modules. A metadata failure degrades to the chart-meta
//! subset and never fails the history fetch.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use super::metadata::{merge_object, parse_quote_summary, Metadata};
use super::provider::{http_client, DataError, History, HistorySource};
use crate::domain::{LookbackPeriod, PriceBar, PriceSeries};

pub const DEFAULT_CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_QUOTE_SUMMARY_BASE_URL: &str =
    "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
pub const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,assetProfile";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: serde_json::Map<String, Value>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance history provider for one exchange.
pub struct YahooHistorySource {
    client: reqwest::blocking::Client,
    chart_base_url: String,
    quote_summary_base_url: String,
    exchange_suffix: String,
}

impl YahooHistorySource {
    pub fn new(
        chart_base_url: impl Into<String>,
        quote_summary_base_url: impl Into<String>,
        exchange_suffix: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: http_client(user_agent, timeout)?,
            chart_base_url: chart_base_url.into(),
            quote_summary_base_url: quote_summary_base_url.into(),
            exchange_suffix: exchange_suffix.into(),
        })
    }

    /// Exchange-qualified Yahoo symbol. Already-qualified tickers (`X.BO`)
    /// and indices (`^NSEI`) pass through unchanged.
    pub fn yahoo_symbol(&self, ticker: &str) -> String {
        if ticker.contains('.') || ticker.starts_with('^') {
            ticker.to_string()
        } else {
            format!("{ticker}{}", self.exchange_suffix)
        }
    }

    fn chart_url(&self, yahoo_symbol: &str, period: LookbackPeriod) -> String {
        format!(
            "{}/{yahoo_symbol}?range={}&interval=1d&includeAdjustedClose=true",
            self.chart_base_url.trim_end_matches('/'),
            period.code()
        )
    }

    fn quote_summary_url(&self, yahoo_symbol: &str) -> String {
        format!(
            "{}/{yahoo_symbol}?modules={QUOTE_SUMMARY_MODULES}",
            self.quote_summary_base_url.trim_end_matches('/')
        )
    }

    fn get_json(&self, url: &str) -> Result<reqwest::blocking::Response, DataError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // Yahoo answers 404 with a JSON error body for unknown symbols.
            return Ok(resp);
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }

    fn fetch_quote_summary(&self, yahoo_symbol: &str) -> Result<Metadata, DataError> {
        let url = self.quote_summary_url(yahoo_symbol);
        let payload: Value = self.get_json(&url)?.json()?;
        Ok(parse_quote_summary(&payload))
    }
}

impl HistorySource for YahooHistorySource {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_history(&self, ticker: &str, period: LookbackPeriod) -> Result<History, DataError> {
        let yahoo_symbol = self.yahoo_symbol(ticker);
        log::debug!("fetching {period} history for {yahoo_symbol}");

        let body = self.get_json(&self.chart_url(&yahoo_symbol, period))?.text()?;
        let History { series, mut metadata } = parse_chart_response(ticker, period, &body)?;

        match self.fetch_quote_summary(&yahoo_symbol) {
            Ok(summary) => {
                for (k, v) in summary {
                    metadata.insert(k, v);
                }
            }
            Err(e) => log::warn!("metadata unavailable for {yahoo_symbol}: {e}"),
        }

        log::debug!(
            "{yahoo_symbol}: {} bars, {} metadata fields",
            series.len(),
            metadata.len()
        );
        Ok(History { series, metadata })
    }
}

/// Parse a chart API body into a normalised series plus the chart `meta` fields.
///
/// Rows whose OHLCV are all null (holidays) and rows without a close are
/// dropped; bars are sorted and de-duplicated by date.
pub fn parse_chart_response(
    ticker: &str,
    period: LookbackPeriod,
    body: &str,
) -> Result<History, DataError> {
    let resp: ChartResponse = serde_json::from_str(body).map_err(|e| {
        DataError::ResponseFormatChanged(format!("failed to parse chart for {ticker}: {e}"))
    })?;

    let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
        Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
            symbol: ticker.to_string(),
        },
        Some(err) => DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description)),
        None => DataError::ResponseFormatChanged("empty result with no error".into()),
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

    let mut metadata = Metadata::new();
    merge_object(&mut metadata, &data.meta);

    // Exchange-local calendar date: shift by the reported GMT offset.
    let gmt_offset = data.meta.get("gmtoffset").and_then(Value::as_i64).unwrap_or(0);

    let timestamps = data.timestamp.ok_or_else(|| DataError::SymbolNotFound {
        symbol: ticker.to_string(),
    })?;

    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + gmt_offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        let Some(close) = close else {
            if open.is_some() || high.is_some() || low.is_some() || volume.is_some() {
                dropped += 1;
            }
            continue;
        };

        bars.push(PriceBar {
            date,
            open: open.unwrap_or(close),
            high: high.unwrap_or(close),
            low: low.unwrap_or(close),
            close,
            volume: volume.unwrap_or(0),
        });
    }

    if dropped > 0 {
        log::warn!("{ticker}: dropped {dropped} bars without a close price");
    }
    if bars.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: ticker.to_string(),
        });
    }

    Ok(History {
        series: PriceSeries::from_unordered(ticker, period, bars),
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metadata::{number, text};
    use chrono::NaiveDate;

    // 2024-01-01 .. 2024-01-04, 09:15 IST (03:45 UTC)
    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "INR",
                    "symbol": "RELIANCE.NS",
                    "regularMarketPrice": 2589.6,
                    "fiftyTwoWeekHigh": 2630.0,
                    "gmtoffset": 19800
                },
                "timestamp": [1704080700, 1704167100, 1704253500, 1704339900],
                "indicators": {
                    "quote": [{
                        "open":   [2590.0, null, 2570.0, 2575.0],
                        "high":   [2610.0, null, 2590.0, 2600.0],
                        "low":    [2580.0, null, 2560.0, 2570.0],
                        "close":  [2600.0, null, 2580.0, 2589.6],
                        "volume": [5100000, null, 4800000, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    fn provider() -> YahooHistorySource {
        YahooHistorySource::new(
            DEFAULT_CHART_BASE_URL,
            DEFAULT_QUOTE_SUMMARY_BASE_URL,
            ".NS",
            "test-agent",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn parses_bars_and_skips_holidays() {
        let h = parse_chart_response("RELIANCE", LookbackPeriod::OneMonth, CHART).unwrap();
        assert_eq!(h.series.len(), 3);
        assert_eq!(h.series.symbol(), "RELIANCE");
        assert_eq!(
            h.series.first_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(h.series.closes(), vec![2600.0, 2580.0, 2589.6]);
        // missing volume becomes zero
        assert_eq!(h.series.bars()[2].volume, 0);
    }

    #[test]
    fn chart_meta_becomes_metadata() {
        let h = parse_chart_response("RELIANCE", LookbackPeriod::OneMonth, CHART).unwrap();
        assert_eq!(number(&h.metadata, "fiftyTwoWeekHigh"), Some(2630.0));
        assert_eq!(text(&h.metadata, "currency"), Some("INR"));
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("NOPE", LookbackPeriod::OneYear, body).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn other_errors_are_format_errors() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid range"}}}"#;
        let err = parse_chart_response("X", LookbackPeriod::OneYear, body).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn garbage_body_is_a_format_error() {
        let err = parse_chart_response("X", LookbackPeriod::OneYear, "<html>").unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn missing_timestamps_means_no_data() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let err = parse_chart_response("X", LookbackPeriod::OneYear, body).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn duplicate_timestamps_are_collapsed() {
        let body = r#"{"chart":{"result":[{"meta":{},
            "timestamp":[1704080700, 1704080700, 1704167100],
            "indicators":{"quote":[{"open":[1,1,2],"high":[1,1,2],"low":[1,1,2],"close":[1.0,1.5,2.0],"volume":[1,1,1]}]}}],"error":null}}"#;
        let h = parse_chart_response("X", LookbackPeriod::OneMonth, body).unwrap();
        assert_eq!(h.series.closes(), vec![1.5, 2.0]);
    }

    #[test]
    fn symbols_get_the_exchange_suffix() {
        let p = provider();
        assert_eq!(p.yahoo_symbol("TCS"), "TCS.NS");
        assert_eq!(p.yahoo_symbol("TCS.BO"), "TCS.BO");
        assert_eq!(p.yahoo_symbol("^NSEI"), "^NSEI");
    }

    #[test]
    fn urls_carry_range_and_modules() {
        let p = provider();
        let url = p.chart_url("TCS.NS", LookbackPeriod::SixMonths);
        assert!(url.ends_with("/TCS.NS?range=6mo&interval=1d&includeAdjustedClose=true"));
        assert!(p.quote_summary_url("TCS.NS").contains("modules=price,summaryDetail"));
    }
}
