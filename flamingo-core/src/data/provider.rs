//! Data source traits and structured error types.
//!
//! `SymbolSource` and `HistorySource` abstract over the remote listing and
//! price-history services so the cache layer and tests can wrap or replace
//! them. Sources never know about the cache.

use std::collections::BTreeSet;

use thiserror::Error;

use super::metadata::Metadata;
use crate::domain::{LookbackPeriod, PriceSeries};

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl DataError {
    /// Short category label for status lines.
    pub fn category(&self) -> &'static str {
        match self {
            DataError::Network(_) | DataError::HttpStatus { .. } | DataError::Client(_) => "network",
            DataError::ResponseFormatChanged(_) | DataError::Csv(_) => "format",
            DataError::SymbolNotFound { .. } => "symbol",
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            DataError::HttpStatus {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if e.is_decode() {
            DataError::ResponseFormatChanged(e.to_string())
        } else {
            DataError::Network(e.to_string())
        }
    }
}

/// Price history plus descriptive metadata for one symbol and period.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub series: PriceSeries,
    pub metadata: Metadata,
}

impl History {
    /// "No data for this selection".
    pub fn empty(symbol: &str, period: LookbackPeriod) -> Self {
        Self {
            series: PriceSeries::empty(symbol, period),
            metadata: Metadata::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Universe of tradable ticker symbols.
pub trait SymbolSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn list_symbols(&self) -> Result<BTreeSet<String>, DataError>;
}

/// OHLCV history and metadata for one ticker over one lookback period.
pub trait HistorySource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch_history(&self, ticker: &str, period: LookbackPeriod) -> Result<History, DataError>;
}

impl<T: SymbolSource + ?Sized> SymbolSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn list_symbols(&self) -> Result<BTreeSet<String>, DataError> {
        (**self).list_symbols()
    }
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_history(&self, ticker: &str, period: LookbackPeriod) -> Result<History, DataError> {
        (**self).fetch_history(ticker, period)
    }
}

/// Build the blocking HTTP client shared by the remote sources.
pub(crate) fn http_client(
    user_agent: &str,
    timeout: std::time::Duration,
) -> Result<reqwest::blocking::Client, DataError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| DataError::Client(e.to_string()))
}
