//! Data sources and caching

pub mod cache;
pub mod metadata;
pub mod nse;
pub mod provider;
pub mod yahoo;

pub use cache::{
    CachedHistorySource, CachedSymbolSource, Clock, ManualClock, SystemClock, TtlCache,
    DEFAULT_HISTORY_TTL, DEFAULT_SYMBOLS_TTL,
};
pub use metadata::{MetaValue, Metadata};
pub use nse::{parse_equity_listing, NseSymbolSource};
pub use provider::{DataError, History, HistorySource, SymbolSource};
pub use yahoo::{parse_chart_response, YahooHistorySource};

use crate::config::DashboardConfig;

/// Build the NSE listing source described by `config`, wrapped in its cache.
pub fn symbol_source(config: &DashboardConfig) -> Result<CachedSymbolSource<NseSymbolSource>, DataError> {
    let source = NseSymbolSource::new(&config.symbols_url, &config.user_agent, config.request_timeout())?;
    Ok(CachedSymbolSource::new(source, config.symbols_ttl()))
}

/// Build the Yahoo history source described by `config`, wrapped in its cache.
pub fn history_source(config: &DashboardConfig) -> Result<CachedHistorySource<YahooHistorySource>, DataError> {
    let source = YahooHistorySource::new(
        &config.chart_base_url,
        &config.quote_summary_base_url,
        &config.exchange_suffix,
        &config.user_agent,
        config.request_timeout(),
    )?;
    Ok(CachedHistorySource::new(source, config.history_ttl()))
}
