//! Flamingo Core: market data sources, returns analytics, dashboard assembly.
//!
//! This crate contains everything the dashboard front-ends share:
//! - Domain types (price bars, price series, lookback periods)
//! - Returns analytics (simple returns, Gaussian KDE, density histogram)
//! - Data sources (NSE symbol listing, Yahoo Finance history + metadata)
//! - An explicit time-boxed cache that wraps any data source
//! - Summary card selection and formatting
//! - Dashboard snapshot assembly with "data unavailable" fallbacks

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod insights;
pub mod metrics;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{AnalyticsSettings, DashboardSnapshot};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker hands across threads is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<analytics::ReturnSeries>();
        require_sync::<analytics::ReturnSeries>();
        require_send::<analytics::DensityCurve>();
        require_sync::<analytics::DensityCurve>();
        require_send::<DashboardSnapshot>();
        require_sync::<DashboardSnapshot>();

        require_send::<data::YahooHistorySource>();
        require_sync::<data::YahooHistorySource>();
        require_send::<data::NseSymbolSource>();
        require_sync::<data::NseSymbolSource>();
        require_send::<data::CachedHistorySource<data::YahooHistorySource>>();
        require_sync::<data::CachedHistorySource<data::YahooHistorySource>>();
        require_send::<data::CachedSymbolSource<data::NseSymbolSource>>();
        require_sync::<data::CachedSymbolSource<data::NseSymbolSource>>();
    }

    /// Analytics never see a data source: the signatures take plain slices.
    #[test]
    fn analytics_take_plain_slices() {
        fn _check(closes: &[f64]) -> analytics::DensityCurve {
            let returns = analytics::compute_returns(closes);
            analytics::estimate_density(returns.values(), 100)
        }
    }
}
