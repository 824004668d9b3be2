//! Dashboard widgets
//!
//! - CandleChart: OHLC candles, bucketed to the panel width
//! - PriceChart: close price as a line or filled area
//! - VolumeBars: traded volume per candle bucket
//! - ReturnsDistribution: histogram with the KDE curve overlaid
//! - MetricCards: headline and secondary figures
//! - OverviewPanel: company description
//! - OwnershipPanel: illustrative shareholding split
//! - InsightsPanel: simulated sentiment with disclaimer
//! - SymbolList: filtered, scrolling symbol picker

pub mod candle_chart;
pub mod insights;
pub mod metric_cards;
pub mod overview;
pub mod ownership;
pub mod price_chart;
pub mod returns_distribution;
pub mod symbol_list;
pub mod volume_bars;

pub use candle_chart::CandleChart;
pub use insights::InsightsPanel;
pub use metric_cards::MetricCards;
pub use overview::OverviewPanel;
pub use ownership::OwnershipPanel;
pub use price_chart::{PriceChart, PriceChartKind};
pub use returns_distribution::ReturnsDistribution;
pub use symbol_list::{scroll_offset, SymbolList};
pub use volume_bars::VolumeBars;
