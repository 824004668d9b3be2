//! Flamingo terminal dashboard for NSE equities.
//!
//! Layout (top to bottom):
//! - Header and selector bar (symbol, lookback period, chart style)
//! - Symbol list beside the dashboard: metric cards, price chart,
//!   company overview, volume, ownership, returns distribution, insights
//! - Status bar
//!
//! All fetching and analytics happen on the worker thread; the main thread
//! only renders [`app::AppState`] and dispatches keys.

pub mod app;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
