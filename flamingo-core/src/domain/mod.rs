//! Domain types for Flamingo

pub mod bar;
pub mod period;
pub mod series;

pub use bar::PriceBar;
pub use period::{LookbackPeriod, ParsePeriodError};
pub use series::{PriceSeries, SeriesError};

/// Symbol type alias
pub type Symbol = String;
