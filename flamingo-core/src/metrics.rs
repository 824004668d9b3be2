//! Summary cards and company overview, selected from loosely structured metadata.

use serde::{Deserialize, Serialize};

use crate::data::metadata::{number, text, Metadata};
use crate::domain::PriceSeries;

/// How a card value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFormat {
    /// `₹1,234,567.89`
    Currency,
    /// `12.34`, or `N/A` for zero
    Ratio,
    /// fraction × 100 with a `%` sign
    Percent,
}

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: Option<f64>,
    pub format: CardFormat,
}

impl MetricCard {
    fn new(label: &str, value: Option<f64>, format: CardFormat) -> Self {
        Self {
            label: label.to_string(),
            value: value.filter(|v| v.is_finite()),
            format,
        }
    }

    /// Cards without a value are not shown.
    pub fn is_visible(&self) -> bool {
        self.value.is_some()
    }

    pub fn display_value(&self) -> String {
        match self.value {
            None => "N/A".to_string(),
            Some(v) => match self.format {
                CardFormat::Currency => format!("₹{}", group_thousands(v)),
                CardFormat::Ratio if v == 0.0 => "N/A".to_string(),
                CardFormat::Ratio => format!("{v:.2}"),
                CardFormat::Percent => format!("{:.2}%", v * 100.0),
            },
        }
    }
}

/// Current Price, 52W High, P/E Ratio, Market Cap.
pub fn top_metrics(series: &PriceSeries, meta: &Metadata) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Current Price", series.last_close(), CardFormat::Currency),
        MetricCard::new("52W High", number(meta, "fiftyTwoWeekHigh"), CardFormat::Currency),
        MetricCard::new("P/E Ratio", number(meta, "trailingPE"), CardFormat::Ratio),
        MetricCard::new("Market Cap", number(meta, "marketCap"), CardFormat::Currency),
    ]
}

/// Dividend Yield, Beta, EPS.
pub fn secondary_metrics(meta: &Metadata) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Dividend Yield", number(meta, "dividendYield"), CardFormat::Percent),
        MetricCard::new("Beta", number(meta, "beta"), CardFormat::Ratio),
        MetricCard::new("EPS", number(meta, "trailingEps"), CardFormat::Ratio),
    ]
}

/// Business description block; only present when a summary exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub name: Option<String>,
    pub summary: String,
    pub industry: String,
    pub sector: String,
}

impl CompanyOverview {
    pub fn from_metadata(meta: &Metadata) -> Option<Self> {
        let summary = text(meta, "longBusinessSummary")?;
        let name = text(meta, "longName")
            .or_else(|| text(meta, "shortName"))
            .map(str::to_string);
        Some(Self {
            name,
            summary: summary.to_string(),
            industry: text(meta, "industry").unwrap_or("N/A").to_string(),
            sector: text(meta, "sector").unwrap_or("N/A").to_string(),
        })
    }
}

/// Two decimals with comma thousands separators: `1234567.891` → `1,234,567.89`.
pub fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b != b'0' && b != b'.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}
