//! NSE equity listing: the universe of tradable symbols.

use std::collections::BTreeSet;
use std::time::Duration;

use super::provider::{http_client, DataError, SymbolSource};

pub const DEFAULT_LISTING_URL: &str = "https://archives.nseindia.com/content/equities/EQUITY_L.csv";

/// Downloads `EQUITY_L.csv` and extracts its `SYMBOL` column.
pub struct NseSymbolSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl NseSymbolSource {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self, DataError> {
        Ok(Self {
            client: http_client(user_agent, timeout)?,
            url: url.into(),
        })
    }
}

impl SymbolSource for NseSymbolSource {
    fn name(&self) -> &str {
        "nse_equity_listing"
    }

    fn list_symbols(&self) -> Result<BTreeSet<String>, DataError> {
        log::debug!("fetching symbol listing from {}", self.url);
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = resp.text()?;
        let symbols = parse_equity_listing(&body)?;
        log::info!("loaded {} symbols from {}", symbols.len(), self.name());
        Ok(symbols)
    }
}

/// Parse the listing CSV. Header names are matched after trimming, since the
/// NSE file pads some of them with spaces.
pub fn parse_equity_listing(csv_text: &str) -> Result<BTreeSet<String>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("SYMBOL"))
        .ok_or_else(|| DataError::ResponseFormatChanged("listing has no SYMBOL column".into()))?;

    let mut symbols = BTreeSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(sym) = record.get(column).filter(|s| !s.is_empty()) {
            symbols.insert(sym.to_string());
        }
    }
    Ok(symbols)
}
