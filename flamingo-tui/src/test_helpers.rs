//! Test helpers for building snapshots and reading rendered buffers

use chrono::NaiveDate;
use ratatui::buffer::Buffer;

use flamingo_core::data::{History, MetaValue, Metadata};
use flamingo_core::domain::{LookbackPeriod, PriceBar, PriceSeries};
use flamingo_core::{AnalyticsSettings, DashboardSnapshot};

pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            content.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
        }
        content.push('\n');
    }
    content
}

pub fn sample_bars(n: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let close = 2_900.0 + (i as f64 * 0.4).sin() * 60.0 + i as f64;
            let open = if i % 3 == 0 { close + 12.0 } else { close - 10.0 };
            PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 15.0,
                low: open.min(close) - 15.0,
                close,
                volume: 4_000_000 + (i as u64 * 37_000) % 2_500_000,
            }
        })
        .collect()
}

pub fn sample_metadata() -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("fiftyTwoWeekHigh".into(), MetaValue::Number(3_217.6));
    meta.insert("trailingPE".into(), MetaValue::Number(28.4));
    meta.insert("marketCap".into(), MetaValue::Number(19_800_000_000_000.0));
    meta.insert("beta".into(), MetaValue::Number(0.62));
    meta.insert("longName".into(), MetaValue::Text("Reliance Industries Limited".into()));
    meta.insert("sector".into(), MetaValue::Text("Energy".into()));
    meta.insert(
        "longBusinessSummary".into(),
        MetaValue::Text("Refining, petrochemicals, retail and digital services.".into()),
    );
    meta
}

pub fn sample_snapshot() -> DashboardSnapshot {
    let history = History {
        series: PriceSeries::new("RELIANCE", LookbackPeriod::ThreeMonths, sample_bars(60)).unwrap(),
        metadata: sample_metadata(),
    };
    DashboardSnapshot::build(
        "RELIANCE",
        LookbackPeriod::ThreeMonths,
        history,
        &AnalyticsSettings::default(),
    )
}
