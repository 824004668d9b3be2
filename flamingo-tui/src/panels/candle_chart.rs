//! Candle chart panel - OHLC candle rendering
//!
//! Renders candlestick chart using direct buffer writes:
//! - Each candle = 1 terminal column; long histories are bucketed so the
//!   whole period fits (one candle per bucket of consecutive sessions)
//! - Body: block char, green if close >= open, coral if close < open
//! - Wicks: vertical line chars to high/low

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use flamingo_core::domain::PriceBar;

use crate::theme::Theme;

/// One drawn column: a bucket of consecutive sessions merged into OHLCV.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    fn from_bars(bars: &[PriceBar]) -> Option<Candle> {
        let first = bars.first()?;
        let last = bars.last()?;
        Some(Candle {
            first: first.date,
            last: last.date,
            open: first.open,
            high: bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
            low: bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
            close: last.close,
            volume: bars.iter().map(|b| b.volume).sum(),
        })
    }

    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Merge `bars` into at most `columns` candles of near-equal session count.
pub fn bucket_candles(bars: &[PriceBar], columns: usize) -> Vec<Candle> {
    if columns == 0 || bars.is_empty() {
        return Vec::new();
    }
    let per_column = bars.len().div_ceil(columns);
    bars.chunks(per_column).filter_map(Candle::from_bars).collect()
}

/// Map a price to a row in the plot area (0 = top).
pub(crate) fn price_to_y(price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
    if (y_max - y_min).abs() < 1e-9 || plot_height == 0 {
        return 0;
    }
    let frac = (price - y_min) / (y_max - y_min);
    let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
    y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
}

/// Candle chart panel widget
pub struct CandleChart<'a> {
    bars: &'a [PriceBar],
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> CandleChart<'a> {
    pub fn new(bars: &'a [PriceBar], title: &'a str, theme: &'a Theme) -> Self {
        Self { bars, title, theme }
    }
}

impl<'a> Widget for CandleChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.bars.is_empty() {
            Block::default()
                .title(format!(" {} [No Data] ", self.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .style(Style::default().bg(self.theme.background))
                .render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);

        // Left margin for Y labels, bottom row for dates.
        let label_width: u16 = 10;
        let plot_left = inner.x + label_width;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(label_width);
        let plot_height = inner.height.saturating_sub(1);

        let candles = bucket_candles(self.bars, plot_width as usize);
        let up_count = candles.iter().filter(|c| c.is_up()).count();
        let down_count = candles.len() - up_count;
        let title = format!(
            " {} | {} sessions | {} up {} down ",
            self.title,
            self.bars.len(),
            up_count,
            down_count,
        );
        block.title(title).render(area, buf);

        if plot_width == 0 || plot_height == 0 || candles.is_empty() {
            return;
        }

        let y_min = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let y_max = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (label_val, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            let label = format!("{:>9.1}", label_val);
            buf.set_string(inner.x, plot_top + y_pos, &label, Style::default().fg(self.theme.muted));
        }

        for (i, candle) in candles.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }

            let color = if candle.is_up() {
                self.theme.positive
            } else {
                self.theme.negative
            };
            let style = Style::default().fg(color);

            let high_y = price_to_y(candle.high, y_lower, y_upper, plot_height);
            let low_y = price_to_y(candle.low, y_lower, y_upper, plot_height);
            let body_top_y = price_to_y(candle.open.max(candle.close), y_lower, y_upper, plot_height);
            let body_bot_y = price_to_y(candle.open.min(candle.close), y_lower, y_upper, plot_height);

            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "\u{2502}", style); // │
            }
            let body_char = if candle.is_up() { "\u{2588}" } else { "\u{2593}" }; // █ vs ▓
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, body_char, style);
            }
            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "\u{2502}", style);
            }
        }

        // Date axis
        let axis_y = plot_top + plot_height;
        if axis_y < inner.bottom() {
            let muted = Style::default().fg(self.theme.muted);
            if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
                buf.set_string(plot_left, axis_y, first.first.format("%d %b %y").to_string(), muted);
                let right = last.last.format("%d %b %y").to_string();
                let right_x = inner.right().saturating_sub(right.len() as u16);
                if right_x > plot_left + 10 {
                    buf.set_string(right_x, axis_y, right, muted);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{buffer_text, sample_bars};

    #[test]
    fn renders_without_panic() {
        let theme = Theme::default();
        let bars = sample_bars(40);
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        CandleChart::new(&bars, "RELIANCE", &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("RELIANCE | 40 sessions"));
        assert!(text.contains("01 Jan 24"));
    }

    #[test]
    fn empty_bars_say_no_data() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        CandleChart::new(&[], "TCS", &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No Data"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let theme = Theme::default();
        let bars = sample_bars(10);
        for (w, h) in [(1, 1), (5, 3), (12, 2), (11, 4)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            CandleChart::new(&bars, "X", &theme).render(area, &mut buf);
        }
    }

    #[test]
    fn buckets_fit_the_width() {
        let bars = sample_bars(250);
        let candles = bucket_candles(&bars, 60);
        assert!(candles.len() <= 60);
        assert_eq!(candles[0].open, bars[0].open);
        assert_eq!(candles.last().unwrap().close, bars[249].close);
        let volume: u64 = candles.iter().map(|c| c.volume).sum();
        assert_eq!(volume, bars.iter().map(|b| b.volume).sum::<u64>());
    }

    #[test]
    fn short_history_is_one_candle_per_session() {
        let bars = sample_bars(5);
        assert_eq!(bucket_candles(&bars, 60).len(), 5);
        assert!(bucket_candles(&bars, 0).is_empty());
    }

    #[test]
    fn price_maps_top_to_bottom() {
        assert_eq!(price_to_y(110.0, 100.0, 110.0, 11), 0);
        assert_eq!(price_to_y(100.0, 100.0, 110.0, 11), 10);
        assert_eq!(price_to_y(105.0, 100.0, 110.0, 11), 5);
    }
}
