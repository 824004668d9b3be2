//! Close-price chart in line or filled-area form.
//!
//! Line uses ratatui's braille `Chart`; Area fills each column from the
//! close down to the plot floor with direct buffer writes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use flamingo_core::domain::PriceBar;

use super::candle_chart::{bucket_candles, price_to_y};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceChartKind {
    Line,
    Area,
}

pub struct PriceChart<'a> {
    bars: &'a [PriceBar],
    title: &'a str,
    kind: PriceChartKind,
    theme: &'a Theme,
}

impl<'a> PriceChart<'a> {
    pub fn new(bars: &'a [PriceBar], title: &'a str, kind: PriceChartKind, theme: &'a Theme) -> Self {
        Self {
            bars,
            title,
            kind,
            theme,
        }
    }

    fn block(&self) -> Block<'a> {
        let change = match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) if first.close > 0.0 => (last.close - first.close) / first.close,
            _ => 0.0,
        };
        Block::default()
            .title(format!(" {} | {:+.2}% over period ", self.title, change * 100.0))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background))
    }

    fn close_bounds(&self) -> (f64, f64) {
        let lo = self.bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
        let hi = self.bars.iter().map(|b| b.close).fold(f64::NEG_INFINITY, f64::max);
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
        (lo - pad, hi + pad)
    }

    fn render_line(self, area: Rect, buf: &mut Buffer) {
        let (y_min, y_max) = self.close_bounds();
        let data: Vec<(f64, f64)> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| (i as f64, b.close))
            .collect();
        let x_max = data.len().saturating_sub(1) as f64;

        let muted = Style::default().fg(self.theme.muted);
        let first_date = self.bars.first().map(|b| b.date.format("%d %b %y").to_string());
        let last_date = self.bars.last().map(|b| b.date.format("%d %b %y").to_string());

        let dataset = Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(self.theme.accent))
            .graph_type(GraphType::Line)
            .data(&data);

        Chart::new(vec![dataset])
            .block(self.block())
            .x_axis(
                Axis::default()
                    .style(muted)
                    .bounds([0.0, x_max.max(1.0)])
                    .labels(vec![
                        Span::styled(first_date.unwrap_or_default(), muted),
                        Span::styled(last_date.unwrap_or_default(), muted),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .style(muted)
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::styled(format!("{:.1}", y_min), muted),
                        Span::styled(format!("{:.1}", y_max), muted),
                    ]),
            )
            .render(area, buf);
    }

    fn render_area(self, area: Rect, buf: &mut Buffer) {
        let (y_min, y_max) = self.close_bounds();
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let label_width: u16 = 10;
        let plot_left = inner.x + label_width;
        let plot_width = inner.width.saturating_sub(label_width);
        let plot_height = inner.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let muted = Style::default().fg(self.theme.muted);
        buf.set_string(inner.x, inner.y, format!("{:>9.1}", y_max), muted);
        buf.set_string(
            inner.x,
            inner.y + plot_height.saturating_sub(1),
            format!("{:>9.1}", y_min),
            muted,
        );

        let edge = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let fill = Style::default().fg(self.theme.secondary);

        let columns = bucket_candles(self.bars, plot_width as usize);
        for (i, column) in columns.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }
            let top = price_to_y(column.close, y_min, y_max, plot_height);
            buf.set_string(x, inner.y + top, "\u{2584}", edge); // ▄
            for y in (top + 1)..plot_height {
                buf.set_string(x, inner.y + y, "\u{2591}", fill); // ░
            }
        }

        let axis_y = inner.y + plot_height;
        if let (Some(first), Some(last)) = (columns.first(), columns.last()) {
            buf.set_string(plot_left, axis_y, first.first.format("%d %b %y").to_string(), muted);
            let right = last.last.format("%d %b %y").to_string();
            let right_x = inner.right().saturating_sub(right.len() as u16);
            if right_x > plot_left + 10 {
                buf.set_string(right_x, axis_y, right, muted);
            }
        }
    }
}

impl<'a> Widget for PriceChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.bars.is_empty() {
            Block::default()
                .title(format!(" {} [No Data] ", self.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .render(area, buf);
            return;
        }
        match self.kind {
            PriceChartKind::Line => self.render_line(area, buf),
            PriceChartKind::Area => self.render_area(area, buf),
        }
    }
}
