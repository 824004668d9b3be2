//! Traded volume as eighth-block bars, one column per candle bucket.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use flamingo_core::domain::PriceBar;

use super::candle_chart::bucket_candles;
use crate::theme::Theme;

const EIGHTHS: [&str; 8] = [
    "\u{2581}", "\u{2582}", "\u{2583}", "\u{2584}", "\u{2585}", "\u{2586}", "\u{2587}", "\u{2588}",
];

/// Compact volume: `1.23Cr`, `4.50L`, `12.3K` (Indian units).
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if v >= 1e7 {
        format!("{:.2}Cr", v / 1e7)
    } else if v >= 1e5 {
        format!("{:.2}L", v / 1e5)
    } else if v >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        volume.to_string()
    }
}

pub struct VolumeBars<'a> {
    bars: &'a [PriceBar],
    theme: &'a Theme,
}

impl<'a> VolumeBars<'a> {
    pub fn new(bars: &'a [PriceBar], theme: &'a Theme) -> Self {
        Self { bars, theme }
    }
}

impl<'a> Widget for VolumeBars<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Volume ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.surface))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        let plot_height = inner.height.saturating_sub(1);
        if self.bars.is_empty() || inner.width == 0 || plot_height == 0 {
            return;
        }

        let columns = bucket_candles(self.bars, inner.width as usize);
        let max_volume = columns.iter().map(|c| c.volume).max().unwrap_or(0);
        if max_volume == 0 {
            buf.set_string(inner.x, inner.y, "No volume", Style::default().fg(self.theme.muted));
            return;
        }

        let cells_total = plot_height as u32 * 8;
        for (i, column) in columns.iter().enumerate() {
            let x = inner.x + i as u16;
            if x >= inner.right() {
                break;
            }
            let style = Style::default().fg(if column.is_up() {
                self.theme.secondary
            } else {
                self.theme.negative
            });
            let eighths = ((column.volume as f64 / max_volume as f64) * cells_total as f64).round() as u32;
            let full = (eighths / 8) as u16;
            let rem = (eighths % 8) as usize;

            let floor = inner.y + plot_height - 1;
            for h in 0..full.min(plot_height) {
                buf.set_string(x, floor - h, EIGHTHS[7], style);
            }
            if rem > 0 && full < plot_height {
                buf.set_string(x, floor - full, EIGHTHS[rem - 1], style);
            }
        }

        let label = format!("max {}", format_volume(max_volume));
        buf.set_string(
            inner.x,
            inner.y + plot_height,
            label,
            Style::default().fg(self.theme.muted),
        );
    }
}
