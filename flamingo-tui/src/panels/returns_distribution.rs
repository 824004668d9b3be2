//! Returns distribution - histogram bars with the KDE curve on top
//!
//! Both layers share one x range (the returns' min..max) and one y scale
//! (the larger of the tallest bin and the curve's peak), so the curve sits
//! on the bars the way a density overlay should.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use flamingo_core::analytics::{DensityCurve, Histogram};

use crate::theme::Theme;

/// Linear interpolation of the curve at `x`; `None` outside its range.
pub fn density_at(curve: &DensityCurve, x: f64) -> Option<f64> {
    let points = curve.points();
    let first = points.first()?;
    let last = points.last()?;
    if x < first.0 || x > last.0 {
        return None;
    }
    let idx = points.partition_point(|&(px, _)| px < x);
    if idx == 0 {
        return Some(first.1);
    }
    let (x0, y0) = points[idx - 1];
    let (x1, y1) = points.get(idx).copied().unwrap_or((x0, y0));
    if x1 <= x0 {
        return Some(y0);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

pub struct ReturnsDistribution<'a> {
    histogram: &'a Histogram,
    density: &'a DensityCurve,
    theme: &'a Theme,
}

impl<'a> ReturnsDistribution<'a> {
    pub fn new(histogram: &'a Histogram, density: &'a DensityCurve, theme: &'a Theme) -> Self {
        Self {
            histogram,
            density,
            theme,
        }
    }

    fn x_range(&self) -> Option<(f64, f64)> {
        if let (Some(first), Some(last)) = (self.density.points().first(), self.density.points().last()) {
            return Some((first.0, last.0));
        }
        if !self.histogram.is_empty() {
            let lo = self.histogram.lo;
            return Some((lo, lo + self.histogram.width * self.histogram.bin_count() as f64));
        }
        None
    }
}

impl<'a> Widget for ReturnsDistribution<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.density.bandwidth() {
            Some(h) => format!(" Returns Distribution | KDE h={:.4} ", h),
            None => " Returns Distribution ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.surface))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let Some((lo, hi)) = self.x_range() else {
            buf.set_string(
                inner.x,
                inner.y,
                "Not enough price movement",
                Style::default().fg(self.theme.muted),
            );
            return;
        };

        let plot_height = inner.height.saturating_sub(1);
        let plot_width = inner.width;
        if plot_width < 2 || plot_height == 0 || hi <= lo {
            return;
        }

        let peak = self.density.peak().map(|(_, d)| d).unwrap_or(0.0);
        let y_max = self.histogram.max_density().max(peak);
        if y_max <= 0.0 {
            return;
        }

        let col_value = |col: u16| lo + (hi - lo) * (col as f64 + 0.5) / plot_width as f64;
        let to_rows = |d: f64| ((d / y_max) * plot_height as f64).round() as u16;
        let floor = inner.y + plot_height - 1;

        // Histogram bars
        let bar_style = Style::default().fg(self.theme.secondary);
        if !self.histogram.is_empty() {
            for col in 0..plot_width {
                let v = col_value(col);
                let bin = (((v - self.histogram.lo) / self.histogram.width) as usize)
                    .min(self.histogram.bin_count() - 1);
                let rows = to_rows(self.histogram.densities[bin]).min(plot_height);
                for h in 0..rows {
                    buf.set_string(inner.x + col, floor - h, "\u{2592}", bar_style); // ▒
                }
            }
        }

        // KDE curve
        let curve_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        for col in 0..plot_width {
            if let Some(d) = density_at(self.density, col_value(col)) {
                let rows = to_rows(d).clamp(1, plot_height);
                buf.set_string(inner.x + col, floor - (rows - 1), "\u{2022}", curve_style); // •
            }
        }

        // Axis labels (percent returns)
        let muted = Style::default().fg(self.theme.muted);
        let axis_y = inner.y + plot_height;
        let left = format!("{:+.2}%", lo * 100.0);
        let right = format!("{:+.2}%", hi * 100.0);
        buf.set_string(inner.x, axis_y, &left, muted);
        let right_x = inner.right().saturating_sub(right.len() as u16);
        if right_x > inner.x + left.len() as u16 {
            buf.set_string(right_x, axis_y, &right, muted);
        }
    }
}
