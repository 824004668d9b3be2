//! Help and filter overlays drawn on top of the dashboard.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::theme::Theme;

const HELP: [(&str, &str); 13] = [
    ("j / k, ↑ / ↓", "Move through the symbol list"),
    ("g / G", "First / last symbol"),
    ("/", "Filter symbols (Enter loads, Esc clears)"),
    ("Enter", "Load the highlighted symbol"),
    ("p / P", "Next / previous lookback period"),
    ("1-5", "1mo, 3mo, 6mo, 1y, 5y"),
    ("c", "Cycle chart: candlestick, line, area"),
    ("r", "Reload the dashboard (bypass cache)"),
    ("R", "Reload the symbol list"),
    ("i", "Re-roll the simulated insights"),
    ("Esc", "Clear the filter"),
    ("?", "Toggle this help"),
    ("q, Ctrl+C", "Quit"),
];

pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![Line::from("")];
    for (keys, action) in HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<14}"), Style::default().fg(theme.accent)),
            Span::styled(action, Style::default().fg(theme.text_primary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", theme.muted())));

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .title_style(theme.title())
                .borders(Borders::ALL)
                .border_style(theme.block_border(true))
                .style(Style::default().bg(theme.background)),
        ),
        popup,
    );
}

pub fn render_filter(f: &mut Frame, area: Rect, filter: &str, theme: &Theme) {
    let width = area.width.min(40);
    let popup = Rect::new(area.x, area.bottom().saturating_sub(3), width, 3.min(area.height));
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("/", Style::default().fg(theme.accent)),
            Span::styled(filter.to_string(), Style::default().fg(theme.text_primary)),
            Span::styled("\u{2588}", Style::default().fg(theme.accent)),
        ]))
        .block(
            Block::default()
                .title(" Filter ")
                .borders(Borders::ALL)
                .border_style(theme.block_border(true))
                .style(Style::default().bg(theme.background)),
        ),
        popup,
    );
}
