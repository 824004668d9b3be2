//! Selector bar: current symbol, period tabs and chart style.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use flamingo_core::domain::LookbackPeriod;

use crate::app::{AppState, ChartStyle};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Paragraph::new(selector_line(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.block_border(false)),
    ), area);
}

fn selector_line(app: &AppState) -> Line<'static> {
    let theme = &app.theme;
    let label = Style::default().fg(theme.text_secondary);
    let symbol = app
        .current_selection()
        .map(|(s, _)| s.to_string())
        .or_else(|| app.highlighted_symbol().map(str::to_string))
        .unwrap_or_else(|| "-".to_string());

    let mut spans = vec![
        Span::styled(" Symbol ", label),
        Span::styled(
            symbol,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Period ", label),
    ];
    for period in LookbackPeriod::ALL {
        let style = if period == app.period {
            theme.highlight()
        } else {
            theme.muted()
        };
        spans.push(Span::styled(format!(" {period} "), style));
    }
    spans.push(Span::styled("   Chart ", label));
    for style_choice in ChartStyle::ALL {
        let style = if style_choice == app.chart_style {
            theme.highlight()
        } else {
            theme.muted()
        };
        spans.push(Span::styled(format!(" {} ", style_choice.label()), style));
    }
    Line::from(spans)
}
