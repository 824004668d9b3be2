//! "AI insights" box: simulated figures plus the mandatory disclaimer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use flamingo_core::insights::{SimulatedInsights, DISCLAIMER};

use crate::theme::Theme;

const GAUGE_WIDTH: usize = 20;

pub struct InsightsPanel<'a> {
    insights: &'a SimulatedInsights,
    theme: &'a Theme,
}

impl<'a> InsightsPanel<'a> {
    pub fn new(insights: &'a SimulatedInsights, theme: &'a Theme) -> Self {
        Self { insights, theme }
    }
}

impl<'a> Widget for InsightsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" AI Insights (simulated) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning))
            .style(Style::default().bg(self.theme.background));

        let s = self.insights;
        let secondary = Style::default().fg(self.theme.text_secondary);
        let bull_cells = GAUGE_WIDTH * s.bullish_pct as usize / 100;

        let lines = vec![
            Line::from(vec![
                Span::styled("7-day forecast: ", secondary),
                Span::styled(
                    format!("{:+.1}%", s.forecast_7d_pct),
                    Style::default()
                        .fg(self.theme.change_color(s.forecast_7d_pct))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Sentiment: ", secondary),
                Span::styled(
                    "\u{2588}".repeat(bull_cells),
                    Style::default().fg(self.theme.positive),
                ),
                Span::styled(
                    "\u{2588}".repeat(GAUGE_WIDTH - bull_cells),
                    Style::default().fg(self.theme.negative),
                ),
                Span::styled(
                    format!(" {}% bullish / {}% bearish", s.bullish_pct, s.bearish_pct),
                    secondary,
                ),
            ]),
            Line::from(Span::styled(
                DISCLAIMER,
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::buffer_text;

    #[test]
    fn shows_figures_and_disclaimer() {
        let theme = Theme::default();
        let insights = SimulatedInsights {
            forecast_7d_pct: -1.4,
            bullish_pct: 62,
            bearish_pct: 38,
        };
        let area = Rect::new(0, 0, 120, 6);
        let mut buf = Buffer::empty(area);
        InsightsPanel::new(&insights, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("-1.4%"));
        assert!(text.contains("62% bullish / 38% bearish"));
        assert!(text.contains("simulated for demonstration purposes"));

        let (y, line) = text
            .lines()
            .enumerate()
            .find(|(_, l)| l.contains("-1.4%"))
            .unwrap();
        let x = line[..line.find("-1.4%").unwrap()].chars().count();
        let cell = buf.cell((x as u16, y as u16)).unwrap();
        assert_eq!(cell.fg, theme.negative);
    }
}
