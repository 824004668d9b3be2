//! Company overview: name, sector/industry line and the business summary.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use flamingo_core::metrics::CompanyOverview;

use crate::theme::Theme;

pub struct OverviewPanel<'a> {
    overview: Option<&'a CompanyOverview>,
    theme: &'a Theme,
}

impl<'a> OverviewPanel<'a> {
    pub fn new(overview: Option<&'a CompanyOverview>, theme: &'a Theme) -> Self {
        Self { overview, theme }
    }
}

impl<'a> Widget for OverviewPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Company Overview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.surface))
            .style(Style::default().bg(self.theme.background));

        let Some(overview) = self.overview else {
            Paragraph::new(Line::from(Span::styled(
                "No company description available.",
                Style::default().fg(self.theme.muted),
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        let secondary = Style::default().fg(self.theme.text_secondary);
        let mut lines = Vec::new();
        if let Some(name) = &overview.name {
            lines.push(Line::from(Span::styled(
                name.clone(),
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled("Sector: ", secondary),
            Span::styled(overview.sector.clone(), Style::default().fg(self.theme.accent)),
            Span::styled("  Industry: ", secondary),
            Span::styled(overview.industry.clone(), Style::default().fg(self.theme.accent)),
        ]));
        lines.push(Line::from(Span::styled(
            overview.summary.clone(),
            Style::default().fg(self.theme.text_primary),
        )));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{buffer_text, sample_snapshot};

    #[test]
    fn shows_name_sector_and_summary() {
        let theme = Theme::default();
        let snap = sample_snapshot();
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        OverviewPanel::new(snap.overview.as_ref(), &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Reliance Industries Limited"));
        assert!(text.contains("Sector: Energy"));
        assert!(text.contains("Industry: N/A"));
        assert!(text.contains("Refining"));
    }

    #[test]
    fn missing_overview() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        OverviewPanel::new(None, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No company description"));
    }
}
