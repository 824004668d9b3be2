//! Row (or column) of bordered metric cards: label over value.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use flamingo_core::metrics::MetricCard;

use crate::theme::Theme;

pub struct MetricCards<'a> {
    cards: Vec<&'a MetricCard>,
    direction: Direction,
    theme: &'a Theme,
}

impl<'a> MetricCards<'a> {
    /// Only visible cards are kept; hidden ones leave no gap.
    pub fn new(cards: impl IntoIterator<Item = &'a MetricCard>, theme: &'a Theme) -> Self {
        Self {
            cards: cards.into_iter().filter(|c| c.is_visible()).collect(),
            direction: Direction::Horizontal,
            theme,
        }
    }

    pub fn vertical(mut self) -> Self {
        self.direction = Direction::Vertical;
        self
    }

    fn render_card(&self, card: &MetricCard, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.surface))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        buf.set_stringn(
            inner.x,
            inner.y,
            &card.label,
            inner.width as usize,
            Style::default().fg(self.theme.text_secondary),
        );
        if inner.height > 1 {
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                card.display_value(),
                inner.width as usize,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl<'a> Widget for MetricCards<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            return;
        }
        let n = self.cards.len() as u32;
        let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
        let cells = Layout::default()
            .direction(self.direction)
            .constraints(constraints)
            .split(area);
        for (card, cell) in self.cards.iter().zip(cells.iter()) {
            self.render_card(card, *cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{buffer_text, sample_snapshot};

    #[test]
    fn top_cards_show_rupee_values() {
        let theme = Theme::default();
        let snap = sample_snapshot();
        let area = Rect::new(0, 0, 100, 4);
        let mut buf = Buffer::empty(area);
        MetricCards::new(&snap.top_cards, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Current Price"));
        assert!(text.contains("52W High"));
        assert!(text.contains("₹3,217.60"));
        assert!(text.contains("28.40"));
    }

    #[test]
    fn hidden_cards_leave_no_gap() {
        let theme = Theme::default();
        let snap = sample_snapshot();
        // Only Beta is present among the secondary metrics.
        let cards = MetricCards::new(&snap.secondary_cards, &theme).vertical();
        assert_eq!(cards.cards.len(), 1);

        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);
        cards.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Beta"));
        assert!(text.contains("0.62"));
        assert!(!text.contains("EPS"));
    }
}
