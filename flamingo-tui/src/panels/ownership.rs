//! Shareholding split. The figures are a fixed illustration, labelled as such.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use flamingo_core::insights::OWNERSHIP_PLACEHOLDER;

use crate::theme::Theme;

pub struct OwnershipPanel<'a> {
    theme: &'a Theme,
}

impl<'a> OwnershipPanel<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl<'a> Widget for OwnershipPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Ownership (illustrative) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.surface))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        let colors = [self.theme.accent, self.theme.secondary, self.theme.warning];
        let label_width: u16 = 14;
        let bar_space = inner.width.saturating_sub(label_width + 5);

        for (row, ((label, pct), color)) in OWNERSHIP_PLACEHOLDER.iter().zip(colors).enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            buf.set_stringn(
                inner.x,
                y,
                format!("{label:<13}"),
                inner.width as usize,
                Style::default().fg(self.theme.text_secondary),
            );
            if bar_space == 0 {
                continue;
            }
            let len = (bar_space as u32 * *pct as u32 / 100) as usize;
            buf.set_string(inner.x + label_width, y, "\u{2588}".repeat(len), Style::default().fg(color));
            buf.set_string(
                inner.x + label_width + len as u16 + 1,
                y,
                format!("{pct}%"),
                Style::default().fg(self.theme.text_primary),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::buffer_text;

    #[test]
    fn lists_every_holder_group() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        OwnershipPanel::new(&theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("illustrative"));
        for (label, pct) in OWNERSHIP_PLACEHOLDER {
            assert!(text.contains(label));
            assert!(text.contains(&format!("{pct}%")));
        }
    }
}
