//! Scrolling symbol list with the active filter in its title.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::theme::Theme;

pub struct SymbolList<'a> {
    symbols: &'a [&'a str],
    cursor: usize,
    filter: &'a str,
    loaded: bool,
    theme: &'a Theme,
}

impl<'a> SymbolList<'a> {
    pub fn new(
        symbols: &'a [&'a str],
        cursor: usize,
        filter: &'a str,
        loaded: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            symbols,
            cursor,
            filter,
            loaded,
            theme,
        }
    }
}

/// First visible row so that `cursor` stays inside a window of `height` rows.
pub fn scroll_offset(cursor: usize, height: usize, total: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    let half = height / 2;
    cursor.saturating_sub(half).min(total - height)
}

impl<'a> Widget for SymbolList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.filter.is_empty() {
            format!(" Symbols ({}) ", self.symbols.len())
        } else {
            format!(" /{} ({}) ", self.filter, self.symbols.len())
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.block_border(true))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        if self.symbols.is_empty() {
            let msg = match (self.loaded, self.filter.is_empty()) {
                (false, _) => "Loading…",
                (true, true) => "No symbols",
                (true, false) => "No match",
            };
            buf.set_stringn(inner.x, inner.y, msg, inner.width as usize, self.theme.muted());
            return;
        }

        let height = inner.height as usize;
        let offset = scroll_offset(self.cursor, height, self.symbols.len());
        for (row, symbol) in self.symbols.iter().skip(offset).take(height).enumerate() {
            let idx = offset + row;
            let style = if idx == self.cursor {
                self.theme.highlight()
            } else {
                self.theme.text()
            };
            let text = format!("{:<width$}", symbol, width = inner.width as usize);
            buf.set_stringn(inner.x, inner.y + row as u16, text, inner.width as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::buffer_text;

    #[test]
    fn offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 10, 5), 0);
        assert_eq!(scroll_offset(3, 10, 100), 0);
        assert_eq!(scroll_offset(50, 10, 100), 45);
        assert_eq!(scroll_offset(99, 10, 100), 90);
        assert_eq!(scroll_offset(5, 0, 100), 0);
    }

    #[test]
    fn scrolled_list_shows_cursor() {
        let theme = Theme::default();
        let names: Vec<String> = (0..50).map(|i| format!("SYM{i:02}")).collect();
        let symbols: Vec<&str> = names.iter().map(String::as_str).collect();
        let area = Rect::new(0, 0, 16, 8);
        let mut buf = Buffer::empty(area);
        SymbolList::new(&symbols, 40, "", true, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Symbols (50)"));
        assert!(text.contains("SYM40"));
        assert!(!text.contains("SYM00"));
    }

    #[test]
    fn empty_states() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 16, 5);
        for (loaded, filter, expected) in [
            (false, "", "Loading"),
            (true, "", "No symbols"),
            (true, "zz", "No match"),
        ] {
            let mut buf = Buffer::empty(area);
            SymbolList::new(&[], 0, filter, loaded, &theme).render(area, &mut buf);
            assert!(buffer_text(&buf).contains(expected));
        }
    }
}
