//! Cosmic theme tokens for the Flamingo dashboard
//!
//! # Color Palette
//! - **Background**: deep indigo night sky
//! - **Accent**: aqua `#00f2fe` (focus, titles, KDE curve)
//! - **Secondary**: sky blue `#4facfe` (histogram, volume)
//! - **Positive**: mint green (up candles, gains)
//! - **Negative**: coral `#ff6b6b` (down candles, losses)
//! - **Warning**: amber (unavailable data, disclaimers)
//! - **Muted**: slate (axis labels, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub accent: Color,
    pub secondary: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::cosmic()
    }
}

impl Theme {
    pub fn cosmic() -> Self {
        Self {
            background: Color::Rgb(15, 12, 41),
            surface: Color::Rgb(36, 36, 62),
            accent: Color::Rgb(0, 242, 254),
            secondary: Color::Rgb(79, 172, 254),
            positive: Color::Rgb(72, 222, 128),
            negative: Color::Rgb(255, 107, 107),
            warning: Color::Rgb(255, 193, 7),
            muted: Color::Rgb(120, 130, 160),
            text_primary: Color::White,
            text_secondary: Color::Rgb(190, 195, 215),
        }
    }

    /// Up/down color for a signed change.
    pub fn change_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn block_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.surface)
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
