//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::services::Trend;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Headers and body text
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Selected tab, keybinding keys
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25),
        }
    }

    /// Separators, inactive tabs, hints
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Chart labels and period names
    pub fn label(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130),
        }
    }

    /// Sales amounts
    pub fn money(self) -> Color {
        match self {
            Self::Dark => Color::Magenta,
            Self::Light => Color::Indexed(90),
        }
    }

    /// Chart bars and upward trends
    pub fn bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22),
        }
    }

    /// Errors and downward trends
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124),
        }
    }

    /// Order count cards
    pub fn count(self) -> Color {
        match self {
            Self::Dark => Color::Blue,
            Self::Light => Color::Indexed(25),
        }
    }

    pub fn trend(self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.bar(),
            Trend::Down => self.error(),
        }
    }
}
