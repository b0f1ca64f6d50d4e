//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Periods,
    Chart,
    TopItems,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Periods, Tab::Chart, Tab::TopItems];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Periods => "Periods",
            Self::Chart => "Chart",
            Self::TopItems => "Top Items",
        }
    }

    pub fn all() -> &'static [Tab] {
        &Self::ALL
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab (wrapping)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab (wrapping)
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tab for number key 1-4
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn display(&self, tab: Tab) -> String {
        if tab == self.selected {
            format!("[{}]", tab.label())
        } else {
            tab.label().to_string()
        }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Centered, two spaces between labels
        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| self.display(*tab).len() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for tab in Tab::all() {
            let display = self.display(*tab);
            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if *tab == self.selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }
}
