//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 16;

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch view"),
    ("1-4", "Jump to view"),
    ("Up/Down or j/k", "Scroll (Chart)"),
];

const GENERAL: &[(&str, &str)] = &[
    ("r", "Reload orders"),
    ("q / Esc", "Quit"),
    ("?", "Toggle help"),
];

pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn section(
        &self,
        title: &'static str,
        keys: &[(&'static str, &'static str)],
    ) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(self.theme.label())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "─".repeat(POPUP_WIDTH.saturating_sub(2) as usize),
                Style::default().fg(self.theme.muted()),
            )),
        ];
        lines.extend(keys.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<18}", key),
                    Style::default().fg(self.theme.accent()),
                ),
                Span::styled(*desc, Style::default().fg(self.theme.text())),
            ])
        }));
        lines
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" salestrack v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let mut lines = vec![Line::default()];
        lines.extend(self.section("Navigation", NAVIGATION));
        lines.push(Line::default());
        lines.extend(self.section("General", GENERAL));
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
