//! Shared frame around every dashboard view: tabs, title, status and keys

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Line under the content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Source name and when the data was computed
    Info(String),
    /// Last reload failed; data on screen is from the previous load
    Error(String),
}

pub struct Chrome<'a> {
    pub tab: Tab,
    pub title: &'a str,
    pub status: Option<&'a Status>,
    pub theme: Theme,
}

impl Chrome<'_> {
    /// Draw the frame and return the area left for the view body
    pub fn render(self, area: Rect, buf: &mut Buffer) -> Rect {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Title
            Constraint::Length(1), // Blank
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered);

        TabBar::new(self.tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        Paragraph::new(Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        if let Some(status) = self.status {
            self.render_status(status, chunks[6], buf);
        }
        self.render_separator(chunks[7], buf);
        self.render_keybindings(chunks[8], buf);

        chunks[5]
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(area.x, area.y, &line, Style::default().fg(self.theme.muted()));
    }

    fn render_status(&self, status: &Status, area: Rect, buf: &mut Buffer) {
        let (text, color) = match status {
            Status::Info(text) => (text.clone(), self.theme.muted()),
            Status::Error(text) => (format!("Reload failed: {}", text), self.theme.error()),
        };
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(self.theme.accent());
        let desc = Style::default().fg(self.theme.muted());
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("q", key),
            Span::styled(": Quit", desc),
            Span::raw("  "),
            Span::styled("Tab", key),
            Span::styled(": Switch view", desc),
            Span::raw("  "),
            Span::styled("r", key),
            Span::styled(": Reload", desc),
            Span::raw("  "),
            Span::styled("?", key),
            Span::styled(": Help", desc),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}
