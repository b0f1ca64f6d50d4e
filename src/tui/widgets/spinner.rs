//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const APP_NAME: &str = "salestrack";
const TAGLINE: &str = "Restaurant sales at a glance";

/// Full-screen spinner shown until the first load finishes
pub struct Spinner<'a> {
    frame: usize,
    source: &'a str,
    theme: Theme,
}

impl<'a> Spinner<'a> {
    pub fn new(frame: usize, source: &'a str, theme: Theme) -> Self {
        Self {
            frame,
            source,
            theme,
        }
    }

    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }

    /// Small inline indicator used while a reload runs behind loaded data
    pub fn inline(frame: usize) -> String {
        format!("{} Reloading...", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()])
    }
}

fn centered_x(area: Rect, text: &str) -> u16 {
    area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 5 || area.width < 35 {
            return;
        }

        let center_y = area.y + area.height / 2;

        let name_y = center_y.saturating_sub(2);
        buf.set_string(
            centered_x(area, APP_NAME),
            name_y,
            APP_NAME,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        let tag_y = name_y + 1;
        buf.set_string(
            centered_x(area, TAGLINE),
            tag_y,
            TAGLINE,
            Style::default().fg(self.theme.muted()),
        );

        let max_source = area.width.saturating_sub(24) as usize;
        let source: String = if self.source.chars().count() > max_source {
            let tail: String = self
                .source
                .chars()
                .rev()
                .take(max_source.saturating_sub(1))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("…{}", tail)
        } else {
            self.source.to_string()
        };
        let spinner_text = format!("{} Loading orders from {}", self.current_char(), source);
        buf.set_string(
            centered_x(area, &spinner_text),
            tag_y + 2,
            &spinner_text,
            Style::default().fg(self.theme.accent()),
        );
    }
}
