//! Periods view - week, month and year against the previous one

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::format::{bar_len, format_money};
use crate::services::PeriodComparison;
use crate::tui::theme::Theme;
use crate::types::SalesSummary;

/// Rows per comparison block: heading, current, previous, blank
const BLOCK_HEIGHT: u16 = 4;
const LABEL_WIDTH: usize = 12;
const AMOUNT_WIDTH: usize = 16;

pub struct PeriodsView<'a> {
    summary: &'a SalesSummary,
    currency: &'a str,
    theme: Theme,
}

impl<'a> PeriodsView<'a> {
    pub fn new(summary: &'a SalesSummary, currency: &'a str, theme: Theme) -> Self {
        Self {
            summary,
            currency,
            theme,
        }
    }

    fn render_block(&self, cmp: &PeriodComparison, area: Rect, buf: &mut Buffer) {
        let trend = cmp.trend();
        let heading = format!("{} {}", cmp.period, trend.arrow());
        buf.set_string(
            area.x,
            area.y,
            &heading,
            Style::default()
                .fg(self.theme.trend(trend))
                .add_modifier(Modifier::BOLD),
        );

        let max = cmp.current.max(cmp.previous);
        let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + AMOUNT_WIDTH + 4);
        let rows = [
            (format!("This {}", cmp.period), cmp.current, self.theme.bar()),
            (format!("Last {}", cmp.period), cmp.previous, self.theme.muted()),
        ];

        for (i, (label, amount, color)) in rows.into_iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let text = format!(
                "  {:<label$}{:>amount_w$}  ",
                label,
                format_money(amount, self.currency),
                label = LABEL_WIDTH,
                amount_w = AMOUNT_WIDTH
            );
            buf.set_string(area.x, y, &text, Style::default().fg(self.theme.text()));
            let bar = "█".repeat(bar_len(amount, max, bar_width));
            buf.set_string(
                area.x + text.chars().count() as u16,
                y,
                &bar,
                Style::default().fg(color),
            );
        }
    }
}

impl Widget for PeriodsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, cmp) in self.summary.comparisons().iter().enumerate() {
            let y = area.y + i as u16 * BLOCK_HEIGHT;
            if y + BLOCK_HEIGHT - 1 > area.y + area.height {
                break;
            }
            let block = Rect {
                x: area.x + 2,
                y,
                width: area.width.saturating_sub(4),
                height: BLOCK_HEIGHT - 1,
            };
            self.render_block(cmp, block, buf);
        }
    }
}
