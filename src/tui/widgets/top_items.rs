//! Top items view - best sellers by units sold

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use rust_decimal::Decimal;

use crate::format::{bar_len, format_money, format_number};
use crate::tui::theme::Theme;
use crate::types::TopItem;

const NAME_WIDTH: usize = 24;
const SOLD_WIDTH: usize = 8;
const REVENUE_WIDTH: usize = 16;

pub struct TopItemsView<'a> {
    items: &'a [TopItem],
    currency: &'a str,
    theme: Theme,
}

impl<'a> TopItemsView<'a> {
    pub fn new(items: &'a [TopItem], currency: &'a str, theme: Theme) -> Self {
        Self {
            items,
            currency,
            theme,
        }
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

impl Widget for TopItemsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        if self.items.is_empty() {
            let text = "No items sold yet";
            let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(x, area.y, text, Style::default().fg(self.theme.muted()));
            return;
        }

        let header = format!(
            "  {:>2}  {:<name$}  {:>sold$}  {:>rev$}",
            "#",
            "Item",
            "Sold",
            "Revenue",
            name = NAME_WIDTH,
            sold = SOLD_WIDTH,
            rev = REVENUE_WIDTH
        );
        buf.set_string(
            area.x,
            area.y,
            &header,
            Style::default()
                .fg(self.theme.muted())
                .add_modifier(Modifier::BOLD),
        );

        let max_sold = self.items.iter().map(|i| i.sold).max().unwrap_or(0);
        let bar_width = (area.width as usize).saturating_sub(header.chars().count() + 4);

        for (rank, item) in self.items.iter().enumerate() {
            let y = area.y + 1 + rank as u16;
            if y >= area.y + area.height {
                break;
            }

            let text = format!(
                "  {:>2}  {:<name$}  {:>sold$}  {:>rev$}  ",
                rank + 1,
                truncate(&item.name, NAME_WIDTH),
                format_number(item.sold),
                format_money(item.revenue, self.currency),
                name = NAME_WIDTH,
                sold = SOLD_WIDTH,
                rev = REVENUE_WIDTH
            );
            buf.set_string(area.x, y, &text, Style::default().fg(self.theme.text()));

            let cells = bar_len(Decimal::from(item.sold), Decimal::from(max_sold), bar_width);
            buf.set_string(
                area.x + text.chars().count() as u16,
                y,
                "█".repeat(cells),
                Style::default().fg(self.theme.bar()),
            );
        }
    }
}
