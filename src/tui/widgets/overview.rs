//! Overview view - today against yesterday, plus all-time totals, as cards

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::format::{format_money, format_number};
use crate::services::day_over_day;
use crate::tui::theme::Theme;
use crate::types::SalesSummary;

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 5;
const MAX_COLS: usize = 3;

/// Cards per row for the available width (1-3)
fn cards_per_row(width: u16) -> usize {
    let usable_width = width.saturating_sub(4);
    let cards = (usable_width / (CARD_WIDTH + 2)) as usize;
    cards.clamp(1, MAX_COLS)
}

pub struct OverviewView<'a> {
    summary: &'a SalesSummary,
    currency: &'a str,
    theme: Theme,
}

impl<'a> OverviewView<'a> {
    pub fn new(summary: &'a SalesSummary, currency: &'a str, theme: Theme) -> Self {
        Self {
            summary,
            currency,
            theme,
        }
    }

    fn build_cards(&self) -> Vec<StatCard> {
        let s = self.summary;
        let money = |d| format_money(d, self.currency);
        let t = self.theme;

        let change_color = if s.today_sales > s.yesterday_sales {
            t.bar()
        } else {
            t.error()
        };

        vec![
            StatCard::new("Today's Sales", money(s.today_sales), t.money()).with_note(
                day_over_day(s.today_sales, s.yesterday_sales),
                change_color,
            ),
            StatCard::new("Today's Orders", format_number(s.today_orders), t.count()),
            StatCard::new(
                "Today's Products Sold",
                format_number(s.today_products_sold),
                t.label(),
            ),
            StatCard::new("Yesterday's Sales", money(s.yesterday_sales), t.muted()),
            StatCard::new(
                "Yesterday's Orders",
                format_number(s.yesterday_orders),
                t.muted(),
            ),
            StatCard::new(
                "Yesterday's Products",
                format_number(s.yesterday_products_sold),
                t.muted(),
            ),
            StatCard::new("Total Sales", money(s.total_sales), t.accent()),
            StatCard::new("Total Orders", format_number(s.total_orders), t.accent()),
            StatCard::new(
                "Total Products",
                format_number(s.total_products),
                t.accent(),
            ),
        ]
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer, card: &StatCard) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(card.color))
            .render(area, buf);

        let centered =
            |text: &str| area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;

        buf.set_string(
            centered(&card.title),
            area.y + 1,
            &card.title,
            Style::default().fg(card.color),
        );
        buf.set_string(
            centered(&card.value),
            area.y + 2,
            &card.value,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );
        if let Some((note, color)) = &card.note {
            buf.set_string(centered(note), area.y + 3, note, Style::default().fg(*color));
        }
    }
}

impl Widget for OverviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = self.build_cards();
        let cols = cards_per_row(area.width);

        let grid_width = (cols as u16) * CARD_WIDTH + ((cols - 1) as u16) * 2;
        let start_x = area.x + (area.width.saturating_sub(grid_width)) / 2;

        for (i, card) in cards.iter().enumerate() {
            let row = (i / cols) as u16;
            let col = (i % cols) as u16;

            let card_area = Rect {
                x: start_x + col * (CARD_WIDTH + 2),
                y: area.y + row * (CARD_HEIGHT + 1),
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT,
            };
            if card_area.y + CARD_HEIGHT > area.y + area.height {
                break;
            }

            self.render_card(card_area, buf, card);
        }
    }
}

struct StatCard {
    title: String,
    value: String,
    color: Color,
    note: Option<(String, Color)>,
}

impl StatCard {
    fn new(title: &str, value: String, color: Color) -> Self {
        Self {
            title: title.to_string(),
            value,
            color,
            note: None,
        }
    }

    fn with_note(mut self, note: String, color: Color) -> Self {
        self.note = Some((note, color));
        self
    }
}
