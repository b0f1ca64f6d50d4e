//! Chart view - one bar per bucket, scrollable when there are more buckets
//! than rows

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::format::{bar_len, format_money};
use crate::tui::theme::Theme;
use crate::types::ChartSeries;

/// Header line plus blank line above the bars
const HEADER_ROWS: u16 = 2;
const AMOUNT_WIDTH: usize = 16;

pub struct ChartView<'a> {
    series: &'a ChartSeries,
    currency: &'a str,
    scroll: usize,
    theme: Theme,
}

impl<'a> ChartView<'a> {
    pub fn new(series: &'a ChartSeries, currency: &'a str, scroll: usize, theme: Theme) -> Self {
        Self {
            series,
            currency,
            scroll,
            theme,
        }
    }

    /// Largest useful scroll offset for the series
    pub fn max_scroll_offset(series: &ChartSeries) -> usize {
        series.len().saturating_sub(1)
    }

    /// First visible bucket, clamped so the last page stays full
    fn first_visible(&self, rows: usize) -> usize {
        self.scroll.min(self.series.len().saturating_sub(rows))
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let Some(granularity) = self.series.granularity else {
            let text = "No sales data";
            let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(x, area.y, text, Style::default().fg(self.theme.muted()));
            return;
        };

        let header = format!(
            "{} sales · Sales (in {})",
            granularity.label(),
            self.currency
        );
        buf.set_string(
            area.x + 2,
            area.y,
            &header,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        let rows = area.height.saturating_sub(HEADER_ROWS) as usize;
        if rows == 0 {
            return;
        }

        let label_width = self
            .series
            .points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0);
        let bar_width =
            (area.width as usize).saturating_sub(label_width + AMOUNT_WIDTH + 8);
        let max = self.series.max_total();
        let start = self.first_visible(rows);

        for (i, point) in self.series.points.iter().skip(start).take(rows).enumerate() {
            let y = area.y + HEADER_ROWS + i as u16;
            let label = format!("  {:>width$}  ", point.label, width = label_width);
            buf.set_string(area.x, y, &label, Style::default().fg(self.theme.label()));

            let mut x = area.x + label.chars().count() as u16;
            let cells = bar_len(point.total, max, bar_width);
            buf.set_string(x, y, "█".repeat(cells), Style::default().fg(self.theme.bar()));
            x += cells as u16 + 1;

            buf.set_string(
                x,
                y,
                format_money(point.total, self.currency),
                Style::default().fg(self.theme.money()),
            );
        }

        let hidden = self.series.len().saturating_sub(start + rows);
        if start > 0 || hidden > 0 {
            let more = format!(
                "{}-{} of {}",
                start + 1,
                (start + rows).min(self.series.len()),
                self.series.len()
            );
            let x = area.x + area.width.saturating_sub(more.len() as u16 + 2);
            buf.set_string(x, area.y, &more, Style::default().fg(self.theme.muted()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChartPoint, Granularity};
    use rust_decimal::Decimal;

    fn series(n: usize) -> ChartSeries {
        ChartSeries {
            granularity: Some(Granularity::Week),
            points: (0..n)
                .map(|i| ChartPoint {
                    label: format!("W{:02}", i),
                    total: Decimal::from(i as u64 + 1),
                })
                .collect(),
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_empty_series_message() {
        let empty = ChartSeries::default();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ChartView::new(&empty, "₱", 0, Theme::Dark).render(area, &mut buf);
        assert!(row(&buf, 0).contains("No sales data"));
    }

    #[test]
    fn test_header_names_axis() {
        let s = series(2);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ChartView::new(&s, "₱", 0, Theme::Dark).render(area, &mut buf);
        assert!(row(&buf, 0).contains("Weekly sales · Sales (in ₱)"));
        assert!(row(&buf, 2).contains("W00"));
        assert!(row(&buf, 3).contains("W01"));
        assert!(row(&buf, 3).contains("₱2.00"));
    }

    #[test]
    fn test_scroll_clamps_to_last_page() {
        let s = series(10);
        let view = ChartView::new(&s, "₱", 9, Theme::Dark);
        assert_eq!(view.first_visible(4), 6);
        assert_eq!(ChartView::max_scroll_offset(&s), 9);

        let view = ChartView::new(&s, "₱", 2, Theme::Dark);
        assert_eq!(view.first_visible(4), 2);
    }

    #[test]
    fn test_position_indicator_when_scrollable() {
        let s = series(10);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ChartView::new(&s, "₱", 0, Theme::Dark).render(area, &mut buf);
        assert!(row(&buf, 0).contains("1-4 of 10"));
    }
}
