//! Application state and event loop

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::{Aggregator, DEFAULT_TOP_ITEMS};
use crate::sources::{load_orders, open_source};
use crate::types::{ChartSeries, SalesSummary, TopItem};

use super::theme::Theme;
use super::widgets::{
    chart::ChartView,
    chrome::{Chrome, Status},
    help::HelpPopup,
    overview::OverviewView,
    periods::PeriodsView,
    spinner::Spinner,
    tabs::Tab,
    top_items::TopItemsView,
};

/// What the dashboard loads and how it prints money
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Snapshot path or export URL
    pub source: String,
    /// Fixed evaluation instant; `None` uses the clock at each load
    pub now: Option<DateTime<Utc>>,
    pub currency: String,
}

/// Application state
pub enum AppState {
    /// First load in progress
    Loading { spinner_frame: usize },
    Ready { data: Box<AppData> },
    /// First load failed; there is nothing to show
    Error { message: String },
}

/// One aggregation run
pub struct AppData {
    pub summary: SalesSummary,
    pub chart: ChartSeries,
    pub top_items: Vec<TopItem>,
    pub computed_at: DateTime<Utc>,
}

type LoadResult = Result<Box<AppData>, String>;

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    chart_scroll: usize,
    show_help: bool,
    /// A background load is running
    reloading: bool,
    reload_requested: bool,
    reload_frame: usize,
    /// Error from the most recent reload, shown over the previous data
    last_error: Option<String>,
    source: String,
    currency: String,
    theme: Theme,
}

impl App {
    /// Create a new app in loading state
    pub fn new(source: &str, currency: &str, theme: Theme) -> Self {
        Self {
            state: AppState::Loading { spinner_frame: 0 },
            should_quit: false,
            current_tab: Tab::default(),
            chart_scroll: 0,
            show_help: false,
            reloading: true,
            reload_requested: false,
            reload_frame: 0,
            last_error: None,
            source: source.to_string(),
            currency: currency.to_string(),
            theme,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                // Presses during an in-flight load are dropped
                if !self.reloading {
                    self.reload_requested = true;
                }
            }
            KeyCode::Up | KeyCode::Char('k') if self.current_tab == Tab::Chart => {
                self.chart_scroll = self.chart_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') if self.current_tab == Tab::Chart => {
                if let AppState::Ready { data } = &self.state {
                    let max = ChartView::max_scroll_offset(&data.chart);
                    self.chart_scroll = (self.chart_scroll + 1).min(max);
                }
            }
            _ => {}
        }
    }

    /// Take a pending reload request, marking the load as in flight
    fn take_reload_request(&mut self) -> bool {
        if !self.reload_requested {
            return false;
        }
        self.reload_requested = false;
        self.reloading = true;
        if let AppState::Error { .. } = self.state {
            self.state = AppState::Loading { spinner_frame: 0 };
        }
        true
    }

    /// Apply a finished load. A failed reload keeps the data already on screen.
    fn apply_data_result(&mut self, result: LoadResult) {
        self.reloading = false;
        match result {
            Ok(data) => {
                self.chart_scroll = self
                    .chart_scroll
                    .min(ChartView::max_scroll_offset(&data.chart));
                self.last_error = None;
                self.state = AppState::Ready { data };
            }
            Err(message) => {
                if let AppState::Ready { .. } = self.state {
                    self.last_error = Some(message);
                } else {
                    self.state = AppState::Error { message };
                }
            }
        }
    }

    /// Advance spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &mut self.state {
            *spinner_frame = Spinner::next_frame(*spinner_frame);
        }
        if self.reloading {
            self.reload_frame = Spinner::next_frame(self.reload_frame);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn status(&self, data: &AppData) -> Status {
        if self.reloading {
            return Status::Info(Spinner::inline(self.reload_frame));
        }
        if let Some(err) = &self.last_error {
            return Status::Error(err.clone());
        }
        Status::Info(format!(
            "{} · {} orders · as of {}",
            self.source,
            data.summary.total_orders,
            data.computed_at.format("%Y-%m-%d %H:%M UTC")
        ))
    }

    fn render_ready(&self, data: &AppData, area: Rect, buf: &mut Buffer) {
        let title = match self.current_tab {
            Tab::Overview => "Sales Overview",
            Tab::Periods => "Period Comparison",
            Tab::Chart => "Sales Chart",
            Tab::TopItems => "Top Items",
        };
        let status = self.status(data);
        let body = Chrome {
            tab: self.current_tab,
            title,
            status: Some(&status),
            theme: self.theme,
        }
        .render(area, buf);

        let currency = self.currency.as_str();
        match self.current_tab {
            Tab::Overview => {
                OverviewView::new(&data.summary, currency, self.theme).render(body, buf)
            }
            Tab::Periods => {
                PeriodsView::new(&data.summary, currency, self.theme).render(body, buf)
            }
            Tab::Chart => {
                ChartView::new(&data.chart, currency, self.chart_scroll, self.theme)
                    .render(body, buf)
            }
            Tab::TopItems => {
                TopItemsView::new(&data.top_items, currency, self.theme).render(body, buf)
            }
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading { spinner_frame } => {
                Spinner::new(*spinner_frame, &self.source, self.theme).render(area, buf);
            }
            AppState::Ready { data } => self.render_ready(data, area, buf),
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let lines = [
                    (format!("Error: {}", message), self.theme.error()),
                    ("r: Retry  q: Quit".to_string(), self.theme.muted()),
                ];
                for (i, (text, color)) in lines.iter().enumerate() {
                    let row = y + i as u16;
                    if row >= area.y + area.height {
                        break;
                    }
                    let x = area.x
                        + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
                    buf.set_string(x, row, text, Style::default().fg(*color));
                }
            }
        }
    }
}

/// Run the dashboard until the user quits
pub fn run(options: DashboardOptions) -> anyhow::Result<()> {
    // Detect before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, options, theme);
    ratatui::restore();
    result
}

/// Fetch, validate and aggregate (runs on a background thread)
fn load_data_sync(options: &DashboardOptions) -> LoadResult {
    let source = open_source(&options.source);
    let orders = load_orders(source.as_ref()).map_err(|e| e.to_string())?;

    let now = options.now.unwrap_or_else(Utc::now);
    let (summary, chart) = Aggregator::aggregate(&orders, now);
    let top_items = Aggregator::top_items(&orders, DEFAULT_TOP_ITEMS);

    Ok(Box::new(AppData {
        summary,
        chart,
        top_items,
        computed_at: now,
    }))
}

fn spawn_load(options: &DashboardOptions) -> Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    let options = options.clone();
    thread::spawn(move || {
        let _ = tx.send(load_data_sync(&options));
    });
    rx
}

fn run_app(
    terminal: &mut DefaultTerminal,
    options: DashboardOptions,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new(&options.source, &options.currency, theme);
    let mut pending = Some(spawn_load(&options));

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if let Some(rx) = &pending {
            match rx.try_recv() {
                Ok(result) => {
                    app.apply_data_result(result);
                    pending = None;
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    app.apply_data_result(Err("loader thread exited".to_string()));
                    pending = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }

        if app.take_reload_request() {
            tracing::debug!(source = %options.source, "reloading");
            pending = Some(spawn_load(&options));
        }

        // 100ms poll keeps the spinner moving
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
