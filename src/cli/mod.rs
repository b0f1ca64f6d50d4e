mod history;
mod output;
mod report;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

pub use history::HistoryArgs;
pub use report::ReportArgs;

use crate::config::{Config, Overrides};
use crate::services::{day_over_day, Aggregator, PeriodComparison, DEFAULT_TOP_ITEMS};
use crate::sources::{load_orders, open_source};
use crate::tui::{self, DashboardOptions};
use crate::types::{BucketOrder, OrderRecord, Result, SalesSummary};

/// Restaurant sales dashboard and reports
#[derive(Parser)]
#[command(name = "salestrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Snapshot file, directory or export URL (overrides config and SALESTRACK_SOURCE)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Directory holding report fonts (overrides config and SALESTRACK_FONTS_DIR)
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Evaluate "today" at this instant (RFC 3339) instead of the clock
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive dashboard (default)
    Tui,

    /// Show the sales summary
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the sales chart series
    Chart {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Order buckets by date instead of first appearance
        #[arg(long)]
        chronological: bool,
    },

    /// Show best-selling menu items
    Top {
        /// Number of items to show
        #[arg(long, default_value_t = DEFAULT_TOP_ITEMS)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List completed orders, newest first
    History(HistoryArgs),

    /// Export a sales report
    Report(ReportArgs),
}

fn parse_now(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {}", e))
}

/// Summary plus the derived comparison lines, as printed by `summary`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput<'a> {
    #[serde(flatten)]
    summary: &'a SalesSummary,
    day_over_day: String,
    comparisons: [PeriodComparison; 3],
}

impl Cli {
    /// Whether this invocation draws the full-screen dashboard
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load(Overrides {
            source: self.source,
            fonts_dir: self.fonts_dir,
        })?;
        let now = self.now.unwrap_or_else(Utc::now);

        match self.command {
            None | Some(Commands::Tui) => tui::run(DashboardOptions {
                source: config.source,
                now: self.now,
                currency: config.currency,
            }),
            Some(Commands::Summary { json }) => {
                let orders = load(&config)?;
                let summary = Aggregator::summary(&orders, now);
                if json {
                    let out = SummaryOutput {
                        summary: &summary,
                        day_over_day: day_over_day(summary.today_sales, summary.yesterday_sales),
                        comparisons: summary.comparisons(),
                    };
                    print_json(&out)?;
                } else {
                    print!("{}", output::summary_text(&summary, &config.currency));
                }
                Ok(())
            }
            Some(Commands::Chart {
                json,
                chronological,
            }) => {
                let orders = load(&config)?;
                let order = if chronological {
                    BucketOrder::Chronological
                } else {
                    BucketOrder::FirstSeen
                };
                let (_, series) = Aggregator::aggregate_with(&orders, now, order);
                if json {
                    print_json(&series)?;
                } else {
                    print!("{}", output::chart_text(&series, &config.currency));
                }
                Ok(())
            }
            Some(Commands::Top { limit, json }) => {
                let orders = load(&config)?;
                let items = Aggregator::top_items(&orders, limit);
                if json {
                    print_json(&items)?;
                } else {
                    print!("{}", output::top_items_text(&items, &config.currency));
                }
                Ok(())
            }
            Some(Commands::History(args)) => {
                let orders = load(&config)?;
                args.run(&orders, &config.currency)?;
                Ok(())
            }
            Some(Commands::Report(args)) => {
                let orders = load(&config)?;
                args.run(&orders, now, &config)?;
                Ok(())
            }
        }
    }
}

fn load(config: &Config) -> Result<Vec<OrderRecord>> {
    let source = open_source(&config.source);
    load_orders(source.as_ref())
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
