//! `salestrack report` subcommand

use chrono::{DateTime, Utc};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::report::{write_pdf, PdfStyle, ReportKind};
use crate::services::Aggregator;
use crate::types::{OrderRecord, Result};

/// Export a report as PDF (or print it)
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// daily, weekly, monthly, yearly, overall or orders
    #[arg(value_name = "PERIOD")]
    pub target: String,

    /// Directory to write the PDF into (defaults to the configured report dir)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the table instead of writing a PDF
    #[arg(long)]
    pub text: bool,
}

impl ReportArgs {
    pub fn run(self, orders: &[OrderRecord], now: DateTime<Utc>, config: &Config) -> Result<()> {
        let kind: ReportKind = self.target.parse()?;
        let summary = Aggregator::summary(orders, now);
        let table = kind.table(Some(&summary));

        if self.text {
            print!("{}", table.to_text());
            return Ok(());
        }

        let style = PdfStyle {
            fonts_dir: config.fonts_dir.clone(),
            font_family: config.font_family.clone(),
            generated_on: now.date_naive(),
        };
        let dir = self.output.as_deref().unwrap_or(config.report_dir.as_path());
        let path = write_pdf(&table, &style, dir, &kind.file_name())?;
        println!("Report written to {}", display_path(&path));
        Ok(())
    }
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}
