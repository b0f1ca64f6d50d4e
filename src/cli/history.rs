//! `salestrack history` subcommand

use clap::Args;

use super::{output, print_json};
use crate::services::{history_page, HistoryQuery, HISTORY_PAGE_SIZE};
use crate::types::OrderRecord;

/// Page through completed orders
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only orders placed by this customer
    #[arg(long)]
    pub customer: Option<String>,

    /// Continue after this order id (the cursor printed by the previous page)
    #[arg(long)]
    pub after: Option<String>,

    /// Orders per page
    #[arg(long, default_value_t = HISTORY_PAGE_SIZE)]
    pub page_size: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HistoryArgs {
    fn query(&self) -> HistoryQuery {
        HistoryQuery {
            customer_id: self.customer.clone(),
            after: self.after.clone(),
            page_size: self.page_size,
        }
    }

    pub fn run(self, orders: &[OrderRecord], currency: &str) -> anyhow::Result<()> {
        let page = history_page(orders, &self.query());

        if self.json {
            print_json(&page)?;
        } else {
            print!("{}", output::history_text(&page, currency));
        }
        Ok(())
    }
}
