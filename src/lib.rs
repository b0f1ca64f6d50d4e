//! Sales aggregation, period comparisons and report export for
//! restaurant point-of-sale order snapshots.

pub mod cli;
pub mod config;
pub mod format;
pub mod report;
pub mod services;
pub mod sources;
pub mod tui;
pub mod types;
