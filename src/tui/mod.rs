//! Interactive dashboard

mod app;
mod theme;
mod widgets;

pub use app::{run, DashboardOptions};
