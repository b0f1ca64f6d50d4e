//! TUI widgets

pub mod chart;
pub mod chrome;
pub mod help;
pub mod overview;
pub mod periods;
pub mod spinner;
pub mod tabs;
pub mod top_items;
