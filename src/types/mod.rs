//! Type definitions for salestrack

mod error;
mod order;
mod sales;

pub use error::*;
pub use order::*;
pub use sales::*;
