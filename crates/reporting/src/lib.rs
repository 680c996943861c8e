//! Reporting — headline dashboard aggregates over the customer, purchase,
//! and campaign records.

pub mod dashboard;

pub use dashboard::{DashboardEngine, DashboardSnapshot};
