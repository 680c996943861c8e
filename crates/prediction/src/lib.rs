//! Behavioral prediction engine — churn probability, lifetime value, and
//! next-purchase timing, each in a basic mode (denormalized rollups only)
//! and an advanced mode (full purchase history).
//!
//! Deterministic threshold formulas, not learned models: every estimate is
//! a pure function of the input records and the evaluation instant.

pub mod churn;
pub mod engine;
pub mod history;
pub mod ltv;
pub mod next_purchase;

pub use engine::PredictionEngine;
