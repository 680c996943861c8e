//! Customer value-tier segmentation — tertile scoring over spend and
//! purchase frequency.

pub mod engine;

pub use engine::{SegmentationEngine, ValueTier};
