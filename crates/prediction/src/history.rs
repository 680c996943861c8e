//! Purchase-history analysis shared by the advanced predictors.

use chrono::{DateTime, Utc};
use insight_core::types::Purchase;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days elapsed from `then` to `as_of`.
pub fn days_since(as_of: DateTime<Utc>, then: DateTime<Utc>) -> f64 {
    (as_of - then).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Day-gaps between consecutive purchases of a newest-first ledger.
/// Non-positive gaps (same-instant or out-of-order rows) are discarded.
pub fn purchase_intervals(purchases: &[Purchase]) -> Vec<f64> {
    purchases
        .windows(2)
        .filter_map(|pair| {
            let gap = days_since(pair[0].purchase_date, pair[1].purchase_date);
            (gap > 0.0).then_some(gap)
        })
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
