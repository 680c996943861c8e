//! Lifetime-value estimation.
//!
//! The basic formula projects the denormalized rollups over a fixed
//! 24-month horizon. The advanced formula re-derives order value and
//! cadence from the purchase ledger and scales the horizon by age band
//! and observed monthly frequency.

use insight_core::types::{Customer, Purchase};

use crate::history::{mean, purchase_intervals};

/// Assumed interval when the ledger yields no usable gaps.
const DEFAULT_INTERVAL_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtvEstimate {
    pub value: f64,
    pub confidence: f64,
}

/// Average order value × monthly purchase rate × 24 months.
pub fn basic(customer: &Customer) -> LtvEstimate {
    let avg_order_value = if customer.purchase_frequency == 0 {
        0.0
    } else {
        customer.total_spent / customer.purchase_frequency as f64
    };

    let monthly_purchase_rate = customer.purchase_frequency as f64 / 12.0;
    let estimated_lifespan_months = 24.0;

    LtvEstimate {
        value: avg_order_value * monthly_purchase_rate * estimated_lifespan_months,
        confidence: 0.65,
    }
}

/// Ledger-driven estimate over a newest-first purchase history. Falls back
/// to the basic formula when the ledger is empty.
pub fn advanced(customer: &Customer, purchases: &[Purchase]) -> LtvEstimate {
    if purchases.is_empty() {
        return basic(customer);
    }

    let amounts: Vec<f64> = purchases.iter().map(|p| p.amount).collect();
    let avg_order_value = mean(&amounts);

    let intervals = purchase_intervals(purchases);
    let avg_interval = if intervals.is_empty() {
        DEFAULT_INTERVAL_DAYS
    } else {
        mean(&intervals)
    };
    let monthly_frequency = 30.0 / avg_interval;

    // Lifespan horizon in months by age band, stretched for frequent
    // buyers and shortened for sporadic ones.
    let mut estimated_lifespan_months = match customer.age {
        0..=24 => 36.0,
        25..=39 => 48.0,
        40..=59 => 60.0,
        _ => 36.0,
    };
    if monthly_frequency > 2.0 {
        estimated_lifespan_months *= 1.2;
    } else if monthly_frequency < 0.5 {
        estimated_lifespan_months *= 0.8;
    }

    let confidence = if purchases.len() > 10 {
        0.90
    } else if purchases.len() > 5 {
        0.85
    } else {
        0.75
    };

    LtvEstimate {
        value: avg_order_value * monthly_frequency * estimated_lifespan_months,
        confidence,
    }
}
