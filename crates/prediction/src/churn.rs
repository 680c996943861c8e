//! Churn probability from recency and frequency.

use chrono::{DateTime, Utc};
use insight_core::types::Customer;

use crate::history::days_since;

/// Treated as the recency of a customer who has never purchased.
const NEVER_PURCHASED_DAYS: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChurnScore {
    pub probability: f64,
    pub confidence: f64,
}

/// Recency-banded base probability, adjusted for loyalty: frequent buyers
/// (>10 purchases) are discounted, infrequent ones (<3) penalized.
pub fn score(customer: &Customer, as_of: DateTime<Utc>) -> ChurnScore {
    let days_since_last_purchase = customer
        .last_purchase_date
        .map(|date| days_since(as_of, date))
        .unwrap_or(NEVER_PURCHASED_DAYS);

    let mut probability: f64 = if days_since_last_purchase > 180.0 {
        0.8
    } else if days_since_last_purchase > 90.0 {
        0.5
    } else if days_since_last_purchase > 30.0 {
        0.2
    } else {
        0.1
    };

    if customer.purchase_frequency > 10 {
        probability *= 0.7;
    } else if customer.purchase_frequency < 3 {
        probability *= 1.3;
    }

    ChurnScore {
        probability: probability.min(1.0),
        confidence: 0.75,
    }
}
