//! Next-purchase timing estimation.
//!
//! The basic formula infers a purchase interval from account age and the
//! rollup frequency. The advanced formula measures the actual cadence from
//! the ledger and scores its consistency with a variance check.

use chrono::{DateTime, Utc};
use insight_core::types::{Customer, Purchase};

use crate::history::{days_since, mean, purchase_intervals, std_dev};

const DEFAULT_INTERVAL_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextPurchaseEstimate {
    pub days_until_next: f64,
    pub probability: f64,
    pub confidence: f64,
}

/// Interval from registration-age divided by frequency, when both a
/// repeat-purchase history and a last purchase date exist.
pub fn basic(customer: &Customer, as_of: DateTime<Utc>) -> NextPurchaseEstimate {
    let mut interval_days = DEFAULT_INTERVAL_DAYS;
    if customer.purchase_frequency > 1 && customer.last_purchase_date.is_some() {
        let days_since_registration = days_since(as_of, customer.registration_date);
        interval_days = days_since_registration / customer.purchase_frequency as f64;
    }

    let days_since_last_purchase = customer
        .last_purchase_date
        .map(|date| days_since(as_of, date))
        .unwrap_or(0.0);

    NextPurchaseEstimate {
        days_until_next: (interval_days - days_since_last_purchase).max(0.0),
        probability: 0.0,
        confidence: 0.60,
    }
}

/// Cadence-based estimate over a newest-first ledger. Requires at least
/// two purchases; otherwise falls back to the basic formula.
pub fn advanced(
    customer: &Customer,
    purchases: &[Purchase],
    as_of: DateTime<Utc>,
) -> NextPurchaseEstimate {
    if purchases.len() < 2 {
        let fallback = basic(customer, as_of);
        return NextPurchaseEstimate {
            days_until_next: fallback.days_until_next,
            probability: 0.6,
            confidence: 0.65,
        };
    }

    let intervals = purchase_intervals(purchases);
    if intervals.is_empty() {
        return NextPurchaseEstimate {
            days_until_next: DEFAULT_INTERVAL_DAYS,
            probability: 0.5,
            confidence: 0.5,
        };
    }

    let avg_interval = mean(&intervals);
    let interval_std_dev = std_dev(&intervals, avg_interval);
    let days_since_last_purchase = days_since(as_of, purchases[0].purchase_date);

    let days_until_next = (avg_interval - days_since_last_purchase).max(0.0);

    // Consistent cadence raises the estimate's probability, erratic
    // cadence lowers it.
    let mut probability: f64 = 0.7;
    if interval_std_dev < avg_interval * 0.3 {
        probability = 0.85;
    } else if interval_std_dev > avg_interval * 0.7 {
        probability = 0.5;
    }

    // Overdue customers are less likely to return on schedule; a very
    // recent purchase points the other way.
    if days_since_last_purchase > avg_interval * 1.5 {
        probability *= 0.8;
    } else if days_since_last_purchase < avg_interval * 0.5 {
        probability *= 1.1;
    }

    let confidence = if intervals.len() > 6 {
        0.85
    } else if intervals.len() > 3 {
        0.80
    } else {
        0.75
    };

    NextPurchaseEstimate {
        days_until_next,
        probability: probability.min(1.0),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use insight_core::types::PurchaseChannel;
    use uuid::Uuid;

    fn customer(
        purchase_frequency: u32,
        registration_days_ago: i64,
        last_purchase_days_ago: Option<i64>,
        as_of: DateTime<Utc>,
    ) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            age: 30,
            gender: "Other".to_string(),
            location: "Houston".to_string(),
            income_range: "$25k-$50k".to_string(),
            registration_date: as_of - Duration::days(registration_days_ago),
            last_purchase_date: last_purchase_days_ago.map(|d| as_of - Duration::days(d)),
            total_spent: 300.0,
            purchase_frequency,
            preferred_category: "Fashion".to_string(),
            created_at: as_of,
            updated_at: as_of,
        }
    }

    fn purchase_days_ago(days: i64, as_of: DateTime<Utc>) -> Purchase {
        let date = as_of - Duration::days(days);
        Purchase {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            product_id: "PROD003".to_string(),
            category: "Fashion".to_string(),
            amount: 40.0,
            quantity: 1,
            purchase_date: date,
            channel: PurchaseChannel::Store,
            created_at: date,
        }
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_basic_derives_interval_from_account_age() {
        let as_of = as_of();
        // Registered 120 days ago, 4 purchases, last one 10 days ago:
        // interval 30, so 20 days remain.
        let customer = customer(4, 120, Some(10), as_of);
        let estimate = basic(&customer, as_of);
        assert!((estimate.days_until_next - 20.0).abs() < 1e-9);
        assert_eq!(estimate.confidence, 0.60);
    }

    #[test]
    fn test_basic_defaults_without_history() {
        let as_of = as_of();
        let estimate = basic(&customer(0, 200, None, as_of), as_of);
        assert_eq!(estimate.days_until_next, 30.0);
    }

    #[test]
    fn test_basic_overdue_floors_at_zero() {
        let as_of = as_of();
        // Interval 30 but last purchase 45 days ago.
        let estimate = basic(&customer(4, 120, Some(45), as_of), as_of);
        assert_eq!(estimate.days_until_next, 0.0);
    }

    #[test]
    fn test_advanced_consistent_recent_cadence() {
        let as_of = as_of();
        // Gaps [10, 10, 10] with the last purchase 4.5 days ago: stddev 0
        // raises probability to 0.85, then the recent-purchase bump makes
        // it 0.935; 5.5 days remain until the next expected purchase.
        let purchases: Vec<Purchase> = [108i64, 348, 588, 828]
            .iter()
            .map(|hours| {
                let mut p = purchase_days_ago(0, as_of);
                p.purchase_date = as_of - Duration::hours(*hours);
                p
            })
            .collect();

        let estimate = advanced(&customer(4, 120, Some(4), as_of), &purchases, as_of);
        assert!((estimate.days_until_next - 5.5).abs() < 1e-9);
        assert!((estimate.probability - 0.935).abs() < 1e-9);
        assert_eq!(estimate.confidence, 0.75);
    }

    #[test]
    fn test_advanced_erratic_cadence_lowers_probability() {
        let as_of = as_of();
        // Gaps [2, 60, 5, 90]: stddev well above 0.7x the mean.
        let purchases: Vec<Purchase> = [20, 22, 82, 87, 177]
            .iter()
            .map(|d| purchase_days_ago(*d, as_of))
            .collect();

        let estimate = advanced(&customer(5, 400, Some(20), as_of), &purchases, as_of);
        assert!((estimate.probability - 0.5).abs() < 1e-9);
        assert_eq!(estimate.confidence, 0.80);
    }

    #[test]
    fn test_advanced_overdue_discount() {
        let as_of = as_of();
        // Gaps [10, 10] but last purchase 20 days ago: overdue beyond
        // 1.5x the mean interval discounts the consistent-cadence 0.85.
        let purchases: Vec<Purchase> = [20, 30, 40]
            .iter()
            .map(|d| purchase_days_ago(*d, as_of))
            .collect();

        let estimate = advanced(&customer(3, 120, Some(20), as_of), &purchases, as_of);
        assert_eq!(estimate.days_until_next, 0.0);
        assert!((estimate.probability - 0.85 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_advanced_short_ledger_falls_back() {
        let as_of = as_of();
        let purchases = vec![purchase_days_ago(5, as_of)];
        let customer = customer(1, 90, Some(5), as_of);

        let estimate = advanced(&customer, &purchases, as_of);
        assert_eq!(estimate.probability, 0.6);
        assert_eq!(estimate.confidence, 0.65);
        assert_eq!(estimate.days_until_next, basic(&customer, as_of).days_until_next);
    }

    #[test]
    fn test_advanced_simultaneous_purchases_yield_default() {
        let as_of = as_of();
        let purchases = vec![purchase_days_ago(5, as_of), purchase_days_ago(5, as_of)];

        let estimate = advanced(&customer(2, 90, Some(5), as_of), &purchases, as_of);
        assert_eq!(estimate.days_until_next, 30.0);
        assert_eq!(estimate.probability, 0.5);
        assert_eq!(estimate.confidence, 0.5);
    }
}
