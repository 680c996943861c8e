//! Headline metrics for the analytics dashboard.

use std::sync::Arc;

use chrono::Utc;
use insight_core::types::DateRange;
use insight_store::DataProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_customers: usize,
    pub total_purchases: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    pub generated_at: chrono::DateTime<Utc>,
}

pub struct DashboardEngine {
    provider: Arc<dyn DataProvider>,
}

impl DashboardEngine {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Aggregate headline metrics, optionally restricted to purchases
    /// inside a date window. Customer and campaign counts always cover
    /// the whole store.
    pub fn snapshot(&self, range: Option<DateRange>) -> DashboardSnapshot {
        let purchases = self
            .provider
            .purchases_between(range.map(|r| r.start), range.map(|r| r.end));

        let total_revenue: f64 = purchases.iter().map(|p| p.amount).sum();
        let avg_order_value = if purchases.is_empty() {
            0.0
        } else {
            total_revenue / purchases.len() as f64
        };

        debug!(
            purchases = purchases.len(),
            total_revenue,
            "Dashboard aggregates computed"
        );

        DashboardSnapshot {
            total_customers: self.provider.count_customers(),
            total_purchases: purchases.len(),
            total_revenue,
            avg_order_value,
            total_campaigns: self.provider.count_campaigns(),
            active_campaigns: self.provider.count_active_campaigns(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use insight_core::types::{Customer, Purchase, PurchaseChannel};
    use uuid::Uuid;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn purchase(amount: f64, days_ago: i64) -> Purchase {
        let date = now() - Duration::days(days_ago);
        Purchase {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            product_id: "PROD001".to_string(),
            category: "Books".to_string(),
            amount,
            quantity: 1,
            purchase_date: date,
            channel: PurchaseChannel::Store,
            created_at: date,
        }
    }

    fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            age: 50,
            gender: "Male".to_string(),
            location: "Philadelphia".to_string(),
            income_range: "$150k+".to_string(),
            registration_date: now() - Duration::days(500),
            last_purchase_date: None,
            total_spent: 0.0,
            purchase_frequency: 0,
            preferred_category: "Home & Garden".to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_snapshot_over_whole_store() {
        let store = Arc::new(insight_store::MemoryStore::new());
        store.insert_customer(customer());
        store.insert_purchase(purchase(100.0, 5));
        store.insert_purchase(purchase(50.0, 40));

        let engine = DashboardEngine::new(store as Arc<dyn DataProvider>);
        let snapshot = engine.snapshot(None);

        assert_eq!(snapshot.total_customers, 1);
        assert_eq!(snapshot.total_purchases, 2);
        assert_eq!(snapshot.total_revenue, 150.0);
        assert_eq!(snapshot.avg_order_value, 75.0);
    }

    #[test]
    fn test_snapshot_respects_date_window() {
        let store = Arc::new(insight_store::MemoryStore::new());
        store.insert_customer(customer());
        store.insert_purchase(purchase(100.0, 5));
        store.insert_purchase(purchase(50.0, 40));

        let engine = DashboardEngine::new(store as Arc<dyn DataProvider>);
        let snapshot = engine.snapshot(Some(DateRange {
            start: now() - Duration::days(10),
            end: now(),
        }));

        assert_eq!(snapshot.total_purchases, 1);
        assert_eq!(snapshot.total_revenue, 100.0);
    }

    #[test]
    fn test_empty_store_has_zeroed_averages() {
        let store = Arc::new(insight_store::MemoryStore::new());
        let engine = DashboardEngine::new(store as Arc<dyn DataProvider>);
        let snapshot = engine.snapshot(None);

        assert_eq!(snapshot.total_purchases, 0);
        assert_eq!(snapshot.avg_order_value, 0.0);
    }
}
