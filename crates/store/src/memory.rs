//! In-memory `DataProvider` backed by DashMap.
//!
//! Production: replace with a document store behind the same trait.
//! This provides the full API surface for development and testing.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use insight_core::types::{
    CampaignPerformance, Customer, CustomerRollup, CustomerSegment, MarketingCampaign,
    PredictionResult, Purchase,
};
use insight_core::{InsightError, InsightResult};
use tracing::info;
use uuid::Uuid;

use crate::provider::DataProvider;

/// Thread-safe in-memory store for customers, purchases, campaigns,
/// performance rows, and the derived segment/prediction records.
#[derive(Default)]
pub struct MemoryStore {
    customers: DashMap<String, Customer>,
    purchases: DashMap<Uuid, Purchase>,
    campaigns: DashMap<String, MarketingCampaign>,
    performance: DashMap<Uuid, CampaignPerformance>,
    segments: DashMap<Uuid, CustomerSegment>,
    predictions: DashMap<Uuid, PredictionResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("Memory store initialized (in-memory, development mode)");
        Self::default()
    }

    /// All segments written so far, newest run first.
    pub fn list_segments(&self) -> Vec<CustomerSegment> {
        let mut segments: Vec<CustomerSegment> =
            self.segments.iter().map(|r| r.value().clone()).collect();
        segments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        segments
    }

    /// The prediction audit trail for one customer, newest first.
    pub fn list_predictions(&self, customer_id: &str) -> Vec<PredictionResult> {
        let mut predictions: Vec<PredictionResult> = self
            .predictions
            .iter()
            .filter(|r| r.value().customer_id == customer_id)
            .map(|r| r.value().clone())
            .collect();
        predictions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        predictions
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.len()
    }
}

impl DataProvider for MemoryStore {
    fn find_customers(&self, limit: usize, offset: usize) -> Vec<Customer> {
        let mut customers: Vec<Customer> =
            self.customers.iter().map(|r| r.value().clone()).collect();
        customers.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));
        customers.into_iter().skip(offset).take(limit).collect()
    }

    fn find_customer(&self, customer_id: &str) -> InsightResult<Customer> {
        self.customers
            .get(customer_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| InsightError::not_found("customer", customer_id))
    }

    fn find_purchases_by_customer(&self, customer_id: &str, newest_first: bool) -> Vec<Purchase> {
        let mut purchases: Vec<Purchase> = self
            .purchases
            .iter()
            .filter(|r| r.value().customer_id == customer_id)
            .map(|r| r.value().clone())
            .collect();
        if newest_first {
            purchases.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        } else {
            purchases.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date));
        }
        purchases
    }

    fn find_campaigns(&self) -> Vec<MarketingCampaign> {
        let mut campaigns: Vec<MarketingCampaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| a.campaign_id.cmp(&b.campaign_id));
        campaigns
    }

    fn find_campaign(&self, campaign_id: &str) -> InsightResult<MarketingCampaign> {
        self.campaigns
            .get(campaign_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| InsightError::not_found("campaign", campaign_id))
    }

    fn find_performance_by_campaign(&self, campaign_id: &str) -> Vec<CampaignPerformance> {
        let mut rows: Vec<CampaignPerformance> = self
            .performance
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        rows
    }

    fn insert_customer(&self, customer: Customer) {
        self.customers
            .insert(customer.customer_id.clone(), customer);
    }

    fn insert_purchase(&self, purchase: Purchase) {
        self.purchases.insert(purchase.id, purchase);
    }

    fn insert_campaign(&self, campaign: MarketingCampaign) {
        self.campaigns
            .insert(campaign.campaign_id.clone(), campaign);
    }

    fn insert_performance(&self, performance: CampaignPerformance) {
        self.performance.insert(performance.id, performance);
    }

    fn insert_segment(&self, segment: CustomerSegment) {
        self.segments.insert(segment.id, segment);
    }

    fn insert_prediction(&self, prediction: PredictionResult) {
        self.predictions.insert(prediction.id, prediction);
    }

    fn update_customer_rollup(
        &self,
        customer_id: &str,
        rollup: CustomerRollup,
        updated_at: DateTime<Utc>,
    ) -> InsightResult<()> {
        let mut entry = self
            .customers
            .get_mut(customer_id)
            .ok_or_else(|| InsightError::not_found("customer", customer_id))?;
        let customer = entry.value_mut();
        customer.total_spent = rollup.total_spent;
        customer.purchase_frequency = rollup.purchase_frequency;
        customer.last_purchase_date = rollup.last_purchase_date;
        customer.updated_at = updated_at;
        Ok(())
    }

    fn count_customers(&self) -> usize {
        self.customers.len()
    }

    fn count_campaigns(&self) -> usize {
        self.campaigns.len()
    }

    fn count_active_campaigns(&self) -> usize {
        use insight_core::types::CampaignStatus;
        self.campaigns
            .iter()
            .filter(|r| r.value().status == CampaignStatus::Active)
            .count()
    }

    fn purchases_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<Purchase> {
        self.purchases
            .iter()
            .filter(|r| {
                let date = r.value().purchase_date;
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            })
            .map(|r| r.value().clone())
            .collect()
    }
}
