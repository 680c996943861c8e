//! The logical query contract between the analytics engines and whatever
//! owns the records. Engines never own storage; they read snapshots through
//! this trait and write their derived results back through it.

use chrono::{DateTime, Utc};
use insight_core::types::{
    CampaignPerformance, Customer, CustomerRollup, CustomerSegment, MarketingCampaign,
    PredictionResult, Purchase,
};
use insight_core::InsightResult;

pub trait DataProvider: Send + Sync {
    /// Page through the customer population, ordered by `customer_id`.
    fn find_customers(&self, limit: usize, offset: usize) -> Vec<Customer>;

    /// Look up a single customer by its domain id.
    fn find_customer(&self, customer_id: &str) -> InsightResult<Customer>;

    /// All purchases for one customer. With `newest_first` the ledger is
    /// ordered by purchase date descending, otherwise ascending.
    fn find_purchases_by_customer(&self, customer_id: &str, newest_first: bool) -> Vec<Purchase>;

    fn find_campaigns(&self) -> Vec<MarketingCampaign>;

    fn find_campaign(&self, campaign_id: &str) -> InsightResult<MarketingCampaign>;

    /// All performance rows recorded for one campaign.
    fn find_performance_by_campaign(&self, campaign_id: &str) -> Vec<CampaignPerformance>;

    fn insert_customer(&self, customer: Customer);

    fn insert_purchase(&self, purchase: Purchase);

    fn insert_campaign(&self, campaign: MarketingCampaign);

    fn insert_performance(&self, performance: CampaignPerformance);

    /// Append a segment produced by a segmentation run.
    fn insert_segment(&self, segment: CustomerSegment);

    /// Append to the prediction audit trail.
    fn insert_prediction(&self, prediction: PredictionResult);

    /// Overwrite the denormalized rollup fields on a customer.
    /// Last write wins between concurrent rollups of the same customer.
    fn update_customer_rollup(
        &self,
        customer_id: &str,
        rollup: CustomerRollup,
        updated_at: DateTime<Utc>,
    ) -> InsightResult<()>;

    // ─── Dashboard aggregates ───────────────────────────────────────────

    fn count_customers(&self) -> usize;

    fn count_campaigns(&self) -> usize;

    fn count_active_campaigns(&self) -> usize;

    /// Purchases whose `purchase_date` falls inside the inclusive window,
    /// or the whole ledger when no window is given.
    fn purchases_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<Purchase>;
}
