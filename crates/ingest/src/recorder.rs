//! Record creation. Purchases additionally schedule a best-effort rollup
//! of the owning customer's denormalized aggregates; the caller gets the
//! created record immediately and a ticket it may await.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use insight_core::types::{
    CampaignPerformance, CampaignStatus, CampaignType, Customer, MarketingCampaign, Purchase,
    PurchaseChannel,
};
use insight_store::DataProvider;
use tracing::debug;
use uuid::Uuid;

use crate::rollup::{RollupQueue, RollupTicket};

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub customer_id: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub income_range: String,
    pub registration_date: DateTime<Utc>,
    pub preferred_category: String,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub customer_id: String,
    pub product_id: String,
    pub category: String,
    pub amount: f64,
    pub quantity: u32,
    pub purchase_date: DateTime<Utc>,
    pub channel: PurchaseChannel,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub campaign_id: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub target_segment: String,
    pub budget: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CampaignStatus,
}

#[derive(Debug, Clone)]
pub struct NewPerformance {
    pub campaign_id: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
    pub cost: f64,
    pub date: DateTime<Utc>,
}

pub struct Recorder {
    provider: Arc<dyn DataProvider>,
    rollups: RollupQueue,
}

impl Recorder {
    pub fn new(provider: Arc<dyn DataProvider>, rollups: RollupQueue) -> Self {
        Self { provider, rollups }
    }

    /// Register a customer. Rollup fields start empty and are maintained
    /// by the rollup worker as purchases arrive.
    pub fn record_customer(&self, new: NewCustomer) -> Customer {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            customer_id: new.customer_id,
            age: new.age,
            gender: new.gender,
            location: new.location,
            income_range: new.income_range,
            registration_date: new.registration_date,
            last_purchase_date: None,
            total_spent: 0.0,
            purchase_frequency: 0,
            preferred_category: new.preferred_category,
            created_at: now,
            updated_at: now,
        };
        self.provider.insert_customer(customer.clone());
        customer
    }

    /// Append a purchase to the ledger and schedule the owning customer's
    /// rollup. The rollup is not awaited here; the customer aggregate is
    /// eventually consistent with the ledger.
    pub fn record_purchase(&self, new: NewPurchase) -> (Purchase, RollupTicket) {
        let purchase = Purchase {
            id: Uuid::new_v4(),
            customer_id: new.customer_id,
            product_id: new.product_id,
            category: new.category,
            amount: new.amount,
            quantity: new.quantity,
            purchase_date: new.purchase_date,
            channel: new.channel,
            created_at: Utc::now(),
        };
        self.provider.insert_purchase(purchase.clone());

        debug!(customer_id = %purchase.customer_id, amount = purchase.amount, "Purchase recorded");
        let ticket = self.rollups.enqueue(&purchase.customer_id);
        (purchase, ticket)
    }

    pub fn record_campaign(&self, new: NewCampaign) -> MarketingCampaign {
        let now = Utc::now();
        let campaign = MarketingCampaign {
            id: Uuid::new_v4(),
            campaign_id: new.campaign_id,
            name: new.name,
            campaign_type: new.campaign_type,
            target_segment: new.target_segment,
            budget: new.budget,
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.provider.insert_campaign(campaign.clone());
        campaign
    }

    /// Record a daily performance row. The derived ctr/cpc/roas are
    /// computed here, once, and stored with the row.
    pub fn record_performance(&self, new: NewPerformance) -> CampaignPerformance {
        let (ctr, cpc, roas) =
            CampaignPerformance::derive_metrics(new.impressions, new.clicks, new.revenue, new.cost);
        let row = CampaignPerformance {
            id: Uuid::new_v4(),
            campaign_id: new.campaign_id,
            impressions: new.impressions,
            clicks: new.clicks,
            conversions: new.conversions,
            revenue: new.revenue,
            cost: new.cost,
            ctr,
            cpc,
            roas,
            date: new.date,
            created_at: Utc::now(),
        };
        self.provider.insert_performance(row.clone());
        row
    }
}
