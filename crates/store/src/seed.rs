//! Deterministic sample-data generation for demos and tests.
//!
//! Every generator takes an injected random source so a seeded `StdRng`
//! reproduces the same dataset run after run.

use chrono::{DateTime, Duration, Utc};
use insight_core::types::{
    CampaignPerformance, CampaignStatus, CampaignType, Customer, MarketingCampaign, Purchase,
    PurchaseChannel,
};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::provider::DataProvider;

const LOCATIONS: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
];
const GENDERS: &[&str] = &["Male", "Female", "Other"];
const INCOME_RANGES: &[&str] = &["$25k-$50k", "$50k-$75k", "$75k-$100k", "$100k-$150k", "$150k+"];
const CATEGORIES: &[&str] = &[
    "Electronics",
    "Fashion",
    "Home & Garden",
    "Books",
    "Sports",
    "Beauty",
    "Automotive",
];
const PRODUCTS: &[&str] = &[
    "PROD001", "PROD002", "PROD003", "PROD004", "PROD005", "PROD006", "PROD007", "PROD008",
    "PROD009", "PROD010",
];
const CAMPAIGN_NAMES: &[&str] = &[
    "Summer Fashion Sale",
    "Black Friday Electronics Blowout",
    "New Year New You Campaign",
    "Spring Home & Garden Collection",
    "Back to School Tech Deals",
    "Holiday Beauty Bonanza",
    "Winter Sports Equipment Sale",
    "Valentine's Day Special",
    "Mother's Day Gift Guide",
    "Father's Day Automotive Deals",
];
const TARGET_SEGMENTS: &[&str] = &[
    "High Value Customers",
    "Young Adults 18-25",
    "Frequent Buyers",
    "At-Risk Customers",
    "New Customers",
];

fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Generate customers with age-banded spending profiles.
pub fn generate_customers(rng: &mut impl Rng, now: DateTime<Utc>, count: usize) -> Vec<Customer> {
    let mut customers = Vec::with_capacity(count);

    for i in 0..count {
        let registration_date = now - Duration::days(rng.gen_range(0..730));
        let age: u32 = rng.gen_range(18..78);

        // Older cohorts spend more and buy more often.
        let (total_spent, purchase_frequency) = if age < 25 {
            (rng.gen_range(50..850) as f64, rng.gen_range(1..9))
        } else if age < 40 {
            (rng.gen_range(200..2200) as f64, rng.gen_range(3..18))
        } else {
            (rng.gen_range(500..5500) as f64, rng.gen_range(5..30))
        };

        let last_purchase_date = if rng.gen_bool(0.8) {
            let days_since_registration = (now - registration_date).num_days().max(1);
            Some(now - Duration::days(rng.gen_range(0..days_since_registration)))
        } else {
            None
        };

        customers.push(Customer {
            id: Uuid::new_v4(),
            customer_id: format!("CUST{:05}", i + 1),
            age,
            gender: pick(rng, GENDERS).to_string(),
            location: pick(rng, LOCATIONS).to_string(),
            income_range: pick(rng, INCOME_RANGES).to_string(),
            registration_date,
            last_purchase_date,
            total_spent,
            purchase_frequency,
            preferred_category: pick(rng, CATEGORIES).to_string(),
            created_at: now,
            updated_at: now,
        });
    }
    customers
}

/// Generate purchases dated between each buyer's registration and now,
/// priced by category.
pub fn generate_purchases(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    count: usize,
    customers: &[Customer],
) -> Vec<Purchase> {
    let mut purchases = Vec::with_capacity(count);

    for _ in 0..count {
        let customer = pick(rng, customers);
        let days_since_registration = (now - customer.registration_date).num_days().max(1);
        let purchase_date =
            customer.registration_date + Duration::days(rng.gen_range(0..days_since_registration));

        let category = pick(rng, CATEGORIES).to_string();
        let amount = match category.as_str() {
            "Electronics" => rng.gen_range(100..1100) as f64,
            "Fashion" => rng.gen_range(25..225) as f64,
            "Home & Garden" => rng.gen_range(50..350) as f64,
            "Automotive" => rng.gen_range(200..1000) as f64,
            _ => rng.gen_range(15..165) as f64,
        };

        purchases.push(Purchase {
            id: Uuid::new_v4(),
            customer_id: customer.customer_id.clone(),
            product_id: pick(rng, PRODUCTS).to_string(),
            category,
            amount,
            quantity: rng.gen_range(1..4),
            purchase_date,
            channel: if rng.gen_bool(0.5) {
                PurchaseChannel::Online
            } else {
                PurchaseChannel::Store
            },
            created_at: now,
        });
    }
    purchases
}

/// Generate campaigns with budgets scaled by channel type and status
/// derived from the schedule.
pub fn generate_campaigns(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    count: usize,
) -> Vec<MarketingCampaign> {
    let types = [
        CampaignType::Email,
        CampaignType::Social,
        CampaignType::Display,
        CampaignType::Search,
        CampaignType::Influencer,
    ];

    let mut campaigns = Vec::with_capacity(count);
    for i in 0..count {
        let start_date = now - Duration::days(rng.gen_range(0..365));
        let end_date = start_date + Duration::days(rng.gen_range(7..67));

        let status = if end_date < now {
            CampaignStatus::Completed
        } else if start_date < now {
            CampaignStatus::Active
        } else {
            CampaignStatus::Paused
        };

        let campaign_type = *pick(rng, &types);
        let budget = match campaign_type {
            CampaignType::Search => rng.gen_range(5_000..25_000) as f64,
            CampaignType::Display => rng.gen_range(3_000..18_000) as f64,
            CampaignType::Social => rng.gen_range(2_000..12_000) as f64,
            CampaignType::Email => rng.gen_range(500..3_500) as f64,
            CampaignType::Influencer => rng.gen_range(10_000..50_000) as f64,
        };

        campaigns.push(MarketingCampaign {
            id: Uuid::new_v4(),
            campaign_id: format!("CAMP{:04}", i + 1),
            name: pick(rng, CAMPAIGN_NAMES).to_string(),
            campaign_type,
            target_segment: pick(rng, TARGET_SEGMENTS).to_string(),
            budget,
            start_date,
            end_date,
            status,
            created_at: now,
            updated_at: now,
        });
    }
    campaigns
}

/// Generate one performance row per campaign day, with metrics derived at
/// creation time the same way the ingest path derives them.
pub fn generate_performance(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    campaigns: &[MarketingCampaign],
) -> Vec<CampaignPerformance> {
    let mut rows = Vec::new();

    for campaign in campaigns {
        let days = (campaign.end_date - campaign.start_date).num_days().max(1);

        for d in 0..days {
            let impressions: u64 = rng.gen_range(1_000..11_000);
            let clicks: u64 = 50 + rng.gen_range(0..impressions / 10);
            let conversions: u64 = 5 + rng.gen_range(0..clicks / 5);
            let revenue = (conversions * rng.gen_range(50..250)) as f64;
            let cost = impressions as f64 * 0.001 * (0.5 + rng.gen::<f64>());

            let (ctr, cpc, roas) =
                CampaignPerformance::derive_metrics(impressions, clicks, revenue, cost);

            rows.push(CampaignPerformance {
                id: Uuid::new_v4(),
                campaign_id: campaign.campaign_id.clone(),
                impressions,
                clicks,
                conversions,
                revenue,
                cost,
                ctr,
                cpc,
                roas,
                date: campaign.start_date + Duration::days(d),
                created_at: now,
            });
        }
    }
    rows
}

/// Populate a store with a full sample dataset.
pub fn populate(store: &dyn DataProvider, rng: &mut impl Rng, now: DateTime<Utc>) {
    let customers = generate_customers(rng, now, 50);
    let purchases = generate_purchases(rng, now, 200, &customers);
    let campaigns = generate_campaigns(rng, now, 10);
    let performance = generate_performance(rng, now, &campaigns);

    info!(
        customers = customers.len(),
        purchases = purchases.len(),
        campaigns = campaigns.len(),
        performance_rows = performance.len(),
        "Seeding sample data"
    );

    for customer in customers {
        store.insert_customer(customer);
    }
    for purchase in purchases {
        store.insert_purchase(purchase);
    }
    for campaign in campaigns {
        store.insert_campaign(campaign);
    }
    for row in performance {
        store.insert_performance(row);
    }
}
