use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer record with denormalized purchase rollups.
///
/// `total_spent`, `purchase_frequency`, and `last_purchase_date` are
/// recomputed from the purchase ledger by a background rollup task and may
/// lag behind it. Readers must tolerate stale values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub customer_id: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub income_range: String,
    pub registration_date: DateTime<Utc>,
    pub last_purchase_date: Option<DateTime<Utc>>,
    pub total_spent: f64,
    pub purchase_frequency: u32,
    pub preferred_category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single purchase transaction. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub customer_id: String,
    pub product_id: String,
    pub category: String,
    pub amount: f64,
    pub quantity: u32,
    pub purchase_date: DateTime<Utc>,
    pub channel: PurchaseChannel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseChannel {
    Online,
    Store,
}

/// A marketing campaign as tracked by the performance ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingCampaign {
    pub id: Uuid,
    pub campaign_id: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub target_segment: String,
    pub budget: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Email,
    Social,
    Display,
    Search,
    Influencer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

/// Daily performance metrics for one campaign.
///
/// `ctr`, `cpc`, and `roas` are derived once when the row is recorded and
/// stored as-is; they are never recomputed from the raw counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub id: Uuid,
    pub campaign_id: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
    pub cost: f64,
    /// Click-through rate, clicks/impressions*100.
    pub ctr: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Return on ad spend, revenue/cost.
    pub roas: f64,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CampaignPerformance {
    /// Derived metrics for a performance row, guarded against zero
    /// denominators: `(ctr %, cpc, roas)`.
    pub fn derive_metrics(impressions: u64, clicks: u64, revenue: f64, cost: f64) -> (f64, f64, f64) {
        let ctr = if impressions > 0 {
            clicks as f64 / impressions as f64 * 100.0
        } else {
            0.0
        };
        let cpc = if clicks > 0 { cost / clicks as f64 } else { 0.0 };
        let roas = if cost > 0.0 { revenue / cost } else { 0.0 };
        (ctr, cpc, roas)
    }
}

/// A value-tier segment produced by a segmentation run. Write-once; runs
/// are not reconciled with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub id: Uuid,
    pub segment_id: String,
    pub name: String,
    pub description: String,
    pub criteria: SegmentCriteria,
    pub size: usize,
    pub created_at: DateTime<Utc>,
}

/// Threshold criteria attached to a segment. Only the bounds relevant to
/// the tier are populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentCriteria {
    pub min_total_spent: Option<f64>,
    pub min_purchase_frequency: Option<u32>,
    pub max_total_spent: Option<f64>,
    pub max_purchase_frequency: Option<u32>,
}

/// One entry in the append-only prediction audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: Uuid,
    pub customer_id: String,
    pub prediction_type: PredictionType,
    /// Only meaningful for churn and next-purchase predictions.
    pub probability: f64,
    /// Monetary for LTV predictions, days for next-purchase predictions.
    pub value: f64,
    /// Self-reported quality signal in [0,1], not a statistical guarantee.
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionType {
    Churn,
    Ltv,
    NextPurchase,
    LtvAdvanced,
    NextPurchaseAdvanced,
}

// ─── Engine Requests ────────────────────────────────────────────────────

/// Segmentation request. `algorithm` and `features` are accepted for
/// forward compatibility; the engine currently always applies the fixed
/// tertile method over spend and frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationRequest {
    pub algorithm: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub customer_id: String,
    pub prediction_type: PredictionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub campaign_id: String,
    pub objective: OptimizationObjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationObjective {
    MaximizeRoas,
    MinimizeCost,
    MaximizeConversions,
}

/// Denormalized rollup written back onto a customer after a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRollup {
    pub total_spent: f64,
    pub purchase_frequency: u32,
    pub last_purchase_date: Option<DateTime<Utc>>,
}

/// Inclusive date window used by dashboard queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_type_serializes_snake_case() {
        let json = serde_json::to_string(&PredictionType::NextPurchaseAdvanced).unwrap();
        assert_eq!(json, "\"next_purchase_advanced\"");

        let parsed: PredictionType = serde_json::from_str("\"ltv_advanced\"").unwrap();
        assert_eq!(parsed, PredictionType::LtvAdvanced);
    }

    #[test]
    fn test_unknown_prediction_type_is_rejected() {
        let parsed = serde_json::from_str::<PredictionType>("\"basket_affinity\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_derived_metrics() {
        let (ctr, cpc, roas) = CampaignPerformance::derive_metrics(10_000, 500, 2500.0, 1000.0);
        assert!((ctr - 5.0).abs() < f64::EPSILON);
        assert!((cpc - 2.0).abs() < f64::EPSILON);
        assert!((roas - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_derived_metrics_zero_denominators() {
        let (ctr, cpc, roas) = CampaignPerformance::derive_metrics(0, 0, 100.0, 0.0);
        assert_eq!(ctr, 0.0);
        assert_eq!(cpc, 0.0);
        assert_eq!(roas, 0.0);
    }

    #[test]
    fn test_objective_round_trip() {
        for objective in [
            OptimizationObjective::MaximizeRoas,
            OptimizationObjective::MinimizeCost,
            OptimizationObjective::MaximizeConversions,
        ] {
            let json = serde_json::to_string(&objective).unwrap();
            let back: OptimizationObjective = serde_json::from_str(&json).unwrap();
            assert_eq!(back, objective);
        }
    }
}
