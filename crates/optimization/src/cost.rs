//! Cost-minimization deep dive: a flat 20% reduction plan with bid,
//! scheduling, and budget-shift recommendations.

use serde::{Deserialize, Serialize};

use crate::metrics::CampaignMetrics;

/// Projected share of current cost that the plan targets for savings.
const SAVINGS_RATE: f64 = 0.20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOptimization {
    pub campaign_id: String,
    pub current_cost: f64,
    pub projected_savings: f64,
    pub savings_percentage: f64,
    pub recommendations: Vec<String>,
    pub implementation_plan: Vec<String>,
    pub risk_assessment: String,
}

pub fn plan(campaign_id: &str, metrics: &CampaignMetrics) -> CostOptimization {
    let avg_cpc = metrics.overall_cpc();
    let current_roas = metrics.overall_roas();

    let recommendations = vec![
        "Reduce bids on low-performing keywords by 15-25%".to_string(),
        format!("Pause ad sets with CPC above ${:.2}", avg_cpc * 1.5),
        "Shift budget to organic reach and content marketing".to_string(),
        "Optimize ad scheduling to focus on peak performance hours".to_string(),
        "Implement negative keywords to reduce irrelevant clicks".to_string(),
    ];

    let implementation_plan = vec![
        "Week 1: Analyze keyword performance and identify high-cost, low-converting terms"
            .to_string(),
        "Week 2: Reduce bids by 15% on underperforming keywords".to_string(),
        "Week 3: Pause ad sets with CPC > 150% of average".to_string(),
        "Week 4: Reallocate 25% of budget to organic initiatives".to_string(),
        "Week 5-6: Monitor performance and adjust bids based on results".to_string(),
    ];

    // Cutting spend on a campaign that barely pays for itself risks
    // tipping it below break-even.
    let risk_assessment = if current_roas < 1.5 {
        "High Risk - Consider campaign restructuring"
    } else if current_roas < 2.0 {
        "Medium Risk - Monitor conversion rates closely"
    } else {
        "Low Risk"
    };

    CostOptimization {
        campaign_id: campaign_id.to_string(),
        current_cost: metrics.total_cost,
        projected_savings: metrics.total_cost * SAVINGS_RATE,
        savings_percentage: SAVINGS_RATE * 100.0,
        recommendations,
        implementation_plan,
        risk_assessment: risk_assessment.to_string(),
    }
}
