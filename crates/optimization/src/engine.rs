//! Objective dispatch for the optimization engine.

use std::sync::Arc;

use insight_core::types::{CampaignPerformance, OptimizationObjective, OptimizationRequest};
use insight_core::{InsightError, InsightResult};
use insight_store::DataProvider;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conversions::{self, ConversionOptimization};
use crate::cost::{self, CostOptimization};
use crate::metrics::CampaignMetrics;

/// Objective-specific advisory output for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub campaign_id: String,
    pub objective: OptimizationObjective,
    pub current_metrics: CampaignMetrics,
    pub recommendations: Vec<String>,
    /// Extra urgent actions, present when the campaign underperforms the
    /// objective's health threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_actions: Option<Vec<String>>,
    /// Only set for the minimize-cost objective: 15% of current spend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_budget_reduction: Option<f64>,
    pub optimization_score: f64,
}

pub struct OptimizationEngine {
    provider: Arc<dyn DataProvider>,
}

impl OptimizationEngine {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Aggregate a campaign's performance history and produce
    /// objective-specific recommendations plus the 0-100 score.
    pub fn optimize_campaign(
        &self,
        request: &OptimizationRequest,
    ) -> InsightResult<OptimizationReport> {
        let rows = self.performance_for(&request.campaign_id)?;
        let metrics = CampaignMetrics::from_rows(&rows);

        let mut priority_actions = None;
        let mut suggested_budget_reduction = None;

        let recommendations: Vec<String> = match request.objective {
            OptimizationObjective::MaximizeRoas => {
                if metrics.avg_roas < 2.0 {
                    priority_actions = Some(vec![
                        "Review and optimize targeting criteria".to_string(),
                        "Improve ad creative and messaging".to_string(),
                        "Consider pausing underperforming ad sets".to_string(),
                    ]);
                }
                vec![
                    "Focus budget on high-performing segments".to_string(),
                    "Reduce spend on low ROAS keywords/audiences".to_string(),
                    "Increase bids for high-converting demographics".to_string(),
                ]
            }
            OptimizationObjective::MinimizeCost => {
                suggested_budget_reduction = Some(metrics.total_cost * 0.15);
                vec![
                    "Lower bids on expensive keywords".to_string(),
                    "Focus on organic reach opportunities".to_string(),
                    "Optimize ad scheduling for peak performance hours".to_string(),
                ]
            }
            OptimizationObjective::MaximizeConversions => {
                if metrics.total_conversions < 100 {
                    priority_actions = Some(vec![
                        "Review conversion tracking setup".to_string(),
                        "Optimize landing page experience".to_string(),
                        "Test different call-to-action messages".to_string(),
                    ]);
                }
                vec![
                    "Increase budget for high-converting campaigns".to_string(),
                    "Expand successful audience segments".to_string(),
                    "Test new ad formats and placements".to_string(),
                ]
            }
        };

        let optimization_score =
            optimization_score(metrics.avg_roas, metrics.avg_ctr, metrics.total_conversions);

        info!(
            campaign_id = %request.campaign_id,
            objective = ?request.objective,
            rows = rows.len(),
            score = optimization_score,
            "Campaign optimization computed"
        );

        Ok(OptimizationReport {
            campaign_id: request.campaign_id.clone(),
            objective: request.objective,
            current_metrics: metrics,
            recommendations,
            priority_actions,
            suggested_budget_reduction,
            optimization_score,
        })
    }

    /// Cost-minimization deep dive for one campaign.
    pub fn minimize_campaign_cost(&self, campaign_id: &str) -> InsightResult<CostOptimization> {
        let rows = self.performance_for(campaign_id)?;
        let metrics = CampaignMetrics::from_rows(&rows);
        Ok(cost::plan(campaign_id, &metrics))
    }

    /// Conversion-maximization deep dive for one campaign.
    pub fn maximize_campaign_conversions(
        &self,
        campaign_id: &str,
    ) -> InsightResult<ConversionOptimization> {
        let rows = self.performance_for(campaign_id)?;
        let metrics = CampaignMetrics::from_rows(&rows);
        Ok(conversions::plan(campaign_id, &metrics))
    }

    fn performance_for(&self, campaign_id: &str) -> InsightResult<Vec<CampaignPerformance>> {
        let rows = self.provider.find_performance_by_campaign(campaign_id);
        if rows.is_empty() {
            return Err(InsightError::NoData(format!(
                "no performance data found for campaign {campaign_id}"
            )));
        }
        Ok(rows)
    }
}

/// 0-100 score from three independently thresholded components: ROAS
/// (up to 40), CTR (up to 30), and conversion volume (up to 30).
pub fn optimization_score(avg_roas: f64, avg_ctr: f64, total_conversions: u64) -> f64 {
    let roas_component = if avg_roas >= 4.0 {
        40.0
    } else if avg_roas >= 2.0 {
        30.0
    } else if avg_roas >= 1.0 {
        20.0
    } else {
        10.0
    };

    let ctr_component = if avg_ctr >= 3.0 {
        30.0
    } else if avg_ctr >= 2.0 {
        25.0
    } else if avg_ctr >= 1.0 {
        20.0
    } else {
        10.0
    };

    let conversion_component = if total_conversions >= 100 {
        30.0
    } else if total_conversions >= 50 {
        25.0
    } else if total_conversions >= 10 {
        20.0
    } else {
        10.0
    };

    roas_component + ctr_component + conversion_component
}
