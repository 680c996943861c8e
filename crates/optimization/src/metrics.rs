//! Aggregation of a campaign's raw performance rows into the summary
//! metrics every optimization path works from.

use insight_core::types::CampaignPerformance;
use serde::{Deserialize, Serialize};

/// Summed counters plus arithmetic means of the per-row derived metrics.
///
/// The averages intentionally average the stored per-row ctr/cpc/roas
/// rather than recomputing them from the totals, so single outlier days
/// weigh the same as high-volume days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    pub avg_roas: f64,
    pub avg_ctr: f64,
    pub avg_cpc: f64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub total_revenue: f64,
    pub total_cost: f64,
}

impl CampaignMetrics {
    /// Aggregate a non-empty set of performance rows.
    pub fn from_rows(rows: &[CampaignPerformance]) -> Self {
        let mut metrics = Self {
            avg_roas: 0.0,
            avg_ctr: 0.0,
            avg_cpc: 0.0,
            total_impressions: 0,
            total_clicks: 0,
            total_conversions: 0,
            total_revenue: 0.0,
            total_cost: 0.0,
        };

        for row in rows {
            metrics.avg_roas += row.roas;
            metrics.avg_ctr += row.ctr;
            metrics.avg_cpc += row.cpc;
            metrics.total_impressions += row.impressions;
            metrics.total_clicks += row.clicks;
            metrics.total_conversions += row.conversions;
            metrics.total_revenue += row.revenue;
            metrics.total_cost += row.cost;
        }

        let count = rows.len() as f64;
        metrics.avg_roas /= count;
        metrics.avg_ctr /= count;
        metrics.avg_cpc /= count;
        metrics
    }

    /// Cost per click over the whole window.
    pub fn overall_cpc(&self) -> f64 {
        if self.total_clicks > 0 {
            self.total_cost / self.total_clicks as f64
        } else {
            0.0
        }
    }

    /// Return on ad spend over the whole window.
    pub fn overall_roas(&self) -> f64 {
        if self.total_cost > 0.0 {
            self.total_revenue / self.total_cost
        } else {
            0.0
        }
    }

    /// Conversions per click as a percentage, over the whole window.
    pub fn overall_conversion_rate(&self) -> f64 {
        if self.total_clicks > 0 {
            self.total_conversions as f64 / self.total_clicks as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use insight_core::types::CampaignPerformance;
    use uuid::Uuid;

    pub fn row(
        campaign_id: &str,
        impressions: u64,
        clicks: u64,
        conversions: u64,
        revenue: f64,
        cost: f64,
    ) -> CampaignPerformance {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let (ctr, cpc, roas) =
            CampaignPerformance::derive_metrics(impressions, clicks, revenue, cost);
        CampaignPerformance {
            id: Uuid::new_v4(),
            campaign_id: campaign_id.to_string(),
            impressions,
            clicks,
            conversions,
            revenue,
            cost,
            ctr,
            cpc,
            roas,
            date,
            created_at: date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;

    #[test]
    fn test_single_row_aggregation() {
        let rows = vec![row("CAMP0001", 10_000, 500, 40, 2500.0, 1000.0)];
        let metrics = CampaignMetrics::from_rows(&rows);

        assert!((metrics.avg_ctr - 5.0).abs() < 1e-12);
        assert!((metrics.avg_cpc - 2.0).abs() < 1e-12);
        assert!((metrics.avg_roas - 2.5).abs() < 1e-12);
        assert_eq!(metrics.total_conversions, 40);
    }

    #[test]
    fn test_averages_are_row_means_not_recomputed() {
        // Row A: CTR 10, Row B: CTR 1. The row mean is 5.5 even though the
        // pooled CTR (200 clicks / 11000 impressions) would be ~1.8.
        let rows = vec![
            row("CAMP0001", 1_000, 100, 10, 400.0, 100.0),
            row("CAMP0001", 10_000, 100, 10, 400.0, 400.0),
        ];
        let metrics = CampaignMetrics::from_rows(&rows);

        assert!((metrics.avg_ctr - 5.5).abs() < 1e-12);
        assert_eq!(metrics.total_impressions, 11_000);
        assert_eq!(metrics.total_clicks, 200);
    }

    #[test]
    fn test_overall_ratios_guard_zero_denominators() {
        let rows = vec![row("CAMP0001", 0, 0, 0, 0.0, 0.0)];
        let metrics = CampaignMetrics::from_rows(&rows);

        assert_eq!(metrics.overall_cpc(), 0.0);
        assert_eq!(metrics.overall_roas(), 0.0);
        assert_eq!(metrics.overall_conversion_rate(), 0.0);
    }
}
