//! Conversion-maximization deep dive: a flat 25% uplift projection with a
//! landing-page / testing / retargeting programme.

use serde::{Deserialize, Serialize};

use crate::metrics::CampaignMetrics;

const IMPROVEMENT_RATE: f64 = 0.25;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOptimization {
    pub campaign_id: String,
    pub current_conversions: u64,
    pub projected_conversions: u64,
    pub improvement_percentage: f64,
    pub current_conversion_rate: f64,
    pub recommendations: Vec<String>,
    pub implementation_plan: Vec<String>,
    pub expected_timeline: String,
}

pub fn plan(campaign_id: &str, metrics: &CampaignMetrics) -> ConversionOptimization {
    let current_conversion_rate = metrics.overall_conversion_rate();
    let projected_conversions =
        (metrics.total_conversions as f64 * (1.0 + IMPROVEMENT_RATE)).round() as u64;

    let recommendations = vec![
        "Optimize landing page load speed and mobile experience".to_string(),
        "A/B test different call-to-action buttons and messaging".to_string(),
        "Implement retargeting campaigns for website visitors".to_string(),
        "Improve ad copy relevance and alignment with landing pages".to_string(),
        "Add social proof and customer testimonials to landing pages".to_string(),
        "Implement conversion tracking for better optimization".to_string(),
    ];

    let implementation_plan = vec![
        "Week 1-2: Audit and optimize landing page performance".to_string(),
        "Week 3-4: Launch A/B tests for ad copy and CTAs".to_string(),
        "Week 5-6: Implement retargeting pixel and campaigns".to_string(),
        "Week 7-8: Add social proof elements to key pages".to_string(),
        "Week 9-10: Analyze results and scale winning variations".to_string(),
        "Week 11-12: Continuous optimization based on performance data".to_string(),
    ];

    // Campaigns converting below 1% need foundational fixes before the
    // uplift shows up.
    let expected_timeline = if current_conversion_rate < 1.0 {
        "12-16 weeks for substantial gains"
    } else {
        "8-12 weeks to see significant improvement"
    };

    ConversionOptimization {
        campaign_id: campaign_id.to_string(),
        current_conversions: metrics.total_conversions,
        projected_conversions,
        improvement_percentage: IMPROVEMENT_RATE * 100.0,
        current_conversion_rate,
        recommendations,
        implementation_plan,
        expected_timeline: expected_timeline.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::row;

    #[test]
    fn test_projection_rounds_quarter_uplift() {
        let metrics = CampaignMetrics::from_rows(&[row("CAMP0001", 10_000, 500, 30, 2500.0, 1000.0)]);
        let plan = plan("CAMP0001", &metrics);

        assert_eq!(plan.current_conversions, 30);
        // 30 * 1.25 = 37.5, rounds up.
        assert_eq!(plan.projected_conversions, 38);
        assert_eq!(plan.improvement_percentage, 25.0);
        assert_eq!(plan.recommendations.len(), 6);
        assert_eq!(plan.implementation_plan.len(), 6);
    }

    #[test]
    fn test_timeline_stretches_for_weak_conversion_rates() {
        // 3 conversions over 500 clicks: 0.6% conversion rate.
        let weak = CampaignMetrics::from_rows(&[row("CAMP0001", 10_000, 500, 3, 150.0, 1000.0)]);
        assert_eq!(
            plan("CAMP0001", &weak).expected_timeline,
            "12-16 weeks for substantial gains"
        );

        // 40 conversions over 500 clicks: 8%.
        let healthy = CampaignMetrics::from_rows(&[row("CAMP0001", 10_000, 500, 40, 2000.0, 1000.0)]);
        assert_eq!(
            plan("CAMP0001", &healthy).expected_timeline,
            "8-12 weeks to see significant improvement"
        );
    }
}
