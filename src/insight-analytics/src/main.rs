//! Insight Analytics — deterministic customer-intelligence engine over
//! customer, purchase, and campaign-performance records.
//!
//! Main entry point: seeds a development dataset, then exercises the
//! segmentation, prediction, and optimization engines end to end and logs
//! the results.

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use insight_core::types::{
    OptimizationObjective, OptimizationRequest, PredictionRequest, PredictionType,
    PurchaseChannel, SegmentationRequest,
};
use insight_core::AppConfig;
use insight_ingest::recorder::NewPurchase;
use insight_ingest::{rollup_channel, Recorder};
use insight_optimization::OptimizationEngine;
use insight_prediction::PredictionEngine;
use insight_reporting::DashboardEngine;
use insight_segmentation::SegmentationEngine;
use insight_store::{seed, DataProvider, MemoryStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "insight-analytics")]
#[command(about = "Customer segmentation, behavioral prediction, and campaign optimization")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "INSIGHT__NODE_ID")]
    node_id: Option<String>,

    /// Seed for the sample-data generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Skip sample-data seeding (start with an empty store)
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Insight Analytics starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }

    info!(
        node_id = %config.node_id,
        scan_limit = config.segmentation.scan_limit,
        rollup_queue = config.rollup.queue_capacity,
        "Configuration loaded"
    );

    // Store, rollup worker, and engines.
    let provider: Arc<dyn DataProvider> = Arc::new(MemoryStore::new());

    let (rollup_queue, rollup_worker) =
        rollup_channel(provider.clone(), config.rollup.queue_capacity);
    tokio::spawn(rollup_worker.run());

    let recorder = Recorder::new(provider.clone(), rollup_queue);
    let segmentation = SegmentationEngine::new(provider.clone(), &config.segmentation);
    let predictions = PredictionEngine::new(provider.clone());
    let optimization = OptimizationEngine::new(provider.clone());
    let dashboard = DashboardEngine::new(provider.clone());

    if !cli.no_seed {
        let mut rng = StdRng::seed_from_u64(cli.seed);
        seed::populate(provider.as_ref(), &mut rng, Utc::now());
    }

    // ─── Segmentation ───────────────────────────────────────────────────
    let segments = segmentation.segment_customers(&SegmentationRequest {
        algorithm: "tertile".to_string(),
        features: vec!["total_spent".to_string(), "purchase_frequency".to_string()],
    })?;
    for segment in &segments {
        info!(
            segment_id = %segment.segment_id,
            name = %segment.name,
            size = segment.size,
            criteria = %serde_json::to_string(&segment.criteria)?,
            "Segment computed"
        );
    }

    // ─── Ingest: record a purchase and await its rollup ─────────────────
    let sample_customer = provider
        .find_customers(1, 0)
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("store has no customers"))?;

    let (purchase, ticket) = recorder.record_purchase(NewPurchase {
        customer_id: sample_customer.customer_id.clone(),
        product_id: "PROD001".to_string(),
        category: sample_customer.preferred_category.clone(),
        amount: 129.90,
        quantity: 1,
        purchase_date: Utc::now(),
        channel: PurchaseChannel::Online,
    });
    let rollup_status = ticket.wait().await;
    info!(
        customer_id = %purchase.customer_id,
        amount = purchase.amount,
        rollup_status = ?rollup_status,
        "Purchase recorded"
    );

    // ─── Predictions for the sample customer ────────────────────────────
    for prediction_type in [
        PredictionType::Churn,
        PredictionType::Ltv,
        PredictionType::NextPurchase,
        PredictionType::LtvAdvanced,
        PredictionType::NextPurchaseAdvanced,
    ] {
        let result = predictions.predict(&PredictionRequest {
            customer_id: sample_customer.customer_id.clone(),
            prediction_type,
        })?;
        info!(
            customer_id = %result.customer_id,
            prediction_type = ?result.prediction_type,
            probability = result.probability,
            value = result.value,
            confidence = result.confidence,
            "Prediction"
        );
    }

    // ─── Optimization for the first campaign with performance data ──────
    let campaign = provider
        .find_campaigns()
        .into_iter()
        .find(|c| !provider.find_performance_by_campaign(&c.campaign_id).is_empty())
        .ok_or_else(|| anyhow::anyhow!("store has no campaign with performance data"))?;

    for objective in [
        OptimizationObjective::MaximizeRoas,
        OptimizationObjective::MinimizeCost,
        OptimizationObjective::MaximizeConversions,
    ] {
        let report = optimization.optimize_campaign(&OptimizationRequest {
            campaign_id: campaign.campaign_id.clone(),
            objective,
        })?;
        info!(
            campaign_id = %report.campaign_id,
            objective = ?report.objective,
            score = report.optimization_score,
            report = %serde_json::to_string(&report)?,
            "Optimization report"
        );
    }

    let cost_plan = optimization.minimize_campaign_cost(&campaign.campaign_id)?;
    info!(
        campaign_id = %campaign.campaign_id,
        current_cost = cost_plan.current_cost,
        projected_savings = cost_plan.projected_savings,
        risk = %cost_plan.risk_assessment,
        "Cost minimization plan"
    );

    let conversion_plan = optimization.maximize_campaign_conversions(&campaign.campaign_id)?;
    info!(
        campaign_id = %campaign.campaign_id,
        current = conversion_plan.current_conversions,
        projected = conversion_plan.projected_conversions,
        timeline = %conversion_plan.expected_timeline,
        "Conversion maximization plan"
    );

    // ─── Dashboard ──────────────────────────────────────────────────────
    let snapshot = dashboard.snapshot(None);
    info!(snapshot = %serde_json::to_string(&snapshot)?, "Dashboard snapshot");

    info!("Insight Analytics run complete");
    Ok(())
}
