//! Request dispatch for the prediction engine: look up the customer,
//! compute the requested estimate, append it to the prediction audit
//! trail, and hand it back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use insight_core::types::{PredictionRequest, PredictionResult, PredictionType};
use insight_core::InsightResult;
use insight_store::DataProvider;
use tracing::info;
use uuid::Uuid;

use crate::{churn, ltv, next_purchase};

pub struct PredictionEngine {
    provider: Arc<dyn DataProvider>,
}

impl PredictionEngine {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Compute and persist one prediction for a customer.
    pub fn predict(&self, request: &PredictionRequest) -> InsightResult<PredictionResult> {
        self.predict_as_of(request, Utc::now())
    }

    /// Like [`predict`](Self::predict) with an explicit evaluation
    /// instant; every formula is a pure function of the records and
    /// `as_of`.
    pub fn predict_as_of(
        &self,
        request: &PredictionRequest,
        as_of: DateTime<Utc>,
    ) -> InsightResult<PredictionResult> {
        let customer = self.provider.find_customer(&request.customer_id)?;

        let (probability, value, confidence) = match request.prediction_type {
            PredictionType::Churn => {
                let score = churn::score(&customer, as_of);
                (score.probability, 0.0, score.confidence)
            }
            PredictionType::Ltv => {
                let estimate = ltv::basic(&customer);
                (0.0, estimate.value, estimate.confidence)
            }
            PredictionType::NextPurchase => {
                let estimate = next_purchase::basic(&customer, as_of);
                (
                    estimate.probability,
                    estimate.days_until_next,
                    estimate.confidence,
                )
            }
            PredictionType::LtvAdvanced => {
                let history = self
                    .provider
                    .find_purchases_by_customer(&request.customer_id, true);
                let estimate = ltv::advanced(&customer, &history);
                (0.0, estimate.value, estimate.confidence)
            }
            PredictionType::NextPurchaseAdvanced => {
                let history = self
                    .provider
                    .find_purchases_by_customer(&request.customer_id, true);
                let estimate = next_purchase::advanced(&customer, &history, as_of);
                (
                    estimate.probability,
                    estimate.days_until_next,
                    estimate.confidence,
                )
            }
        };

        let result = PredictionResult {
            id: Uuid::new_v4(),
            customer_id: customer.customer_id.clone(),
            prediction_type: request.prediction_type,
            probability,
            value,
            confidence,
            created_at: as_of,
        };

        self.provider.insert_prediction(result.clone());

        info!(
            customer_id = %result.customer_id,
            prediction_type = ?result.prediction_type,
            probability = result.probability,
            value = result.value,
            confidence = result.confidence,
            "Prediction recorded"
        );

        Ok(result)
    }

    /// Ledger-driven lifetime-value prediction for one customer.
    pub fn predict_lifetime_value_advanced(
        &self,
        customer_id: &str,
    ) -> InsightResult<PredictionResult> {
        self.predict(&PredictionRequest {
            customer_id: customer_id.to_string(),
            prediction_type: PredictionType::LtvAdvanced,
        })
    }

    /// Ledger-driven next-purchase prediction for one customer.
    pub fn predict_next_purchase_advanced(
        &self,
        customer_id: &str,
    ) -> InsightResult<PredictionResult> {
        self.predict(&PredictionRequest {
            customer_id: customer_id.to_string(),
            prediction_type: PredictionType::NextPurchaseAdvanced,
        })
    }
}
