//! Core segmentation engine — partitions the customer population into
//! three value tiers using tertile thresholds over total spend and
//! purchase frequency.

use std::sync::Arc;

use chrono::Utc;
use insight_core::config::SegmentationConfig;
use insight_core::types::{Customer, CustomerSegment, SegmentCriteria, SegmentationRequest};
use insight_core::{InsightError, InsightResult};
use insight_store::DataProvider;
use tracing::{debug, info};
use uuid::Uuid;

/// Value tier a customer lands in after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTier {
    High,
    Medium,
    Low,
}

/// Tertile cut points over the sorted spend and frequency distributions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TierThresholds {
    spend_t1: f64,
    spend_t2: f64,
    freq_t1: u32,
    freq_t2: u32,
}

impl TierThresholds {
    /// Values at index ⌊n/3⌋ and ⌊2n/3⌋ of each sorted distribution.
    /// The population must be non-empty.
    fn from_population(customers: &[Customer]) -> Self {
        let mut spends: Vec<f64> = customers.iter().map(|c| c.total_spent).collect();
        let mut frequencies: Vec<u32> = customers.iter().map(|c| c.purchase_frequency).collect();
        spends.sort_by(|a, b| a.total_cmp(b));
        frequencies.sort_unstable();

        let n = customers.len();
        Self {
            spend_t1: spends[n / 3],
            spend_t2: spends[2 * n / 3],
            freq_t1: frequencies[n / 3],
            freq_t2: frequencies[2 * n / 3],
        }
    }

    /// Score 0-4: two points per dimension above the upper tertile, one
    /// above the lower. Tier cutoffs: >=3 high, >=1 medium, else low.
    fn classify(&self, customer: &Customer) -> ValueTier {
        let mut score = 0u8;
        if customer.total_spent > self.spend_t2 {
            score += 2;
        } else if customer.total_spent > self.spend_t1 {
            score += 1;
        }
        if customer.purchase_frequency > self.freq_t2 {
            score += 2;
        } else if customer.purchase_frequency > self.freq_t1 {
            score += 1;
        }

        match score {
            3.. => ValueTier::High,
            1..=2 => ValueTier::Medium,
            0 => ValueTier::Low,
        }
    }
}

pub struct SegmentationEngine {
    provider: Arc<dyn DataProvider>,
    scan_limit: usize,
}

impl SegmentationEngine {
    pub fn new(provider: Arc<dyn DataProvider>, config: &SegmentationConfig) -> Self {
        Self {
            provider,
            scan_limit: config.scan_limit,
        }
    }

    /// Run a segmentation pass: score every customer, persist the three
    /// tier segments, and return them. The population is partitioned
    /// exactly — segment sizes always sum to the population size.
    pub fn segment_customers(
        &self,
        request: &SegmentationRequest,
    ) -> InsightResult<Vec<CustomerSegment>> {
        // Only the fixed tertile method is implemented; the requested
        // algorithm and feature list are logged for visibility.
        info!(
            algorithm = %request.algorithm,
            features = ?request.features,
            "Starting segmentation run"
        );

        let customers = self.provider.find_customers(self.scan_limit, 0);
        if customers.is_empty() {
            return Err(InsightError::NoData(
                "no customers found for segmentation".to_string(),
            ));
        }

        let thresholds = TierThresholds::from_population(&customers);
        debug!(?thresholds, population = customers.len(), "Computed tertile thresholds");

        let (mut high, mut medium, mut low) = (0usize, 0usize, 0usize);
        for customer in &customers {
            match thresholds.classify(customer) {
                ValueTier::High => high += 1,
                ValueTier::Medium => medium += 1,
                ValueTier::Low => low += 1,
            }
        }

        let segments = vec![
            self.build_segment(
                1,
                "High Value Customers",
                "Customers with high spending and purchase frequency",
                SegmentCriteria {
                    min_total_spent: Some(thresholds.spend_t2),
                    min_purchase_frequency: Some(thresholds.freq_t2),
                    ..Default::default()
                },
                high,
            ),
            self.build_segment(
                2,
                "Medium Value Customers",
                "Customers with medium spending and purchase frequency",
                SegmentCriteria {
                    min_total_spent: Some(thresholds.spend_t1),
                    min_purchase_frequency: Some(thresholds.freq_t1),
                    ..Default::default()
                },
                medium,
            ),
            self.build_segment(
                3,
                "Low Value Customers",
                "Customers with low spending and purchase frequency",
                SegmentCriteria {
                    max_total_spent: Some(thresholds.spend_t1),
                    max_purchase_frequency: Some(thresholds.freq_t1),
                    ..Default::default()
                },
                low,
            ),
        ];

        for segment in &segments {
            self.provider.insert_segment(segment.clone());
        }

        info!(
            high = high,
            medium = medium,
            low = low,
            "Segmentation run complete"
        );

        Ok(segments)
    }

    fn build_segment(
        &self,
        index: usize,
        name: &str,
        description: &str,
        criteria: SegmentCriteria,
        size: usize,
    ) -> CustomerSegment {
        CustomerSegment {
            id: Uuid::new_v4(),
            segment_id: format!("segment_{index}"),
            name: name.to_string(),
            description: description.to_string(),
            criteria,
            size,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insight_store::MemoryStore;

    fn customer(id: usize, total_spent: f64, purchase_frequency: u32) -> Customer {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        Customer {
            id: Uuid::new_v4(),
            customer_id: format!("CUST{id:05}"),
            age: 35,
            gender: "Other".to_string(),
            location: "Dallas".to_string(),
            income_range: "$75k-$100k".to_string(),
            registration_date: now,
            last_purchase_date: None,
            total_spent,
            purchase_frequency,
            preferred_category: "Sports".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn engine_over(customers: Vec<Customer>) -> (Arc<MemoryStore>, SegmentationEngine) {
        let store = Arc::new(MemoryStore::new());
        for c in customers {
            store.insert_customer(c);
        }
        let engine = SegmentationEngine::new(
            store.clone() as Arc<dyn DataProvider>,
            &SegmentationConfig::default(),
        );
        (store, engine)
    }

    fn request() -> SegmentationRequest {
        SegmentationRequest {
            algorithm: "kmeans".to_string(),
            features: vec!["total_spent".to_string(), "purchase_frequency".to_string()],
        }
    }

    #[test]
    fn test_empty_population_is_no_data() {
        let (_, engine) = engine_over(vec![]);
        let err = engine.segment_customers(&request()).unwrap_err();
        assert!(matches!(err, InsightError::NoData(_)));
    }

    #[test]
    fn test_segments_partition_population() {
        let customers: Vec<Customer> = (0..30)
            .map(|i| customer(i, (i * 100) as f64, i as u32))
            .collect();
        let n = customers.len();
        let (_, engine) = engine_over(customers);

        let segments = engine.segment_customers(&request()).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments.iter().map(|s| s.size).sum::<usize>(), n);
    }

    #[test]
    fn test_three_tiers_with_expected_criteria() {
        // Spends 0..900 in steps of 100, frequencies 0..9: thresholds land
        // at the index-3 and index-6 values of each sorted list.
        let customers: Vec<Customer> = (0..9)
            .map(|i| customer(i, (i * 100) as f64, i as u32))
            .collect();
        let (_, engine) = engine_over(customers);

        let segments = engine.segment_customers(&request()).unwrap();
        let high = &segments[0];
        let low = &segments[2];

        assert_eq!(high.criteria.min_total_spent, Some(600.0));
        assert_eq!(high.criteria.min_purchase_frequency, Some(6));
        assert_eq!(low.criteria.max_total_spent, Some(300.0));
        assert_eq!(low.criteria.max_purchase_frequency, Some(3));

        // Spends/freqs above both upper thresholds: customers 7 and 8.
        assert_eq!(high.size, 2);
    }

    #[test]
    fn test_uniform_population_is_all_low() {
        // Every value equals the thresholds, so no strict comparison fires.
        let customers: Vec<Customer> = (0..12).map(|i| customer(i, 500.0, 5)).collect();
        let (_, engine) = engine_over(customers);

        let segments = engine.segment_customers(&request()).unwrap();
        assert_eq!(segments[0].size, 0);
        assert_eq!(segments[1].size, 0);
        assert_eq!(segments[2].size, 12);
    }

    #[test]
    fn test_segments_are_persisted() {
        let customers: Vec<Customer> = (0..6)
            .map(|i| customer(i, (i * 250) as f64, (i * 2) as u32))
            .collect();
        let (store, engine) = engine_over(customers);

        engine.segment_customers(&request()).unwrap();
        assert_eq!(store.list_segments().len(), 3);
    }
}
