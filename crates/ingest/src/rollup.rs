//! Background recomputation of customer rollups.
//!
//! Recording a purchase enqueues the owning customer here. The worker
//! recomputes `total_spent` / `purchase_frequency` / `last_purchase_date`
//! from the full ledger and writes the rollup back. The contract is
//! best-effort: requests beyond the queue capacity are dropped, failures
//! are counted and logged but never surfaced to the purchase path, and
//! the last rollup to complete wins. Callers that need to observe
//! completion may await the returned ticket.

use std::sync::Arc;

use chrono::Utc;
use insight_core::types::CustomerRollup;
use insight_store::DataProvider;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Terminal state of one rollup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupStatus {
    /// The rollup was recomputed and written back.
    Applied,
    /// The recomputation ran but could not be applied.
    Failed,
    /// The request never reached the worker (queue full or shut down).
    Dropped,
}

/// Completion handle for one rollup request. Awaiting it is optional;
/// dropping it does not cancel the rollup.
pub struct RollupTicket {
    receiver: oneshot::Receiver<RollupStatus>,
}

impl RollupTicket {
    pub(crate) fn resolved(status: RollupStatus) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(status);
        Self { receiver }
    }

    /// Wait for the rollup to finish. Resolves to `Dropped` if the worker
    /// went away before handling the request.
    pub async fn wait(self) -> RollupStatus {
        self.receiver.await.unwrap_or(RollupStatus::Dropped)
    }
}

pub(crate) struct RollupJob {
    pub customer_id: String,
    pub done: oneshot::Sender<RollupStatus>,
}

/// Sending half handed to the recorder.
#[derive(Clone)]
pub struct RollupQueue {
    sender: mpsc::Sender<RollupJob>,
}

impl RollupQueue {
    /// Enqueue a rollup for one customer. Never blocks; a full queue
    /// resolves the ticket as `Dropped`.
    pub fn enqueue(&self, customer_id: &str) -> RollupTicket {
        let (done, receiver) = oneshot::channel();
        let job = RollupJob {
            customer_id: customer_id.to_string(),
            done,
        };
        match self.sender.try_send(job) {
            Ok(()) => {
                metrics::counter!("rollup.queued").increment(1);
                RollupTicket { receiver }
            }
            Err(e) => {
                metrics::counter!("rollup.dropped").increment(1);
                debug!(customer_id, error = %e, "Rollup request dropped");
                RollupTicket::resolved(RollupStatus::Dropped)
            }
        }
    }
}

/// Background worker that drains the rollup queue. Runs until every
/// queue handle is dropped.
pub struct RollupWorker {
    provider: Arc<dyn DataProvider>,
    receiver: mpsc::Receiver<RollupJob>,
}

impl RollupWorker {
    pub async fn run(mut self) {
        info!("Rollup worker started");
        while let Some(job) = self.receiver.recv().await {
            let status = self.recompute(&job.customer_id);
            // The purchase path never sees this status; only a caller
            // holding the ticket does.
            let _ = job.done.send(status);
        }
        info!("Rollup worker stopped");
    }

    fn recompute(&self, customer_id: &str) -> RollupStatus {
        let purchases = self.provider.find_purchases_by_customer(customer_id, true);

        let rollup = CustomerRollup {
            total_spent: purchases.iter().map(|p| p.amount).sum(),
            purchase_frequency: purchases.len() as u32,
            last_purchase_date: purchases.first().map(|p| p.purchase_date),
        };

        match self
            .provider
            .update_customer_rollup(customer_id, rollup, Utc::now())
        {
            Ok(()) => {
                metrics::counter!("rollup.applied").increment(1);
                RollupStatus::Applied
            }
            Err(e) => {
                metrics::counter!("rollup.failed").increment(1);
                debug!(customer_id, error = %e, "Rollup recomputation failed");
                RollupStatus::Failed
            }
        }
    }
}

/// Build a queue/worker pair over a provider. The worker must be spawned
/// by the caller.
pub fn rollup_channel(
    provider: Arc<dyn DataProvider>,
    capacity: usize,
) -> (RollupQueue, RollupWorker) {
    let (sender, receiver) = mpsc::channel(capacity);
    (
        RollupQueue { sender },
        RollupWorker { provider, receiver },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone};
    use insight_core::types::{Customer, Purchase, PurchaseChannel};
    use insight_store::MemoryStore;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_customer(Customer {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            age: 40,
            gender: "Male".to_string(),
            location: "Dallas".to_string(),
            income_range: "$75k-$100k".to_string(),
            registration_date: now() - Duration::days(300),
            last_purchase_date: None,
            total_spent: 0.0,
            purchase_frequency: 0,
            preferred_category: "Sports".to_string(),
            created_at: now(),
            updated_at: now(),
        });
        store
    }

    fn purchase(amount: f64, days_ago: i64) -> Purchase {
        let date = now() - Duration::days(days_ago);
        Purchase {
            id: Uuid::new_v4(),
            customer_id: "CUST00001".to_string(),
            product_id: "PROD001".to_string(),
            category: "Sports".to_string(),
            amount,
            quantity: 1,
            purchase_date: date,
            channel: PurchaseChannel::Online,
            created_at: date,
        }
    }

    #[tokio::test]
    async fn test_rollup_recomputes_from_ledger() {
        let store = seeded_store();
        store.insert_purchase(purchase(30.0, 20));
        store.insert_purchase(purchase(50.0, 5));

        let (queue, worker) = rollup_channel(store.clone() as Arc<dyn DataProvider>, 16);
        tokio::spawn(worker.run());

        let status = queue.enqueue("CUST00001").wait().await;
        assert_eq!(status, RollupStatus::Applied);

        let customer = store.find_customer("CUST00001").unwrap();
        assert_eq!(customer.total_spent, 80.0);
        assert_eq!(customer.purchase_frequency, 2);
        assert_eq!(customer.last_purchase_date, Some(now() - Duration::days(5)));
    }

    #[tokio::test]
    async fn test_unknown_customer_fails_quietly() {
        let store = seeded_store();
        let (queue, worker) = rollup_channel(store as Arc<dyn DataProvider>, 16);
        tokio::spawn(worker.run());

        let status = queue.enqueue("CUST99999").wait().await;
        assert_eq!(status, RollupStatus::Failed);
    }

    #[tokio::test]
    async fn test_full_queue_drops_requests() {
        let store = seeded_store();
        // Capacity 1 and no worker draining: the second request drops.
        let (queue, _worker) = rollup_channel(store as Arc<dyn DataProvider>, 1);

        let first = queue.enqueue("CUST00001");
        let second = queue.enqueue("CUST00001");

        assert_eq!(second.wait().await, RollupStatus::Dropped);
        // The queued request resolves Dropped too once the worker is gone.
        drop(_worker);
        assert_eq!(first.wait().await, RollupStatus::Dropped);
    }

    #[tokio::test]
    async fn test_last_rollup_wins() {
        let store = seeded_store();
        store.insert_purchase(purchase(25.0, 10));

        let (queue, worker) = rollup_channel(store.clone() as Arc<dyn DataProvider>, 16);
        tokio::spawn(worker.run());

        let first = queue.enqueue("CUST00001");
        store.insert_purchase(purchase(75.0, 1));
        let second = queue.enqueue("CUST00001");

        first.wait().await;
        assert_eq!(second.wait().await, RollupStatus::Applied);

        let customer = store.find_customer("CUST00001").unwrap();
        assert_eq!(customer.total_spent, 100.0);
        assert_eq!(customer.purchase_frequency, 2);
    }
}
