//! Record ingestion — creates customers, purchases, campaigns, and
//! performance rows, and keeps the denormalized customer rollups
//! eventually consistent with the purchase ledger via a background
//! rollup worker.

pub mod recorder;
pub mod rollup;

pub use recorder::Recorder;
pub use rollup::{rollup_channel, RollupStatus, RollupTicket, RollupWorker};
