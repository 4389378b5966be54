//! Interfaces between the reconciliation core and its collaborators.
//! Adapters implement these; the dispatcher only sees the traits.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{NewTransaction, Transaction, TransactionStatus};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an `update_status` call. A missing target is an expected
/// outcome, not an error: providers retry webhook delivery, and a retried
/// update for a record that was never created must not keep failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Per-owner transaction persistence.
///
/// `create` is append-only: two creates with the same order id yield two
/// records. Deduplication of replayed "created" events is not the store's
/// responsibility.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a normalized transaction under its owning user, stamping
    /// the record id and creation/update timestamps.
    async fn create(&self, data: NewTransaction) -> StoreResult<Transaction>;

    /// Overwrites only the status and update timestamp of the transaction
    /// matching `order_id`. When `user_id` is known the lookup is a direct
    /// point query under that owner; otherwise (or on a miss there) the
    /// store falls back to an exhaustive cross-owner scan.
    async fn update_status(
        &self,
        order_id: &str,
        status: TransactionStatus,
        user_id: Option<&str>,
    ) -> StoreResult<UpdateOutcome>;
}

/// Outcome of a notification attempt. Delivery failures degrade to
/// `sent: false`; they are never surfaced as errors to the webhook flow.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationOutcome {
    pub sent: bool,
    pub message: String,
}

/// Outbound notification collaborator. Given a normalized transaction it
/// emits a human-readable admin notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, transaction: &NewTransaction) -> NotificationOutcome;
}
