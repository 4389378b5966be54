//! Webhook reconciliation use case.
//!
//! Routes a verified, normalized event to create-or-update persistence and
//! triggers the notification collaborator on paid transactions. Side
//! effects are ordered: persistence completes (or is skipped) before the
//! notifier runs, and a notification failure never rolls back or fails the
//! already-committed write.

use std::sync::Arc;

use crate::domain::{NewTransaction, TransactionStatus};
use crate::error::AppError;
use crate::ports::{NotificationOutcome, Notifier, StoreError, TransactionStore, UpdateOutcome};
use crate::webhooks::WebhookEvent;

/// What one webhook delivery did.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub persisted: bool,
    pub notification: Option<NotificationOutcome>,
}

pub struct ReconcileWebhook {
    store: Arc<dyn TransactionStore>,
    notifier: Arc<dyn Notifier>,
}

impl ReconcileWebhook {
    pub fn new(store: Arc<dyn TransactionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub async fn execute(&self, event: WebhookEvent) -> Result<ReconcileOutcome, AppError> {
        match event {
            WebhookEvent::Created(transaction) => self.handle_created(transaction).await,
            WebhookEvent::Updated(transaction) => Ok(self.handle_updated(transaction).await),
            WebhookEvent::Ignored { event_type } => {
                tracing::info!(%event_type, "ignoring unhandled webhook event type");
                Ok(ReconcileOutcome::default())
            }
        }
    }

    /// A "created" event persists a fresh record for a known owner.
    /// Creation failures propagate as 5xx so the provider retries them.
    async fn handle_created(
        &self,
        transaction: NewTransaction,
    ) -> Result<ReconcileOutcome, AppError> {
        let mut outcome = ReconcileOutcome::default();

        if transaction.is_anonymous() {
            // Unowned records are dropped, not persisted ownerless.
            tracing::info!(
                order_id = %transaction.order_id,
                "skipping transaction save for anonymous user"
            );
        } else {
            self.store
                .create(transaction.clone())
                .await
                .map_err(|e: StoreError| {
                    tracing::error!(order_id = %transaction.order_id, error = %e, "failed to save transaction");
                    AppError::Internal(format!("could not save transaction: {e}"))
                })?;
            outcome.persisted = true;
        }

        if transaction.status == TransactionStatus::Paid {
            outcome.notification = Some(self.notify(&transaction).await);
        }

        Ok(outcome)
    }

    /// An "updated" event overwrites the status of an existing record.
    /// Misses and storage errors degrade to a log line: providers retry
    /// webhook delivery, and a retried update for an already-settled or
    /// never-created record must not cause repeated hard failures.
    async fn handle_updated(&self, transaction: NewTransaction) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        let user_id = if transaction.is_anonymous() {
            None
        } else {
            Some(transaction.user_id.as_str())
        };

        match self
            .store
            .update_status(&transaction.order_id, transaction.status, user_id)
            .await
        {
            Ok(UpdateOutcome::Updated) => {
                tracing::info!(
                    order_id = %transaction.order_id,
                    status = %transaction.status,
                    "transaction status updated"
                );
                outcome.persisted = true;
            }
            Ok(UpdateOutcome::NotFound) => {
                tracing::info!(
                    order_id = %transaction.order_id,
                    "no transaction found to update"
                );
            }
            Err(e) => {
                tracing::error!(
                    order_id = %transaction.order_id,
                    error = %e,
                    "error updating transaction status"
                );
            }
        }

        if transaction.status == TransactionStatus::Paid {
            outcome.notification = Some(self.notify(&transaction).await);
        }

        outcome
    }

    async fn notify(&self, transaction: &NewTransaction) -> NotificationOutcome {
        let outcome = self.notifier.notify(transaction).await;
        tracing::info!(
            order_id = %transaction.order_id,
            sent = outcome.sent,
            "payment notification triggered"
        );
        outcome
    }
}
