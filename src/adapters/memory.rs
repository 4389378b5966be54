//! In-memory implementation of TransactionStore.
//!
//! A literal rendition of the hierarchical keyed store the production
//! backend exposes: owner -> collection of transactions, point query by
//! order id with a single-result limit, and a cross-owner scan fallback.
//! Used by the integration tests and by local runs without a database.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::{NewTransaction, Transaction, TransactionStatus};
use crate::ports::{StoreResult, TransactionStore, UpdateOutcome};

#[derive(Default)]
pub struct InMemoryTransactionStore {
    users: Mutex<HashMap<String, Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one owner's collection, newest last.
    pub async fn transactions_for(&self, user_id: &str) -> Vec<Transaction> {
        self.users
            .lock()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total record count across all owners.
    pub async fn len(&self) -> usize {
        self.users.lock().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, data: NewTransaction) -> StoreResult<Transaction> {
        let record = Transaction::new(data);
        let mut users = self.users.lock().await;
        users
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: TransactionStatus,
        user_id: Option<&str>,
    ) -> StoreResult<UpdateOutcome> {
        let mut users = self.users.lock().await;

        if let Some(user) = user_id {
            if let Some(record) = users
                .get_mut(user)
                .and_then(|txs| txs.iter_mut().find(|tx| tx.order_id == order_id))
            {
                record.status = status;
                record.updated_at = Utc::now();
                return Ok(UpdateOutcome::Updated);
            }
        }

        // Cross-owner scan: last resort for events without ownership.
        for txs in users.values_mut() {
            if let Some(record) = txs.iter_mut().find(|tx| tx.order_id == order_id) {
                record.status = status;
                record.updated_at = Utc::now();
                return Ok(UpdateOutcome::Updated);
            }
        }

        Ok(UpdateOutcome::NotFound)
    }
}
