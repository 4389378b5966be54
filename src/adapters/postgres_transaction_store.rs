//! Postgres implementation of TransactionStore.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{NewTransaction, Transaction, TransactionStatus};
use crate::ports::{StoreResult, TransactionStore, UpdateOutcome};

/// Postgres-backed transaction store.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Point query under the owning user. LIMIT 1 matches the lookup the
    /// business key is supposed to make unique.
    async fn find_id_for_user(&self, user_id: &str, order_id: &str) -> StoreResult<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM transactions WHERE user_id = $1 AND order_id = $2 LIMIT 1",
        )
        .bind(user_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Last-resort scan across every owner's records. Unbounded in the
    /// number of owners; kept for events that arrive without ownership.
    async fn find_id_any_user(&self, order_id: &str) -> StoreResult<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM transactions WHERE order_id = $1 LIMIT 1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    async fn create(&self, data: NewTransaction) -> StoreResult<Transaction> {
        let record = Transaction::new(data);

        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (
                id, order_id, product_id, user_id, amount, currency, status,
                reference, customer_name, customer_email, customer_phone,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, order_id, product_id, user_id, amount, currency, status,
                reference, customer_name, customer_email, customer_phone,
                created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.order_id)
        .bind(&record.product_id)
        .bind(&record.user_id)
        .bind(&record.amount)
        .bind(&record.currency)
        .bind(record.status.as_str())
        .bind(&record.reference)
        .bind(&record.customer_name)
        .bind(&record.customer_email)
        .bind(&record.customer_phone)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: TransactionStatus,
        user_id: Option<&str>,
    ) -> StoreResult<UpdateOutcome> {
        let target = match user_id {
            Some(user) => match self.find_id_for_user(user, order_id).await? {
                Some(id) => Some(id),
                None => {
                    tracing::warn!(
                        order_id,
                        user_id = user,
                        "order not found under its user, falling back to cross-user scan"
                    );
                    self.find_id_any_user(order_id).await?
                }
            },
            None => {
                tracing::warn!(
                    order_id,
                    "status update without an owning user, performing cross-user scan"
                );
                self.find_id_any_user(order_id).await?
            }
        };

        let Some(id) = target else {
            return Ok(UpdateOutcome::NotFound);
        };

        sqlx::query("UPDATE transactions SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(UpdateOutcome::Updated)
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    order_id: String,
    product_id: String,
    user_id: String,
    amount: bigdecimal::BigDecimal,
    currency: String,
    status: String,
    reference: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            user_id: self.user_id,
            amount: self.amount,
            currency: self.currency,
            status: TransactionStatus::parse(&self.status).unwrap_or(TransactionStatus::Pending),
            reference: self.reference,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
