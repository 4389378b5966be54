//! Transaction domain entity.
//! Canonical, provider-agnostic representation of one purchase attempt.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sentinel owner for purchases made without an authenticated user.
/// Transactions owned by this sentinel are never persisted.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Payment status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Paid => "PAID",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parses the stored string form back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PAID" => Some(TransactionStatus::Paid),
            "PENDING" => Some(TransactionStatus::Pending),
            "FAILED" => Some(TransactionStatus::Failed),
            "CANCELLED" => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized webhook event payload, not yet persisted.
///
/// `order_id` is the business key minted at checkout time;
/// `reference` is the provider's own transaction identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub order_id: String,
    pub product_id: String,
    pub user_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

impl NewTransaction {
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_empty() || self.user_id == ANONYMOUS_USER
    }
}

/// A persisted transaction record.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub order_id: String,
    pub product_id: String,
    pub user_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Stamps a normalized event into a persistable record,
    /// generating the record id and server-side timestamps.
    pub fn new(data: NewTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id: data.order_id,
            product_id: data.product_id,
            user_id: data.user_id,
            amount: data.amount,
            currency: data.currency,
            status: data.status,
            reference: data.reference,
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            customer_phone: data.customer_phone,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample(user_id: &str) -> NewTransaction {
        NewTransaction {
            order_id: "easybots-botpress-expert-1700000000000".to_string(),
            product_id: "botpress-expert".to_string(),
            user_id: user_id.to_string(),
            amount: BigDecimal::from_str("149.00").unwrap(),
            currency: "USD".to_string(),
            status: TransactionStatus::Paid,
            reference: "ref-123".to_string(),
            customer_name: "N/A".to_string(),
            customer_email: "N/A".to_string(),
            customer_phone: "N/A".to_string(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TransactionStatus::Paid,
            TransactionStatus::Pending,
            TransactionStatus::Failed,
            TransactionStatus::Cancelled,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransactionStatus::parse("REFUNDED"), None);
    }

    #[test]
    fn test_anonymous_owner_detection() {
        assert!(sample(ANONYMOUS_USER).is_anonymous());
        assert!(sample("").is_anonymous());
        assert!(!sample("u1").is_anonymous());
    }

    #[test]
    fn test_new_transaction_stamps_id_and_timestamps() {
        let record = Transaction::new(sample("u1"));
        assert_eq!(record.user_id, "u1");
        assert_eq!(record.created_at, record.updated_at);
        assert!(!record.id.is_nil());
    }
}
