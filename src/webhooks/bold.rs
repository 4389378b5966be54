//! Bold webhook payloads and their normalization.
//!
//! Bold delivers JSON with an `event` discriminator and a `data` object.
//! The nested `payment_method.metadata` and `customer` objects are echoes
//! of what checkout-link creation sent; any nesting level may be absent,
//! so every level defaults and leaf fields fall back to fixed sentinels.

use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::domain::{NewTransaction, TransactionStatus, ANONYMOUS_USER};
use crate::error::AppError;
use crate::webhooks::WebhookEvent;

const EVENT_CREATED: &str = "transaction.created";
const EVENT_UPDATED: &str = "transaction.updated";

#[derive(Debug, Deserialize)]
struct BoldEnvelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct BoldTransaction {
    reference: String,
    amount_in_cents: i64,
    currency: String,
    status: String,
    #[serde(default)]
    payment_method: BoldPaymentMethod,
    #[serde(default)]
    customer: BoldCustomer,
}

#[derive(Debug, Default, Deserialize)]
struct BoldPaymentMethod {
    #[serde(default)]
    metadata: BoldMetadata,
}

/// Passthrough metadata set at payment-link creation and echoed back.
#[derive(Debug, Default, Deserialize)]
struct BoldMetadata {
    #[serde(rename = "productId")]
    product_id: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BoldCustomer {
    name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
}

fn map_status(raw: &str) -> TransactionStatus {
    match raw {
        "PAID" | "APPROVED" => TransactionStatus::Paid,
        "PENDING" | "PROCESSING" => TransactionStatus::Pending,
        "REJECTED" | "FAILED" => TransactionStatus::Failed,
        "CANCELLED" | "VOIDED" => TransactionStatus::Cancelled,
        other => {
            tracing::warn!("unknown Bold transaction status {other:?}, treating as PENDING");
            TransactionStatus::Pending
        }
    }
}

fn extract_transaction(data: BoldTransaction) -> NewTransaction {
    let metadata = data.payment_method.metadata;
    let customer = data.customer;

    // Amount arrives in minor units; the canonical record holds decimal
    // currency units.
    let amount = BigDecimal::from(data.amount_in_cents) / BigDecimal::from(100);

    NewTransaction {
        order_id: data.reference.clone(),
        product_id: metadata.product_id.unwrap_or_else(|| "unknown".to_string()),
        user_id: metadata.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        amount,
        currency: data.currency,
        status: map_status(&data.status),
        reference: data.reference,
        customer_name: customer.name.unwrap_or_else(|| "N/A".to_string()),
        customer_email: customer.email.unwrap_or_else(|| "N/A".to_string()),
        customer_phone: customer.phone_number.unwrap_or_else(|| "N/A".to_string()),
    }
}

/// Normalizes a signature-verified Bold payload into a `WebhookEvent`.
pub fn normalize(raw_body: &[u8]) -> Result<WebhookEvent, AppError> {
    let envelope: BoldEnvelope = serde_json::from_slice(raw_body)
        .map_err(|e| AppError::Validation(format!("malformed Bold payload: {e}")))?;

    match envelope.event.as_str() {
        EVENT_CREATED | EVENT_UPDATED => {
            let data: BoldTransaction = serde_json::from_value(envelope.data)
                .map_err(|e| AppError::Validation(format!("malformed Bold transaction: {e}")))?;
            let transaction = extract_transaction(data);

            if envelope.event == EVENT_CREATED {
                Ok(WebhookEvent::Created(transaction))
            } else {
                Ok(WebhookEvent::Updated(transaction))
            }
        }
        _ => Ok(WebhookEvent::Ignored {
            event_type: envelope.event,
        }),
    }
}
