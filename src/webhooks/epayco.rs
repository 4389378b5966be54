//! ePayco webhook payloads and their normalization.
//!
//! ePayco confirms transactions with an `application/x-www-form-urlencoded`
//! body, not JSON. The business key, owning user, and product id are not
//! native to the provider: they round-trip through the `x_extra1/2/3`
//! passthrough fields set at checkout time and echoed back verbatim. A
//! confirmation missing any of those extras cannot be reconciled and is
//! rejected instead of defaulted.

use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::str::FromStr;
use url::form_urlencoded;

use crate::domain::{NewTransaction, TransactionStatus};
use crate::error::AppError;
use crate::webhooks::WebhookEvent;

/// Response code `1` means the transaction was approved. Approved
/// confirmations persist a fresh record; everything else is update-only.
const RESPONSE_APPROVED: &str = "1";

/// Parsed form body. Keys keep their wire names (`x_ref_payco`, ...).
#[derive(Debug, Default)]
pub struct EpaycoPayload {
    fields: HashMap<String, String>,
}

impl EpaycoPayload {
    pub fn parse(raw_body: &[u8]) -> Self {
        let fields = form_urlencoded::parse(raw_body).into_owned().collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn signature(&self) -> Option<&str> {
        self.get("x_signature")
    }

    pub fn ref_payco(&self) -> &str {
        self.get_or_empty("x_ref_payco")
    }

    pub fn transaction_id(&self) -> &str {
        self.get_or_empty("x_transaction_id")
    }

    pub fn amount(&self) -> &str {
        self.get_or_empty("x_amount")
    }

    pub fn currency_code(&self) -> &str {
        self.get_or_empty("x_currency_code")
    }

    fn required(&self, key: &'static str) -> Result<&str, AppError> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Validation(format!("missing required field {key}")))
    }
}

fn map_status(transaction_state_code: &str) -> TransactionStatus {
    match transaction_state_code {
        "1" => TransactionStatus::Paid,
        "3" => TransactionStatus::Pending,
        // 10 = abandoned, 11 = cancelled
        "10" | "11" => TransactionStatus::Cancelled,
        _ => TransactionStatus::Failed,
    }
}

/// Normalizes a signature-verified ePayco confirmation into a
/// `WebhookEvent`. Approved confirmations (`x_cod_response == "1"`) become
/// Created events; every other response code becomes an Updated event so a
/// declined or pending confirmation never mints a fresh record.
pub fn normalize(payload: &EpaycoPayload) -> Result<WebhookEvent, AppError> {
    // The extras carry the business key and owner; without them the
    // confirmation cannot be attached to anything.
    let order_id = payload.required("x_extra1")?.to_string();
    let user_id = payload.required("x_extra2")?.to_string();
    let product_id = payload.required("x_extra3")?.to_string();

    let raw_amount = payload.get("x_amount").unwrap_or("0");
    let amount = BigDecimal::from_str(raw_amount)
        .map_err(|_| AppError::Validation(format!("unparsable x_amount {raw_amount:?}")))?;

    let transaction = NewTransaction {
        order_id,
        product_id,
        user_id,
        amount,
        currency: payload.currency_code().to_string(),
        status: map_status(payload.get_or_empty("x_cod_transaction_state")),
        reference: payload.ref_payco().to_string(),
        customer_name: non_empty_or_na(payload.get("x_customer_name")),
        customer_email: non_empty_or_na(payload.get("x_customer_email")),
        customer_phone: non_empty_or_na(payload.get("x_customer_phone")),
    };

    if payload.get_or_empty("x_cod_response") == RESPONSE_APPROVED {
        Ok(WebhookEvent::Created(transaction))
    } else {
        Ok(WebhookEvent::Updated(transaction))
    }
}

fn non_empty_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}
