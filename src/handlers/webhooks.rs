//! Webhook receivers for the two payment providers.
//!
//! Both handlers take the raw buffered body (`Bytes`) so signature
//! verification sees the exact bytes the provider signed; parsing happens
//! only after the signature checks out. Each delivery is handled
//! independently and sequentially: verify, normalize, persist, notify.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::AppError;
use crate::webhooks::epayco::EpaycoPayload;
use crate::webhooks::{bold, epayco, signature};
use crate::AppState;

pub const BOLD_SIGNATURE_HEADER: &str = "x-bold-signature";

/// POST /webhooks/bold
///
/// Bold signs the raw JSON body and carries the hex HMAC in a header.
pub async fn bold_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let secret = state
        .config
        .bold_webhook_secret
        .as_deref()
        .ok_or_else(|| {
            tracing::error!("BOLD_WEBHOOK_SECRET is not set");
            AppError::Configuration("webhook secret not configured".to_string())
        })?;

    let claimed = headers
        .get(BOLD_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::BadRequest(format!("missing {BOLD_SIGNATURE_HEADER} header"))
        })?;

    if !signature::verify_bold_signature(&body, claimed, secret) {
        tracing::warn!(claimed, "invalid Bold webhook signature");
        return Err(AppError::Unauthorized("invalid signature".to_string()));
    }

    let event = bold::normalize(&body)?;
    state.reconciler.execute(event).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Webhook received and processed.",
    })))
}

/// POST /webhooks/epayco
///
/// ePayco confirms with a form-encoded body; the signature travels inside
/// the body as `x_signature` and covers a caret-joined field string rather
/// than the raw bytes. Responds with plain `OK`, which is what the
/// provider's confirmation endpoint expects.
pub async fn epayco_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let (Some(p_cust_id), Some(p_key), Some(_public_key)) = (
        state.config.epayco_p_cust_id.as_deref(),
        state.config.epayco_p_key.as_deref(),
        state.config.epayco_public_key.as_deref(),
    ) else {
        tracing::error!("ePayco merchant keys are not set");
        return Err(AppError::Configuration(
            "webhook secret not configured".to_string(),
        ));
    };

    let payload = EpaycoPayload::parse(&body);

    let claimed = payload
        .signature()
        .ok_or_else(|| AppError::BadRequest("missing x_signature".to_string()))?;

    if !signature::verify_epayco_signature(
        claimed,
        p_cust_id,
        p_key,
        payload.ref_payco(),
        payload.transaction_id(),
        payload.amount(),
        payload.currency_code(),
    ) {
        tracing::warn!(
            claimed,
            ref_payco = payload.ref_payco(),
            "invalid ePayco webhook signature"
        );
        return Err(AppError::Unauthorized("invalid signature".to_string()));
    }

    let event = epayco::normalize(&payload)?;
    state.reconciler.execute(event).await?;

    Ok("OK")
}
