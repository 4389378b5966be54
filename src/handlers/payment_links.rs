//! Checkout-link creation.
//!
//! This is where the business key is minted: `easybots-<productId>-<millis>`
//! correlates every later webhook event back to this checkout, and the
//! {productId, userId} metadata round-trips through the provider.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::product;
use crate::error::AppError;
use crate::payments::{BoldApiError, CustomerInfo, LinkMetadata, PaymentLinkRequest, PaymentMethods};
use crate::AppState;

const ORDER_ID_PREFIX: &str = "easybots";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLink {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkCreated {
    pub payment_link: String,
    pub order_id: String,
}

/// POST /payment-links
pub async fn create_payment_link(
    State(state): State<AppState>,
    Query(query): Query<LinkQuery>,
    Json(request): Json<CreatePaymentLink>,
) -> Result<Json<PaymentLinkCreated>, AppError> {
    if request.product_id.is_empty() || request.currency.is_empty() || request.user_id.is_empty() {
        return Err(AppError::BadRequest(
            "productId, currency and userId are required".to_string(),
        ));
    }

    let product = product::find(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let order_id = format!(
        "{ORDER_ID_PREFIX}-{}-{}",
        product.id,
        Utc::now().timestamp_millis()
    );

    let lang = query.lang.unwrap_or_else(|| "en".to_string());
    let redirect_url = format!("{}/?lang={}", state.config.storefront_base_url, lang);

    let link_request = PaymentLinkRequest {
        amount: product.amount_in_cents(&request.currency),
        currency: request.currency.clone(),
        order_id: order_id.clone(),
        description: format!("Payment for {}", product.name),
        redirect_url,
        payment_methods: PaymentMethods {
            metadata: LinkMetadata {
                product_id: product.id.to_string(),
                user_id: request.user_id.clone(),
            },
        },
        customer: CustomerInfo {
            email: request.user_email,
            name: request.user_name,
            phone_number: request.user_phone,
        },
    };

    let payment_link = state
        .bold
        .create_payment_link(&link_request)
        .await
        .map_err(|e| match e {
            BoldApiError::MissingApiKey => {
                tracing::error!("BOLD_API_KEY is not set");
                AppError::Configuration("payment API key not configured".to_string())
            }
            other => {
                tracing::error!(error = %other, "error creating payment link");
                AppError::Internal(other.to_string())
            }
        })?;

    tracing::info!(%order_id, product_id = product.id, "payment link created");

    Ok(Json(PaymentLinkCreated {
        payment_link,
        order_id,
    }))
}
