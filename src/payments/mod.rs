//! HTTP client for the Bold payment-links API.
//!
//! Checkout-link creation is where the business key and passthrough
//! metadata are minted: the order id and the {productId, userId} metadata
//! sent here come back verbatim in Bold's webhook events.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoldApiError {
    #[error("BOLD_API_KEY is not configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Bold API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Request body for the payment-links endpoint. Amounts are minor units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkRequest {
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub description: String,
    pub redirect_url: String,
    pub payment_methods: PaymentMethods,
    pub customer: CustomerInfo,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethods {
    pub metadata: LinkMetadata,
}

/// Echoed back by Bold inside `payment_method.metadata` on webhook events.
#[derive(Debug, Serialize)]
pub struct LinkMetadata {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkResponse {
    data: PaymentLinkData,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkData {
    url: String,
}

#[derive(Clone)]
pub struct BoldClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl BoldClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Creates a hosted payment link and returns its URL.
    pub async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> Result<String, BoldApiError> {
        let api_key = self.api_key.as_deref().ok_or(BoldApiError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("x-api-key {api_key}"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body, "Bold API error");
            return Err(BoldApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: PaymentLinkResponse = response.json().await?;
        Ok(payload.data.url)
    }
}
