//! Outbound payment notifications.
//!
//! Composes a short admin-facing message for a completed payment and posts
//! it to the configured notification gateway (a WhatsApp bridge in
//! production). Delivery is best-effort: an unconfigured gateway or a
//! failed POST degrades to `sent: false` with a log line.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::domain::NewTransaction;
use crate::ports::{NotificationOutcome, Notifier};

#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    webhook_url: Option<String>,
    admin_phone: String,
}

#[derive(Debug, Serialize)]
struct NotificationRequest<'a> {
    message: &'a str,
    #[serde(rename = "phoneNumber")]
    phone_number: &'a str,
}

impl WebhookNotifier {
    pub fn new(webhook_url: Option<String>, admin_phone: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            webhook_url,
            admin_phone,
        }
    }

    fn compose_message(transaction: &NewTransaction) -> String {
        format!(
            "Payment completed. Order {} ({}): {} {} from {} ({}). Reference: {}.",
            transaction.order_id,
            transaction.product_id,
            transaction.amount,
            transaction.currency,
            transaction.customer_name,
            transaction.customer_email,
            transaction.reference,
        )
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, transaction: &NewTransaction) -> NotificationOutcome {
        let message = Self::compose_message(transaction);

        let Some(url) = &self.webhook_url else {
            tracing::warn!(
                order_id = %transaction.order_id,
                "NOTIFICATION_WEBHOOK_URL not set, skipping notification delivery"
            );
            return NotificationOutcome {
                sent: false,
                message,
            };
        };

        let request = NotificationRequest {
            message: &message,
            phone_number: &self.admin_phone,
        };

        let sent = match self.client.post(url).json(&request).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(
                    order_id = %transaction.order_id,
                    status = %response.status(),
                    "notification gateway rejected the message"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %transaction.order_id,
                    error = %e,
                    "failed to deliver notification"
                );
                false
            }
        };

        NotificationOutcome { sent, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionStatus;
    use bigdecimal::BigDecimal;

    fn transaction() -> NewTransaction {
        NewTransaction {
            order_id: "easybots-botpress-expert-1700000000000".to_string(),
            product_id: "botpress-expert".to_string(),
            user_id: "u1".to_string(),
            amount: BigDecimal::from(149),
            currency: "USD".to_string(),
            status: TransactionStatus::Paid,
            reference: "ref-1".to_string(),
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "+573001112233".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notify_without_gateway_degrades_to_unsent() {
        let notifier = WebhookNotifier::new(None, "+14155552671".to_string());
        let outcome = notifier.notify(&transaction()).await;

        assert!(!outcome.sent);
        assert!(outcome.message.contains("easybots-botpress-expert"));
        assert!(outcome.message.contains("149 USD"));
    }

    #[tokio::test]
    async fn test_notify_posts_to_gateway() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/notify")
            .match_header("content-type", "application/json")
            .with_status(200)
            .create_async()
            .await;

        let notifier = WebhookNotifier::new(
            Some(format!("{}/notify", server.url())),
            "+14155552671".to_string(),
        );
        let outcome = notifier.notify(&transaction()).await;

        mock.assert_async().await;
        assert!(outcome.sent);
    }

    #[tokio::test]
    async fn test_notify_gateway_error_degrades_to_unsent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/notify")
            .with_status(503)
            .create_async()
            .await;

        let notifier = WebhookNotifier::new(
            Some(format!("{}/notify", server.url())),
            "+14155552671".to_string(),
        );
        let outcome = notifier.notify(&transaction()).await;

        mock.assert_async().await;
        assert!(!outcome.sent);
    }
}
