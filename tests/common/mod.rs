//! Shared harness for router-level tests: the real app wired to the
//! in-memory store and a recording notifier.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::sync::Mutex;

use storefront_core::adapters::InMemoryTransactionStore;
use storefront_core::config::Config;
use storefront_core::domain::NewTransaction;
use storefront_core::payments::BoldClient;
use storefront_core::ports::{NotificationOutcome, Notifier};
use storefront_core::use_cases::ReconcileWebhook;
use storefront_core::{create_app, AppState};

pub const BOLD_SECRET: &str = "test-bold-secret";
pub const EPAYCO_CUST_ID: &str = "12345";
pub const EPAYCO_P_KEY: &str = "test-p-key";

type HmacSha256 = Hmac<Sha256>;

/// Notifier that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: AtomicUsize,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, transaction: &NewTransaction) -> NotificationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let message = format!("payment received for order {}", transaction.order_id);
        self.messages.lock().await.push(message.clone());
        NotificationOutcome {
            sent: true,
            message,
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryTransactionStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_config(test_config())
}

pub fn spawn_app_with_config(config: Config) -> TestApp {
    let store = Arc::new(InMemoryTransactionStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let reconciler = Arc::new(ReconcileWebhook::new(store.clone(), notifier.clone()));
    let bold = BoldClient::new(config.bold_api_url.clone(), config.bold_api_key.clone());

    let state = AppState {
        config: Arc::new(config),
        reconciler,
        bold,
    };

    TestApp {
        app: create_app(state),
        store,
        notifier,
    }
}

pub fn test_config() -> Config {
    Config {
        bold_webhook_secret: Some(BOLD_SECRET.to_string()),
        epayco_p_cust_id: Some(EPAYCO_CUST_ID.to_string()),
        epayco_p_key: Some(EPAYCO_P_KEY.to_string()),
        epayco_public_key: Some("test-public-key".to_string()),
        ..Config::default()
    }
}

pub fn hmac_hex(message: &[u8], key: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).unwrap();
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Signs a Bold body the way the provider does: HMAC over the raw bytes.
pub fn bold_sign(body: &[u8]) -> String {
    hmac_hex(body, BOLD_SECRET.as_bytes())
}

/// Signs ePayco fields the way the provider does: HMAC over the
/// caret-joined merchant and transaction fields, keyed with p_key.
pub fn epayco_sign(ref_payco: &str, transaction_id: &str, amount: &str, currency: &str) -> String {
    let message =
        format!("{EPAYCO_CUST_ID}^{EPAYCO_P_KEY}^{ref_payco}^{transaction_id}^{amount}^{currency}");
    hmac_hex(message.as_bytes(), EPAYCO_P_KEY.as_bytes())
}
