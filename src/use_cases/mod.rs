pub mod reconcile;

pub use reconcile::{ReconcileOutcome, ReconcileWebhook};
