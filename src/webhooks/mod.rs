//! Inbound webhook processing: signature verification and normalization
//! of provider payloads into the canonical transaction record.

pub mod bold;
pub mod epayco;
pub mod signature;

use crate::domain::NewTransaction;

/// A verified, normalized webhook event ready for reconciliation.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    /// First observation of a checkout: persist a fresh record.
    Created(NewTransaction),
    /// A later observation of a known checkout: overwrite its status.
    Updated(NewTransaction),
    /// An event type this system intentionally ignores. Must still be
    /// acknowledged with a success response or the provider retries.
    Ignored { event_type: String },
}
