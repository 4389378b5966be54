pub mod notification;

pub use notification::WebhookNotifier;
