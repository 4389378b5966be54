use dotenvy::dotenv;
use std::env;

/// Runtime configuration, loaded once at startup.
///
/// Provider secrets are optional on purpose: a missing secret is a
/// request-time configuration error (500) on the route that needs it,
/// not a startup failure, so the rest of the service keeps serving.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: Option<String>,
    pub bold_webhook_secret: Option<String>,
    pub bold_api_key: Option<String>,
    pub bold_api_url: String,
    pub epayco_p_cust_id: Option<String>,
    pub epayco_p_key: Option<String>,
    pub epayco_public_key: Option<String>,
    pub notification_webhook_url: Option<String>,
    pub admin_phone: String,
    pub storefront_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL").ok(),
            bold_webhook_secret: env::var("BOLD_WEBHOOK_SECRET").ok(),
            bold_api_key: env::var("BOLD_API_KEY").ok(),
            bold_api_url: env::var("BOLD_API_URL")
                .unwrap_or_else(|_| "https://api.bold.co/v2/payment-links".to_string()),
            epayco_p_cust_id: env::var("EPAYCO_P_CUST_ID").ok(),
            epayco_p_key: env::var("EPAYCO_P_KEY").ok(),
            epayco_public_key: env::var("EPAYCO_PUBLIC_KEY").ok(),
            notification_webhook_url: env::var("NOTIFICATION_WEBHOOK_URL").ok(),
            admin_phone: env::var("ADMIN_PHONE").unwrap_or_else(|_| "+14155552671".to_string()),
            storefront_base_url: env::var("STOREFRONT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: 3000,
            database_url: None,
            bold_webhook_secret: None,
            bold_api_key: None,
            bold_api_url: "https://api.bold.co/v2/payment-links".to_string(),
            epayco_p_cust_id: None,
            epayco_p_key: None,
            epayco_public_key: None,
            notification_webhook_url: None,
            admin_phone: "+14155552671".to_string(),
            storefront_base_url: "http://localhost:3000".to_string(),
        }
    }
}
