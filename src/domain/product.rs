//! Static product catalog backing checkout-link creation.
//! Prices are whole currency units; the Bold API takes minor units.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_usd: i64,
    pub price_cop: i64,
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: "botpress-expert",
        name: "BotPress Expert",
        description: "Master chatbot building and management with our premier BotPress development service.",
        price_usd: 149,
        price_cop: 596_000,
    },
    Product {
        id: "voiceflow-assistant",
        name: "Voiceflow Assistant",
        description: "Create sophisticated, voice-enabled applications and assistants for any platform.",
        price_usd: 129,
        price_cop: 516_000,
    },
    Product {
        id: "manychat-automator",
        name: "ManyChat Automator",
        description: "Automate your Messenger marketing to engage customers and drive sales effortlessly.",
        price_usd: 99,
        price_cop: 396_000,
    },
    Product {
        id: "dialogflow-integrator",
        name: "Dialogflow Integrator",
        description: "Integrate powerful conversational AI into your apps with Google's Dialogflow.",
        price_usd: 199,
        price_cop: 796_000,
    },
];

pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

impl Product {
    /// Price in minor units (cents) for the given ISO currency code.
    /// Anything other than USD charges the COP price.
    pub fn amount_in_cents(&self, currency: &str) -> i64 {
        let units = if currency == "USD" {
            self.price_usd
        } else {
            self.price_cop
        };
        units * 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_product() {
        let product = find("botpress-expert").expect("catalog entry");
        assert_eq!(product.price_usd, 149);
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find("no-such-product").is_none());
    }

    #[test]
    fn test_amount_in_cents_per_currency() {
        let product = find("manychat-automator").unwrap();
        assert_eq!(product.amount_in_cents("USD"), 9_900);
        assert_eq!(product.amount_in_cents("COP"), 39_600_000);
    }
}
