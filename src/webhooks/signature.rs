//! Webhook signature verification.
//!
//! Pure functions of (payload, claimed signature, key material). Both
//! providers send hex-encoded HMAC-SHA256 values; comparison goes through
//! `Mac::verify_slice` so it is constant-time. A claimed signature that is
//! not valid hex cannot match and fails verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn verify_hex_hmac(message: &[u8], claimed_hex: &str, key: &[u8]) -> bool {
    let claimed = match hex::decode(claimed_hex.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(message);
    mac.verify_slice(&claimed).is_ok()
}

/// Bold signs the exact raw body bytes with the shared webhook secret.
/// The body must not be parsed and re-serialized before verification.
pub fn verify_bold_signature(raw_body: &[u8], claimed_hex: &str, secret: &str) -> bool {
    verify_hex_hmac(raw_body, claimed_hex, secret.as_bytes())
}

/// The string ePayco signs: merchant customer id, private key, and four
/// transaction fields, caret-joined in this fixed order.
pub fn epayco_signature_string(
    p_cust_id_cliente: &str,
    p_key: &str,
    ref_payco: &str,
    transaction_id: &str,
    amount: &str,
    currency_code: &str,
) -> String {
    format!("{p_cust_id_cliente}^{p_key}^{ref_payco}^{transaction_id}^{amount}^{currency_code}")
}

/// ePayco signs the caret-joined field string, keyed with the merchant
/// private key.
#[allow(clippy::too_many_arguments)]
pub fn verify_epayco_signature(
    claimed_hex: &str,
    p_cust_id_cliente: &str,
    p_key: &str,
    ref_payco: &str,
    transaction_id: &str,
    amount: &str,
    currency_code: &str,
) -> bool {
    let message = epayco_signature_string(
        p_cust_id_cliente,
        p_key,
        ref_payco,
        transaction_id,
        amount,
        currency_code,
    );
    verify_hex_hmac(message.as_bytes(), claimed_hex, p_key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hmac_hex(message: &[u8], key: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(key).unwrap();
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_bold_signature_round_trip() {
        let body = br#"{"event":"transaction.created","data":{"reference":"o-1"}}"#;
        let secret = "test-secret";
        let signature = hmac_hex(body, secret.as_bytes());

        assert!(verify_bold_signature(body, &signature, secret));
    }

    #[test]
    fn test_bold_signature_rejects_mutated_body() {
        let body = b"payload-bytes";
        let secret = "test-secret";
        let signature = hmac_hex(body, secret.as_bytes());

        for i in 0..body.len() {
            let mut mutated = body.to_vec();
            mutated[i] ^= 0x01;
            assert!(
                !verify_bold_signature(&mutated, &signature, secret),
                "mutation at byte {i} should invalidate the signature"
            );
        }
    }

    #[test]
    fn test_bold_signature_rejects_wrong_secret() {
        let body = b"payload-bytes";
        let signature = hmac_hex(body, b"test-secret");

        assert!(!verify_bold_signature(body, &signature, "other-secret"));
    }

    #[test]
    fn test_bold_signature_rejects_non_hex() {
        assert!(!verify_bold_signature(b"payload", "not hex at all", "secret"));
    }

    #[test]
    fn test_epayco_signature_string_layout() {
        let signed = epayco_signature_string("12345", "p-key", "ref-1", "tx-9", "150.00", "COP");
        assert_eq!(signed, "12345^p-key^ref-1^tx-9^150.00^COP");
    }

    #[test]
    fn test_epayco_signature_round_trip() {
        let signed = epayco_signature_string("12345", "p-key", "ref-1", "tx-9", "150.00", "COP");
        let signature = hmac_hex(signed.as_bytes(), b"p-key");

        assert!(verify_epayco_signature(
            &signature, "12345", "p-key", "ref-1", "tx-9", "150.00", "COP"
        ));
        assert!(!verify_epayco_signature(
            &signature, "12345", "p-key", "ref-1", "tx-9", "150.01", "COP"
        ));
    }
}
