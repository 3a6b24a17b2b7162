//! Verificación de firmas de los webhooks del proveedor de identidad
//!
//! El proveedor firma cada delivery con HMAC-SHA256 sobre
//! `{id}.{timestamp}.{payload}`, con el secreto base64 (prefijo `whsec_`).
//! El header de firma puede traer varias versiones separadas por espacio
//! (`v1,<base64>`); basta con que una coincida.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::utils::errors::{AppError, AppResult};

pub struct WebhookVerifier {
    key: ring::hmac::Key,
}

impl WebhookVerifier {
    pub fn new(secret: &str) -> AppResult<Self> {
        let raw = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key_bytes = BASE64
            .decode(raw)
            .map_err(|_| AppError::Internal("Invalid webhook secret encoding".to_string()))?;

        Ok(Self {
            key: ring::hmac::Key::new(ring::hmac::HMAC_SHA256, &key_bytes),
        })
    }

    /// Verificar la firma de un delivery
    pub fn verify(
        &self,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<()> {
        let mut signed_content = format!("{}.{}.", msg_id, timestamp).into_bytes();
        signed_content.extend_from_slice(payload);

        let signature = ring::hmac::sign(&self.key, &signed_content);
        let expected = BASE64.encode(signature.as_ref());

        let matches = signature_header
            .split_whitespace()
            .filter_map(|part| part.strip_prefix("v1,"))
            .any(|candidate| candidate == expected);

        if matches {
            Ok(())
        } else {
            Err(AppError::BadRequest(
                "Webhook verification failed".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, msg_id: &str, timestamp: &str, payload: &[u8]) -> String {
        let raw = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key = ring::hmac::Key::new(ring::hmac::HMAC_SHA256, &BASE64.decode(raw).unwrap());
        let mut content = format!("{}.{}.", msg_id, timestamp).into_bytes();
        content.extend_from_slice(payload);
        format!("v1,{}", BASE64.encode(ring::hmac::sign(&key, &content).as_ref()))
    }

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    #[test]
    fn test_valid_signature() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let payload = br#"{"type":"user.created"}"#;
        let header = sign(SECRET, "msg_1", "1693000000", payload);
        assert!(verifier
            .verify("msg_1", "1693000000", payload, &header)
            .is_ok());
    }

    #[test]
    fn test_invalid_signature() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        assert!(verifier
            .verify("msg_1", "1693000000", b"{}", "v1,bm90LXZhbGlk")
            .is_err());
    }

    #[test]
    fn test_multiple_signature_versions() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let payload = br#"{"type":"user.deleted"}"#;
        let good = sign(SECRET, "msg_2", "1693000001", payload);
        let header = format!("v1,AAAA {}", good);
        assert!(verifier
            .verify("msg_2", "1693000001", payload, &header)
            .is_ok());
    }
}
