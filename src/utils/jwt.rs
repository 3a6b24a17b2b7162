//! Utilidades JWT
//!
//! Este módulo verifica los tokens de sesión emitidos por el proveedor
//! de identidad externo y extrae los claims de la aplicación.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Claims de sesión tal como los emite el proveedor de identidad.
/// La clave canónica del rol es `role` en minúsculas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

impl SessionClaims {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn first_name_or(&self, fallback: &str) -> String {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Verificar y decodificar un token de sesión
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Invalid session token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    fn claims(role: Option<&str>) -> SessionClaims {
        SessionClaims {
            sub: "user_123".to_string(),
            first_name: Some("Ana".to_string()),
            role: role.map(|r| r.to_string()),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            iat: chrono::Utc::now().timestamp() as usize,
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let token = make_token(&claims(Some("admin")), "secret");
        let decoded = verify_session_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "user_123");
        assert!(decoded.is_admin());
    }

    #[test]
    fn test_reject_wrong_secret() {
        let token = make_token(&claims(Some("admin")), "secret");
        assert!(verify_session_token(&token, "other").is_err());
    }

    #[test]
    fn test_role_defaults_to_user() {
        let token = make_token(&claims(None), "secret");
        let decoded = verify_session_token(&token, "secret").unwrap();
        assert!(!decoded.is_admin());
    }

    #[test]
    fn test_first_name_fallback() {
        let mut c = claims(None);
        c.first_name = None;
        assert_eq!(c.first_name_or("User"), "User");
    }
}
