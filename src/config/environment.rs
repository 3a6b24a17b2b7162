//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Secreto compartido con el proveedor de identidad para verificar sesiones
    pub session_jwt_secret: String,
    /// Secreto de firma de los webhooks del proveedor de identidad (prefijo whsec_)
    pub identity_webhook_secret: String,
    pub cors_origins: Vec<String>,
    // Proveedor de especificaciones técnicas (specs por trim)
    pub specs_api_url: String,
    pub specs_api_key: String,
    // Registro de licencias vehiculares (consulta por matrícula)
    pub licensing_api_url: String,
    pub licensing_api_key: String,
    // Object storage para fotos
    pub storage_bucket: String,
    pub storage_region: String,
    pub storage_endpoint: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    /// Base pública desde la que se sirven los blobs (sin slash final)
    pub storage_public_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .expect("SESSION_JWT_SECRET must be set"),
            identity_webhook_secret: env::var("IDENTITY_WEBHOOK_SECRET")
                .expect("IDENTITY_WEBHOOK_SECRET must be set"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            specs_api_url: env::var("SPECS_API_URL")
                .unwrap_or_else(|_| "https://api.api-ninjas.com/v1".to_string()),
            specs_api_key: env::var("SPECS_API_KEY").expect("SPECS_API_KEY must be set"),
            licensing_api_url: env::var("LICENSING_API_URL").unwrap_or_else(|_| {
                "https://driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1".to_string()
            }),
            licensing_api_key: env::var("LICENSING_API_KEY")
                .expect("LICENSING_API_KEY must be set"),
            storage_bucket: env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set"),
            storage_region: env::var("STORAGE_REGION").unwrap_or_else(|_| "auto".to_string()),
            storage_endpoint: env::var("STORAGE_ENDPOINT").expect("STORAGE_ENDPOINT must be set"),
            storage_access_key: env::var("STORAGE_ACCESS_KEY")
                .expect("STORAGE_ACCESS_KEY must be set"),
            storage_secret_key: env::var("STORAGE_SECRET_KEY")
                .expect("STORAGE_SECRET_KEY must be set"),
            storage_public_url: env::var("STORAGE_PUBLIC_URL")
                .expect("STORAGE_PUBLIC_URL must be set")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
