//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los clientes externos se construyen una
//! sola vez en el arranque y se inyectan en los handlers.

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::services::licensing_service::LicensingService;
use crate::services::photo_service::PhotoService;
use crate::services::specs_service::SpecsService;
use crate::storage::StorageBackend;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
    pub storage: Arc<dyn StorageBackend>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, storage: Arc<dyn StorageBackend>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            pool,
            config,
            http_client,
            storage,
        }
    }

    pub fn specs_service(&self) -> SpecsService {
        SpecsService::new(
            self.config.specs_api_url.clone(),
            self.config.specs_api_key.clone(),
            self.http_client.clone(),
        )
    }

    pub fn licensing_service(&self) -> LicensingService {
        LicensingService::new(
            self.config.licensing_api_url.clone(),
            self.config.licensing_api_key.clone(),
            self.http_client.clone(),
        )
    }

    pub fn photo_service(&self) -> PhotoService {
        PhotoService::new(self.storage.clone())
    }
}
