mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod storage;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use config::EnvironmentConfig;
use middleware::access_gate::access_gate;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;
use storage::S3Backend;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🏛️ Vault Fleet - Private Collection Backend");
    info!("===========================================");

    let environment_config = EnvironmentConfig::default();

    // Inicializar base de datos
    if let Ok(url) = std::env::var("DATABASE_URL") {
        info!("🔌 Base de datos: {}", database::connection::mask_database_url(&url));
    }
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ PostgreSQL conectado");

    // Inicializar object storage
    let storage = match S3Backend::new(&environment_config) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            error!("❌ Error configurando object storage: {}", e);
            return Err(anyhow::anyhow!("Error de storage: {}", e));
        }
    };
    info!("✅ Object storage configurado");

    // CORS: permisivo en desarrollo, orígenes configurados en producción
    let cors = if environment_config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(environment_config.cors_origins.clone())
    };

    // Crear router de la API
    let app_state = AppState::new(pool, environment_config.clone(), storage);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/cars", routes::car_routes::create_car_router())
        .nest("/api/trips", routes::trip_routes::create_trip_router())
        .nest("/api/admin", routes::admin_routes::create_admin_router())
        .nest("/api/webhooks", routes::webhook_routes::create_webhook_router())
        .nest("/api/licensing", routes::licensing_routes::create_licensing_router())
        .nest("/api/contact", routes::contact_routes::create_contact_router())
        .nest("/api/session", routes::session_routes::create_session_router())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            access_gate,
        ))
        // fotos de hasta 15MB por parte
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = environment_config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Endpoints - Cars:");
    info!("   POST /api/cars - Inducción de vehículo (admin, multipart)");
    info!("   GET  /api/cars - Grid del fleet");
    info!("   GET  /api/cars/:id - Detalle con stats");
    info!("   GET  /api/cars/trims - Búsqueda de trims");
    info!("   POST /api/cars/details - Specs por trim");
    info!("🏁 Endpoints - Trips:");
    info!("   POST /api/trips - Registrar trip");
    info!("🛂 Endpoints - Admin:");
    info!("   POST /api/admin/cars/:id - Editar vehículo (multipart)");
    info!("   DELETE /api/admin/cars/:id - Decommission");
    info!("   POST /api/admin/sync-licensing - Sync batch de compliance");
    info!("   GET  /api/admin/dashboard - Stats del fleet");
    info!("🔗 Endpoints - Integraciones:");
    info!("   POST /api/licensing - Consulta directa por matrícula");
    info!("   POST /api/webhooks/identity - Webhook del proveedor de identidad");
    info!("   POST /api/contact - Formulario de contacto");
    info!("   GET  /api/session - Claims de la sesión actual");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vault_fleet",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
