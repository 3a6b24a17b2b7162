//! Rutas de webhooks del proveedor de identidad
//!
//! El endpoint es público pero exige una firma HMAC válida sobre el
//! body crudo. Se verifica ANTES de parsear el JSON.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Router,
};

use crate::controllers::webhook_controller::WebhookController;
use crate::dto::webhook_dto::IdentityEvent;
use crate::services::webhook_service::WebhookVerifier;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_webhook_router() -> Router<AppState> {
    Router::new().route("/identity", post(identity_webhook))
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing webhook headers".to_string()))
}

async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let msg_id = required_header(&headers, "svix-id")?;
    let timestamp = required_header(&headers, "svix-timestamp")?;
    let signature = required_header(&headers, "svix-signature")?;

    let verifier = WebhookVerifier::new(&state.config.identity_webhook_secret)?;
    verifier.verify(msg_id, timestamp, &body, signature)?;

    let event: IdentityEvent = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid webhook payload".to_string()))?;

    let controller = WebhookController::new(state.pool.clone());
    controller.handle_identity_event(event).await?;

    Ok("Vault synchronized")
}
