//! Ruta del formulario de contacto
//!
//! Solo registra el mensaje; el envío de email queda fuera del backend.

use axum::{routing::post, Json, Router};
use serde_json::json;
use validator::Validate;

use crate::dto::contact_dto::ContactRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

async fn submit_contact(
    AppJson(request): AppJson<ContactRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    log::info!(
        "📬 Contact message from {} <{}>",
        request.name.trim(),
        request.email.trim()
    );

    Ok(Json(json!({ "ok": true, "message": "Message received" })))
}
