//! Ruta de sesión: claims del usuario autenticado para el frontend

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::SessionClaims;

pub fn create_session_router() -> Router<AppState> {
    Router::new().route("/", get(current_session))
}

async fn current_session(
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(json!({
        "ok": true,
        "user_id": claims.sub,
        "first_name": claims.first_name_or("Member"),
        "role": claims.role.as_deref().unwrap_or("user"),
    })))
}
