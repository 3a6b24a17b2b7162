//! Rutas de trips

use axum::{extract::State, routing::post, Extension, Json, Router};

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{CreateTripRequest, CreateTripResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;
use crate::utils::jwt::SessionClaims;

pub fn create_trip_router() -> Router<AppState> {
    Router::new().route("/", post(create_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    AppJson(request): AppJson<CreateTripRequest>,
) -> Result<Json<CreateTripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(&claims.sub, request).await?;
    Ok(Json(response))
}
