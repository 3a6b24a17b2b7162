//! Rutas de vehículos: inducción, grid, detalle y lookups de specs

use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::controllers::car_controller::{CarController, InductCarForm};
use crate::dto::car_dto::{CarDetailResponse, CarResponse, InductCarResponse};
use crate::services::photo_service::PhotoUpload;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;
use crate::utils::validation::{normalize_sentinel, validate_date};

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", post(induct_car))
        .route("/", get(list_cars))
        .route("/trims", get(search_trims))
        .route("/details", post(trim_details))
        .route("/:id", get(get_car))
}

/// Extraer el formulario de inducción del multipart.
/// Los valores sentinela ("" y "-") en campos opcionales equivalen a null.
async fn parse_induct_form(mut multipart: Multipart) -> Result<InductCarForm, AppError> {
    let mut form = InductCarForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "photos" {
            let filename = field.file_name().unwrap_or("photo.jpg").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid photo upload: {}", e)))?
                .to_vec();
            form.photos.push(PhotoUpload {
                filename,
                content_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form field {}: {}", name, e)))?;

        match name.as_str() {
            "make" => form.make = value.trim().to_string(),
            "model" => form.model = value.trim().to_string(),
            "trim" => form.trim = value.trim().to_string(),
            "registration" => form.registration = normalize_sentinel(&value),
            "location" => form.location = normalize_sentinel(&value),
            "price" => {
                form.price = match normalize_sentinel(&value) {
                    None => None,
                    Some(v) => Some(v.parse::<i64>().map_err(|_| {
                        AppError::Validation("Price must be a valid number".to_string())
                    })?),
                }
            }
            "mileage" => {
                form.mileage = match normalize_sentinel(&value) {
                    None => None,
                    Some(v) => Some(v.parse::<i64>().map_err(|_| {
                        AppError::Validation("Mileage must be a valid number".to_string())
                    })?),
                }
            }
            "service_date" => {
                form.service_date = match normalize_sentinel(&value) {
                    None => None,
                    Some(v) => Some(validate_date("Service Date", &v)?),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn induct_car(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<InductCarResponse>, AppError> {
    let form = parse_induct_form(multipart).await?;
    let controller = CarController::new(state.pool.clone());
    let response = controller.induct(&state, form).await?;
    Ok(Json(response))
}

async fn list_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarDetailResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.detail(id).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct TrimSearchQuery {
    make: String,
    model: String,
    year: Option<String>,
}

async fn search_trims(
    State(state): State<AppState>,
    Query(query): Query<TrimSearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    if query.make.trim().is_empty() || query.model.trim().is_empty() {
        return Err(AppError::Validation("Missing make/model".to_string()));
    }

    let trims = state
        .specs_service()
        .search_trims(query.make.trim(), query.model.trim(), query.year.as_deref())
        .await?;
    Ok(Json(json!({ "ok": true, "trims": trims })))
}

#[derive(Debug, Deserialize)]
struct TrimDetailsRequest {
    make: String,
    model: String,
    trim: String,
}

async fn trim_details(
    State(state): State<AppState>,
    AppJson(request): AppJson<TrimDetailsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.make.trim().is_empty()
        || request.model.trim().is_empty()
        || request.trim.trim().is_empty()
    {
        return Err(AppError::Validation("Missing make/model/trim".to_string()));
    }

    let details = state
        .specs_service()
        .fetch_details(
            request.make.trim(),
            request.model.trim(),
            request.trim.trim(),
        )
        .await?;

    Ok(Json(json!({
        "ok": true,
        "top": {
            "make": details.make,
            "model": details.model,
            "specifications": details.specifications,
        },
    })))
}
