//! Rutas del área de admin: edición/baja de vehículos, sync de
//! licensing y dashboard. El gate de acceso ya garantizó rol admin.

use axum::{
    extract::{Multipart, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::car_controller::CarController;
use crate::controllers::dashboard_controller::DashboardController;
use crate::controllers::sync_controller::SyncController;
use crate::dto::car_dto::{SyncFleetResponse, UpdateCarFields};
use crate::dto::dashboard_dto::DashboardResponse;
use crate::services::photo_service::PhotoUpload;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{
    normalize_registration, normalize_sentinel, parse_int_lenient, validate_date,
};

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/cars/:id", post(update_car))
        .route("/cars/:id", delete(decommission_car))
        .route("/sync-licensing", post(sync_licensing))
        .route("/dashboard", get(dashboard))
}

/// Formulario de edición ya extraído del multipart
#[derive(Debug, Default)]
struct EditCarForm {
    fields: UpdateCarFields,
    removed_photos: Vec<String>,
    new_photos: Vec<PhotoUpload>,
}

/// Patch de campo numérico: sentinela → null, valor → parseado estricto
fn int_patch(field: &str, value: &str) -> Result<Option<i64>, AppError> {
    match normalize_sentinel(value) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a valid number", field))),
    }
}

/// Patch de fecha: sentinela → null, valor → YYYY-MM-DD estricto
fn date_patch(field: &str, value: &str) -> Result<Option<chrono::NaiveDate>, AppError> {
    match normalize_sentinel(value) {
        None => Ok(None),
        Some(v) => Ok(Some(validate_date(field, &v)?)),
    }
}

/// Extraer el formulario de edición del multipart. Las partes `photos`
/// (archivos) son la add-list; `removed_photos` (texto) las URLs a quitar.
/// Un campo ausente no se toca; un campo sentinela ("" o "-") pone null.
async fn parse_edit_form(mut multipart: Multipart) -> Result<EditCarForm, AppError> {
    let mut form = EditCarForm::default();

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
            form.new_photos.push(PhotoUpload {
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

        let fields = &mut form.fields;
        match name.as_str() {
            "removed_photos" => {
                if let Some(url) = normalize_sentinel(&value) {
                    form.removed_photos.push(url);
                }
            }
            // make/model son NOT NULL: sentinela aquí significa "no tocar"
            "make" => fields.make = normalize_sentinel(&value),
            "model" => fields.model = normalize_sentinel(&value),
            "registration" => {
                fields.registration =
                    Some(normalize_sentinel(&value).map(|v| normalize_registration(&v)))
            }
            "location" => fields.location = Some(normalize_sentinel(&value)),
            "price" => fields.price = Some(int_patch("Price", &value)?),
            "mileage" => fields.mileage = Some(int_patch("Mileage", &value)?),
            "service_date" => fields.service_date = Some(date_patch("Service Date", &value)?),
            "acceleration_0_100" => fields.acceleration_0_100 = Some(normalize_sentinel(&value)),
            "body_type" => fields.body_type = Some(normalize_sentinel(&value)),
            "engine_capacity" => fields.engine_capacity = Some(normalize_sentinel(&value)),
            "curb_weight" => fields.curb_weight = Some(normalize_sentinel(&value)),
            "cylinder_layout" => fields.cylinder_layout = Some(normalize_sentinel(&value)),
            "drive_wheels" => fields.drive_wheels = Some(normalize_sentinel(&value)),
            "engine_power" => fields.engine_power = Some(normalize_sentinel(&value)),
            "fuel_tank_capacity" => fields.fuel_tank_capacity = Some(normalize_sentinel(&value)),
            "gearbox_type" => fields.gearbox_type = Some(normalize_sentinel(&value)),
            "max_speed" => fields.max_speed = Some(normalize_sentinel(&value)),
            "max_torque" => fields.max_torque = Some(normalize_sentinel(&value)),
            "max_trunk_capacity" => fields.max_trunk_capacity = Some(normalize_sentinel(&value)),
            "number_of_cylinders" => {
                fields.number_of_cylinders =
                    Some(normalize_sentinel(&value).and_then(|v| parse_int_lenient(Some(&v))))
            }
            "number_of_gears" => {
                fields.number_of_gears =
                    Some(normalize_sentinel(&value).and_then(|v| parse_int_lenient(Some(&v))))
            }
            "number_of_seats" => {
                fields.number_of_seats =
                    Some(normalize_sentinel(&value).and_then(|v| parse_int_lenient(Some(&v))))
            }
            "mot" => fields.mot = Some(normalize_sentinel(&value)),
            "tax_status" => fields.tax_status = Some(normalize_sentinel(&value)),
            "tax_due_date" => fields.tax_due_date = Some(date_patch("Tax Due Date", &value)?),
            "year_of_manufacture" => {
                fields.year_of_manufacture =
                    Some(normalize_sentinel(&value).and_then(|v| parse_int_lenient(Some(&v))))
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let form = parse_edit_form(multipart).await?;
    let controller = CarController::new(state.pool.clone());
    let photo_service = state.photo_service();
    let car = controller
        .update(
            &photo_service,
            id,
            form.fields,
            form.removed_photos,
            form.new_photos,
        )
        .await?;
    Ok(Json(json!({ "ok": true, "car": car })))
}

async fn decommission_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let photo_service = state.photo_service();
    controller.decommission(&photo_service, id).await?;
    Ok(Json(json!({
        "ok": true,
        "message": "Car decommissioned from Vault"
    })))
}

async fn sync_licensing(
    State(state): State<AppState>,
) -> Result<Json<SyncFleetResponse>, AppError> {
    let controller = SyncController::new(state.pool.clone());
    let response = controller.sync_licensing(&state).await?;
    Ok(Json(response))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::header;

    const BOUNDARY: &str = "vaultboundary";

    fn file_part(name: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut part = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, name, filename, content_type
        )
        .into_bytes();
        part.extend_from_slice(data);
        part.extend_from_slice(b"\r\n");
        part
    }

    fn text_part(name: &str, value: &str) -> Vec<u8> {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        )
        .into_bytes()
    }

    async fn multipart_from(mut body: Vec<u8>) -> Multipart {
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        let request = Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_edit_form_binary_photos_land_in_add_list() {
        // bytes no UTF-8, como el inicio de un JPEG real
        let jpeg = [0xFFu8, 0xD8, 0xFF, 0xE0];
        let mut body = file_part("photos", "front.jpg", "image/jpeg", &jpeg);
        body.extend(text_part("location", "Geneva"));

        let form = parse_edit_form(multipart_from(body).await).await.unwrap();
        assert_eq!(form.new_photos.len(), 1);
        assert_eq!(form.new_photos[0].filename, "front.jpg");
        assert_eq!(form.new_photos[0].data, jpeg);
        assert_eq!(form.fields.location, Some(Some("Geneva".to_string())));
    }

    #[tokio::test]
    async fn test_edit_form_removed_photos_and_sentinels() {
        let mut body = text_part("removed_photos", "https://cdn/1/a.jpg");
        body.extend(text_part("removed_photos", "https://cdn/1/b.jpg"));
        body.extend(text_part("price", "-"));
        body.extend(text_part("registration", "ab12 cde"));

        let form = parse_edit_form(multipart_from(body).await).await.unwrap();
        assert!(form.new_photos.is_empty());
        assert_eq!(
            form.removed_photos,
            vec![
                "https://cdn/1/a.jpg".to_string(),
                "https://cdn/1/b.jpg".to_string()
            ]
        );
        // sentinela "-" pone el campo a null
        assert_eq!(form.fields.price, Some(None));
        assert_eq!(
            form.fields.registration,
            Some(Some("AB12CDE".to_string()))
        );
        // campos ausentes no se tocan
        assert!(form.fields.mileage.is_none());
    }

    #[tokio::test]
    async fn test_edit_form_rejects_bad_number() {
        let body = text_part("price", "not-a-number");
        let err = parse_edit_form(multipart_from(body).await).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
