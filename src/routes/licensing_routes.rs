//! Ruta de consulta directa al registro de licencias

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::services::licensing_service::LicensingData;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;
use crate::utils::validation::normalize_registration;

pub fn create_licensing_router() -> Router<AppState> {
    Router::new().route("/", post(licensing_lookup))
}

#[derive(Debug, Deserialize)]
struct LicensingLookupRequest {
    registration: String,
}

fn licensing_envelope(data: LicensingData) -> serde_json::Value {
    json!({ "ok": true, "licensing": data })
}

async fn licensing_lookup(
    State(state): State<AppState>,
    AppJson(request): AppJson<LicensingLookupRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let plate = normalize_registration(&request.registration);
    if plate.is_empty() {
        return Err(AppError::Validation("Missing registration".to_string()));
    }

    let data = state.licensing_service().lookup(&plate).await?;
    Ok(Json(licensing_envelope(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_licensing_envelope_shape() {
        let data = LicensingData {
            registration: "AB12CDE".to_string(),
            mot: Some("Valid".to_string()),
            tax_status: Some("Taxed".to_string()),
            tax_due_date: None,
            year_of_manufacture: Some(2019),
        };

        let body = licensing_envelope(data);
        assert_eq!(body["ok"], true);
        assert_eq!(body["licensing"]["registration"], "AB12CDE");
        assert_eq!(body["licensing"]["mot"], "Valid");
    }
}
