//! Cliente del registro gubernamental de licencias vehiculares
//!
//! Consulta por matrícula normalizada. Devuelve estado de MOT, tax y
//! año de fabricación. Los fallos de este lookup se tratan como
//! best-effort durante la inducción y el sync (el caller decide).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AppError, AppResult};

/// Respuesta cruda del registro de licencias
#[derive(Debug, Deserialize)]
struct RegistryEnquiryResponse {
    #[serde(rename = "registrationNumber")]
    registration_number: Option<String>,
    #[serde(rename = "motStatus")]
    mot_status: Option<String>,
    #[serde(rename = "taxStatus")]
    tax_status: Option<String>,
    #[serde(rename = "artEndDate")]
    art_end_date: Option<String>,
    #[serde(rename = "yearOfManufacture")]
    year_of_manufacture: Option<i32>,
}

/// Datos de compliance mapeados al schema de cars
#[derive(Debug, Clone, Serialize)]
pub struct LicensingData {
    pub registration: String,
    pub mot: Option<String>,
    pub tax_status: Option<String>,
    pub tax_due_date: Option<NaiveDate>,
    pub year_of_manufacture: Option<i32>,
}

pub struct LicensingService {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl LicensingService {
    pub fn new(base_url: String, api_key: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Consultar una matrícula ya normalizada (mayúsculas, sin espacios)
    pub async fn lookup(&self, registration: &str) -> AppResult<LicensingData> {
        let url = format!("{}/vehicles", self.base_url);

        log::info!("🛂 Licensing enquiry: {}", registration);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "registrationNumber": registration }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Licensing enquiry failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Licensing body error: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Licensing enquiry failed with status {}: {}",
                status, text
            )));
        }

        let raw: RegistryEnquiryResponse = serde_json::from_str(&text).map_err(|_| {
            AppError::ExternalApi("Invalid JSON from licensing registry".to_string())
        })?;

        Ok(LicensingData {
            registration: raw
                .registration_number
                .unwrap_or_else(|| registration.to_string()),
            mot: raw.mot_status,
            tax_status: raw.tax_status,
            tax_due_date: raw
                .art_end_date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
            year_of_manufacture: raw.year_of_manufacture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_response_mapping() {
        let body = r#"{
            "registrationNumber": "AB12CDE",
            "motStatus": "Valid",
            "taxStatus": "Taxed",
            "artEndDate": "2026-03-01",
            "yearOfManufacture": 2019
        }"#;
        let raw: RegistryEnquiryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(raw.mot_status.as_deref(), Some("Valid"));
        assert_eq!(raw.year_of_manufacture, Some(2019));
        let due = raw
            .art_end_date
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
        assert_eq!(due, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn test_registry_response_partial() {
        // el registro puede omitir cualquier campo
        let raw: RegistryEnquiryResponse = serde_json::from_str("{}").unwrap();
        assert!(raw.mot_status.is_none());
        assert!(raw.art_end_date.is_none());
    }
}
