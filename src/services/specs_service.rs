//! Cliente del proveedor de especificaciones técnicas (specs por trim)
//!
//! Este módulo consulta el proveedor externo de datos de vehículos:
//! búsqueda de trims por make/model y detalle de especificaciones por
//! (make, model, trim). El bag de especificaciones viene keyed por
//! nombres legibles y se mapea al schema de `cars`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_int_lenient;

/// Detalle crudo devuelto por el proveedor (primer elemento del array)
#[derive(Debug, Clone, Deserialize)]
pub struct TrimDetails {
    pub make: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub specifications: HashMap<String, String>,
}

/// Especificaciones mapeadas a los campos de la tabla `cars`
#[derive(Debug, Clone, Default)]
pub struct MappedSpecs {
    pub acceleration_0_100: Option<String>,
    pub body_type: Option<String>,
    pub engine_capacity: Option<String>,
    pub curb_weight: Option<String>,
    pub cylinder_layout: Option<String>,
    pub drive_wheels: Option<String>,
    pub engine_power: Option<String>,
    pub fuel_tank_capacity: Option<String>,
    pub gearbox_type: Option<String>,
    pub max_speed: Option<String>,
    pub max_torque: Option<String>,
    pub max_trunk_capacity: Option<String>,
    pub number_of_cylinders: Option<i32>,
    pub number_of_gears: Option<i32>,
    pub number_of_seats: Option<i32>,
}

/// Mapeo campo de DB -> clave legible del proveedor
const SPEC_MAP: &[(&str, &str)] = &[
    ("acceleration_0_100", "Acceleration (0-100 km/h)"),
    ("body_type", "Body type"),
    ("engine_capacity", "Capacity"),
    ("curb_weight", "Curb weight"),
    ("cylinder_layout", "Cylinder layout"),
    ("drive_wheels", "Drive wheels"),
    ("engine_power", "Engine power"),
    ("fuel_tank_capacity", "Fuel tank capacity"),
    ("gearbox_type", "Gearbox type"),
    ("max_speed", "Max speed"),
    ("max_torque", "Maximum torque"),
    ("max_trunk_capacity", "Max trunk capacity"),
    ("number_of_cylinders", "Number of cylinders"),
    ("number_of_gears", "Number of gear"),
    ("number_of_seats", "Number of seater"),
];

/// Mapear el bag de especificaciones del proveedor al schema de cars.
/// Los campos enteros se parsean de forma tolerante (fallo → null).
pub fn map_specifications(specs: &HashMap<String, String>) -> MappedSpecs {
    let get = |db_field: &str| -> Option<String> {
        SPEC_MAP
            .iter()
            .find(|(field, _)| *field == db_field)
            .and_then(|(_, api_key)| specs.get(*api_key).cloned())
    };

    MappedSpecs {
        acceleration_0_100: get("acceleration_0_100"),
        body_type: get("body_type"),
        engine_capacity: get("engine_capacity"),
        curb_weight: get("curb_weight"),
        cylinder_layout: get("cylinder_layout"),
        drive_wheels: get("drive_wheels"),
        engine_power: get("engine_power"),
        fuel_tank_capacity: get("fuel_tank_capacity"),
        gearbox_type: get("gearbox_type"),
        max_speed: get("max_speed"),
        max_torque: get("max_torque"),
        max_trunk_capacity: get("max_trunk_capacity"),
        number_of_cylinders: parse_int_lenient(get("number_of_cylinders").as_deref()),
        number_of_gears: parse_int_lenient(get("number_of_gears").as_deref()),
        number_of_seats: parse_int_lenient(get("number_of_seats").as_deref()),
    }
}

pub struct SpecsService {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SpecsService {
    pub fn new(base_url: String, api_key: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Buscar trims disponibles para un make/model (year opcional)
    pub async fn search_trims(
        &self,
        make: &str,
        model: &str,
        year: Option<&str>,
    ) -> AppResult<serde_json::Value> {
        let mut url = format!(
            "{}/cartrims?make={}&model={}",
            self.base_url,
            urlencoding::encode(make),
            urlencoding::encode(model)
        );
        if let Some(year) = year {
            url.push_str(&format!("&year={}", urlencoding::encode(year)));
        }

        log::info!("🔎 Trim search: {} {}", make, model);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Trim search failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Trim search body error: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Trim search failed with status {}: {}",
                status, text
            )));
        }

        let trims: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| AppError::ExternalApi("Invalid JSON from specs provider".to_string()))?;

        if !trims.is_array() {
            return Err(AppError::ExternalApi(
                "Unexpected trims response shape".to_string(),
            ));
        }

        Ok(trims)
    }

    /// Detalle de especificaciones por (make, model, trim).
    /// Se toma siempre el primer resultado del proveedor.
    pub async fn fetch_details(
        &self,
        make: &str,
        model: &str,
        trim: &str,
    ) -> AppResult<TrimDetails> {
        let url = format!(
            "{}/cardetails?make={}&model={}&trim={}",
            self.base_url,
            urlencoding::encode(make),
            urlencoding::encode(model),
            urlencoding::encode(trim)
        );

        log::info!("🔎 Spec lookup: {} {} ({})", make, model, trim);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Spec lookup failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Spec lookup body error: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Spec lookup failed with status {}: {}",
                status, text
            )));
        }

        let mut results: Vec<TrimDetails> = serde_json::from_str(&text)
            .map_err(|_| AppError::ExternalApi("Invalid JSON from specs provider".to_string()))?;

        if results.is_empty() {
            return Err(AppError::NotFound(
                "No details found for this trim".to_string(),
            ));
        }

        Ok(results.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs_bag() -> HashMap<String, String> {
        let mut bag = HashMap::new();
        bag.insert(
            "Acceleration (0-100 km/h)".to_string(),
            "3.5 s".to_string(),
        );
        bag.insert("Engine power".to_string(), "450 hp".to_string());
        bag.insert("Max speed".to_string(), "308 km/h".to_string());
        bag.insert("Number of cylinders".to_string(), "6".to_string());
        bag.insert("Number of seater".to_string(), "4 seats".to_string());
        bag
    }

    #[test]
    fn test_map_specifications() {
        let mapped = map_specifications(&specs_bag());
        assert_eq!(mapped.acceleration_0_100.as_deref(), Some("3.5 s"));
        assert_eq!(mapped.engine_power.as_deref(), Some("450 hp"));
        assert_eq!(mapped.max_speed.as_deref(), Some("308 km/h"));
        assert_eq!(mapped.number_of_cylinders, Some(6));
        assert_eq!(mapped.number_of_seats, Some(4));
        // claves ausentes quedan en null
        assert!(mapped.gearbox_type.is_none());
        assert!(mapped.number_of_gears.is_none());
    }

    #[test]
    fn test_map_specifications_empty_bag() {
        let mapped = map_specifications(&HashMap::new());
        assert!(mapped.acceleration_0_100.is_none());
        assert!(mapped.number_of_cylinders.is_none());
    }
}
