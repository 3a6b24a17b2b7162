//! Modelo de Car
//!
//! Este módulo contiene el struct Car que mapea exactamente a la tabla
//! `cars` del schema PostgreSQL. Los campos técnicos provienen del lookup
//! de especificaciones; los de compliance del registro de licencias.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehículo del Vault - mapea a la tabla `cars`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub car_id: i64,
    pub make: String,
    pub model: String,
    pub registration: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    /// Odómetro registrado. Solo avanza con trips (reconciliación de pico),
    /// pero un edit directo de admin puede forzarlo hacia atrás.
    pub mileage: Option<i64>,
    pub service_date: Option<NaiveDate>,
    /// URLs públicas de las fotos; el orden de inserción es el orden de display
    pub pictures: Option<Vec<String>>,

    // Especificaciones técnicas (lookup por trim)
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

    // Compliance (registro de licencias, o override manual)
    pub mot: Option<String>,
    pub tax_status: Option<String>,
    pub tax_due_date: Option<NaiveDate>,
    pub year_of_manufacture: Option<i32>,
    pub last_synced_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Lista de fotos, nunca null
    pub fn picture_urls(&self) -> Vec<String> {
        self.pictures.clone().unwrap_or_default()
    }

    /// Días hasta el próximo service (negativo = vencido)
    pub fn days_until_service(&self, today: NaiveDate) -> Option<i64> {
        self.service_date
            .map(|due| (due - today).num_days())
    }

    /// Alerta de MOT: cualquier estado distinto de "Valid"
    pub fn has_mot_alert(&self) -> bool {
        self.mot.as_deref() != Some("Valid")
    }

    /// Alerta de tax: cualquier estado distinto de "Taxed"
    pub fn has_tax_alert(&self) -> bool {
        self.tax_status.as_deref() != Some("Taxed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_car() -> Car {
        Car {
            car_id: 1,
            make: "Porsche".to_string(),
            model: "911".to_string(),
            registration: None,
            location: None,
            price: None,
            mileage: None,
            service_date: None,
            pictures: None,
            acceleration_0_100: None,
            body_type: None,
            engine_capacity: None,
            curb_weight: None,
            cylinder_layout: None,
            drive_wheels: None,
            engine_power: None,
            fuel_tank_capacity: None,
            gearbox_type: None,
            max_speed: None,
            max_torque: None,
            max_trunk_capacity: None,
            number_of_cylinders: None,
            number_of_gears: None,
            number_of_seats: None,
            mot: None,
            tax_status: None,
            tax_due_date: None,
            year_of_manufacture: None,
            last_synced_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_days_until_service() {
        let mut car = base_car();
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(car.days_until_service(today), None);

        car.service_date = NaiveDate::from_ymd_opt(2026, 9, 6);
        assert_eq!(car.days_until_service(today), Some(7));

        car.service_date = NaiveDate::from_ymd_opt(2026, 8, 20);
        assert_eq!(car.days_until_service(today), Some(-10));
    }

    #[test]
    fn test_compliance_alerts() {
        let mut car = base_car();
        // sin datos de compliance cuenta como alerta
        assert!(car.has_mot_alert());
        assert!(car.has_tax_alert());

        car.mot = Some("Valid".to_string());
        car.tax_status = Some("Taxed".to_string());
        assert!(!car.has_mot_alert());
        assert!(!car.has_tax_alert());

        car.mot = Some("Not valid".to_string());
        assert!(car.has_mot_alert());
    }
}
