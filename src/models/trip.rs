//! Modelo de Trip
//!
//! Un trip registra el uso de un vehículo por un miembro. Nunca se
//! actualiza ni se borra desde la aplicación.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Trip registrado - mapea a la tabla `trips`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub trip_id: i64,
    pub car_id: i64,
    /// Id del miembro en el proveedor de identidad
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mileage_before: i64,
    pub mileage_after: i64,
    pub rating: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
