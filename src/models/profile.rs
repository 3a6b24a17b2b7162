//! Modelo de Profile
//!
//! Los profiles son autoría exclusiva del webhook del proveedor de
//! identidad; la aplicación nunca los escribe directamente.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Perfil de miembro - mapea a la tabla `profiles`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Id del usuario en el proveedor de identidad (primary key)
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    /// "admin" o "user"; el schema SQL lo deja en "user" por defecto
    pub role: String,
    pub updated_at: DateTime<Utc>,
}
