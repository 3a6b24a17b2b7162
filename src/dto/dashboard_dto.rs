use chrono::NaiveDate;
use serde::Serialize;

// Recordatorio de service para un vehículo con service_date
#[derive(Debug, Serialize)]
pub struct ServiceReminder {
    pub car_id: i64,
    pub registration: Option<String>,
    pub make: String,
    pub model: String,
    pub service_date: NaiveDate,
    /// Negativo = vencido
    pub days_until_service: i64,
    /// true cuando faltan 7 días o menos
    pub critical: bool,
}

// Stats derivadas del dashboard de admin
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub ok: bool,
    pub fleet_count: i64,
    pub mot_alerts: i64,
    pub tax_alerts: i64,
    pub service_reminders: Vec<ServiceReminder>,
}
