//! Controller del dashboard de admin
//!
//! Stats derivadas de display: tamaño del fleet, alertas de compliance
//! y recordatorios de service, calculadas en el momento de la lectura.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::dashboard_dto::{DashboardResponse, ServiceReminder};
use crate::models::car::Car;
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::AppError;

/// Umbral de criticidad: service a 7 días o menos (o vencido)
const CRITICAL_DAYS: i64 = 7;

pub struct DashboardController {
    repository: CarRepository,
}

/// Construir los recordatorios de service, ordenados por urgencia
pub fn build_service_reminders(cars: &[Car], today: NaiveDate) -> Vec<ServiceReminder> {
    let mut reminders: Vec<ServiceReminder> = cars
        .iter()
        .filter_map(|car| {
            let service_date = car.service_date?;
            let days = car.days_until_service(today)?;
            Some(ServiceReminder {
                car_id: car.car_id,
                registration: car.registration.clone(),
                make: car.make.clone(),
                model: car.model.clone(),
                service_date,
                days_until_service: days,
                critical: days <= CRITICAL_DAYS,
            })
        })
        .collect();

    reminders.sort_by_key(|r| r.days_until_service);
    reminders
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    pub async fn stats(&self) -> Result<DashboardResponse, AppError> {
        let cars = self.repository.find_all().await?;
        let today = chrono::Utc::now().date_naive();

        let fleet_count = cars.len() as i64;
        let mot_alerts = cars.iter().filter(|c| c.has_mot_alert()).count() as i64;
        let tax_alerts = cars.iter().filter(|c| c.has_tax_alert()).count() as i64;
        let service_reminders = build_service_reminders(&cars, today);

        Ok(DashboardResponse {
            ok: true,
            fleet_count,
            mot_alerts,
            tax_alerts,
            service_reminders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn car_with_service(car_id: i64, service_date: Option<NaiveDate>) -> Car {
        Car {
            car_id,
            make: "Porsche".to_string(),
            model: "911".to_string(),
            registration: Some("AB12CDE".to_string()),
            location: None,
            price: None,
            mileage: None,
            service_date,
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
    fn test_reminders_sorted_and_flagged() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let cars = vec![
            car_with_service(1, NaiveDate::from_ymd_opt(2026, 10, 1)),
            car_with_service(2, NaiveDate::from_ymd_opt(2026, 9, 2)),
            car_with_service(3, None),
            car_with_service(4, NaiveDate::from_ymd_opt(2026, 8, 25)),
        ];

        let reminders = build_service_reminders(&cars, today);
        assert_eq!(reminders.len(), 3);
        // orden: vencido primero, luego el más próximo
        assert_eq!(reminders[0].car_id, 4);
        assert!(reminders[0].critical);
        assert_eq!(reminders[0].days_until_service, -5);
        assert_eq!(reminders[1].car_id, 2);
        assert!(reminders[1].critical);
        assert_eq!(reminders[2].car_id, 1);
        assert!(!reminders[2].critical);
    }
}
