use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::trip_dto::TripResponse;
use crate::models::car::Car;

// Response de inducción de un vehículo nuevo
#[derive(Debug, Serialize)]
pub struct InductCarResponse {
    pub ok: bool,
    pub car_id: i64,
    pub pictures: Vec<String>,
}

// Response de vehículo en el grid del fleet
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub car_id: i64,
    pub make: String,
    pub model: String,
    pub registration: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub service_date: Option<NaiveDate>,
    pub pictures: Vec<String>,
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
    pub mot: Option<String>,
    pub tax_status: Option<String>,
    pub tax_due_date: Option<NaiveDate>,
    pub year_of_manufacture: Option<i32>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        let pictures = car.picture_urls();
        Self {
            car_id: car.car_id,
            make: car.make,
            model: car.model,
            registration: car.registration,
            location: car.location,
            price: car.price,
            mileage: car.mileage,
            service_date: car.service_date,
            pictures,
            acceleration_0_100: car.acceleration_0_100,
            body_type: car.body_type,
            engine_capacity: car.engine_capacity,
            curb_weight: car.curb_weight,
            cylinder_layout: car.cylinder_layout,
            drive_wheels: car.drive_wheels,
            engine_power: car.engine_power,
            fuel_tank_capacity: car.fuel_tank_capacity,
            gearbox_type: car.gearbox_type,
            max_speed: car.max_speed,
            max_torque: car.max_torque,
            max_trunk_capacity: car.max_trunk_capacity,
            number_of_cylinders: car.number_of_cylinders,
            number_of_gears: car.number_of_gears,
            number_of_seats: car.number_of_seats,
            mot: car.mot,
            tax_status: car.tax_status,
            tax_due_date: car.tax_due_date,
            year_of_manufacture: car.year_of_manufacture,
            last_synced_at: car.last_synced_at,
            created_at: car.created_at,
        }
    }
}

// Response de detalle con stats derivadas para la página del vehículo
#[derive(Debug, Serialize)]
pub struct CarDetailResponse {
    #[serde(flatten)]
    pub car: CarResponse,
    pub trip_count: i64,
    pub average_rating: Option<f64>,
    pub days_until_service: Option<i64>,
    pub trips: Vec<TripResponse>,
}

// Campos editables vía el formulario de edición de admin.
// Todos opcionales: solo se tocan los campos presentes en el form.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCarFields {
    pub make: Option<String>,
    pub model: Option<String>,
    pub registration: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub price: Option<Option<i64>>,
    pub mileage: Option<Option<i64>>,
    pub service_date: Option<Option<NaiveDate>>,
    pub acceleration_0_100: Option<Option<String>>,
    pub body_type: Option<Option<String>>,
    pub engine_capacity: Option<Option<String>>,
    pub curb_weight: Option<Option<String>>,
    pub cylinder_layout: Option<Option<String>>,
    pub drive_wheels: Option<Option<String>>,
    pub engine_power: Option<Option<String>>,
    pub fuel_tank_capacity: Option<Option<String>>,
    pub gearbox_type: Option<Option<String>>,
    pub max_speed: Option<Option<String>>,
    pub max_torque: Option<Option<String>>,
    pub max_trunk_capacity: Option<Option<String>>,
    pub number_of_cylinders: Option<Option<i32>>,
    pub number_of_gears: Option<Option<i32>>,
    pub number_of_seats: Option<Option<i32>>,
    pub mot: Option<Option<String>>,
    pub tax_status: Option<Option<String>>,
    pub tax_due_date: Option<Option<NaiveDate>>,
    pub year_of_manufacture: Option<Option<i32>>,
}

// Response del sync batch de licensing
#[derive(Debug, Serialize)]
pub struct SyncFleetResponse {
    pub ok: bool,
    pub updated: u32,
}
