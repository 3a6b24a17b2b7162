use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::trip::Trip;

// Request para registrar un trip
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mileage_before: i64,
    pub mileage_after: i64,
    pub rating: i32,
    pub notes: Option<String>,
}

// Trip en el log del detalle de un vehículo
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub trip_id: i64,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mileage_before: i64,
    pub mileage_after: i64,
    pub rating: i32,
    pub notes: Option<String>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            trip_id: trip.trip_id,
            user_id: trip.user_id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            mileage_before: trip.mileage_before,
            mileage_after: trip.mileage_after,
            rating: trip.rating,
            notes: trip.notes,
        }
    }
}

// Response de trip registrado
#[derive(Debug, Serialize)]
pub struct CreateTripResponse {
    pub ok: bool,
    pub trip_id: i64,
    /// true si el odómetro del vehículo avanzó con este trip
    pub car_mileage_updated: bool,
    pub message: String,
}
