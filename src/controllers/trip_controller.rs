//! Controller de trips
//!
//! Valida y registra el uso de un vehículo, y reconcilia el odómetro
//! del Car: solo avanza con lecturas mayores (trips con fecha atrasada
//! y lectura menor no lo retroceden).

use sqlx::PgPool;

use crate::dto::trip_dto::{CreateTripRequest, CreateTripResponse};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::AppError;

pub struct TripController {
    repository: TripRepository,
    cars: CarRepository,
}

/// Validación pura del request (sin tocar la base)
pub fn validate_trip_request(request: &CreateTripRequest) -> Result<(), AppError> {
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    if request.mileage_before < 0 {
        return Err(AppError::Validation(
            "Mileage Before must be a valid number".to_string(),
        ));
    }

    if request.end_date < request.start_date {
        return Err(AppError::Validation(
            "End Date cannot be before Start Date".to_string(),
        ));
    }

    if request.mileage_after < request.mileage_before {
        return Err(AppError::Validation(
            "Odometer After cannot be less than Odometer Before".to_string(),
        ));
    }

    Ok(())
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: CreateTripRequest,
    ) -> Result<CreateTripResponse, AppError> {
        validate_trip_request(&request)?;

        // el trip tiene que referenciar un vehículo existente
        self.cars
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let trip = self.repository.create(user_id, &request).await?;

        // reconciliación de odómetro pico
        let car_mileage_updated = self
            .cars
            .advance_mileage(request.car_id, request.mileage_after)
            .await?;

        Ok(CreateTripResponse {
            ok: true,
            trip_id: trip.trip_id,
            car_mileage_updated,
            message: "Trip successfully logged to Vault".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_request() -> CreateTripRequest {
        CreateTripRequest {
            car_id: 1,
            start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            mileage_before: 1000,
            mileage_after: 1120,
            rating: 5,
            notes: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_trip_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_rejects_odometer_regression() {
        let mut request = valid_request();
        request.mileage_before = 1000;
        request.mileage_after = 950;
        let err = validate_trip_request(&request).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_accepts_equal_odometer() {
        let mut request = valid_request();
        request.mileage_after = request.mileage_before;
        assert!(validate_trip_request(&request).is_ok());
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let mut request = valid_request();
        request.rating = 0;
        assert!(validate_trip_request(&request).is_err());
        request.rating = 6;
        assert!(validate_trip_request(&request).is_err());
    }

    #[test]
    fn test_rejects_end_before_start() {
        let mut request = valid_request();
        request.end_date = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        assert!(validate_trip_request(&request).is_err());
    }
}
