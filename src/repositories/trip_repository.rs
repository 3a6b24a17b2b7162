//! Repositorio de la tabla `trips`

use chrono::Utc;
use sqlx::PgPool;

use crate::dto::trip_dto::CreateTripRequest;
use crate::models::trip::Trip;
use crate::utils::errors::AppError;

/// Stats agregadas de los trips de un vehículo
#[derive(Debug, Clone, Copy)]
pub struct TripStats {
    pub trip_count: i64,
    pub average_rating: Option<f64>,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, request: &CreateTripRequest) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                car_id, user_id, start_date, end_date,
                mileage_before, mileage_after, rating, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(request.car_id)
        .bind(user_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.mileage_before)
        .bind(request.mileage_after)
        .bind(request.rating)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE car_id = $1 ORDER BY start_date DESC",
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn stats_for_car(&self, car_id: i64) -> Result<TripStats, AppError> {
        let row: (i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), AVG(rating::float8) FROM trips WHERE car_id = $1",
        )
        .bind(car_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(TripStats {
            trip_count: row.0,
            average_rating: row.1,
        })
    }
}
