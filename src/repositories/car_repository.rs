//! Repositorio de la tabla `cars`

use chrono::Utc;
use sqlx::PgPool;

use crate::dto::car_dto::UpdateCarFields;
use crate::models::car::Car;
use crate::services::licensing_service::LicensingData;
use crate::services::specs_service::MappedSpecs;
use crate::utils::errors::AppError;

/// Datos de identidad y comerciales para la inducción
#[derive(Debug)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub registration: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub service_date: Option<chrono::NaiveDate>,
}

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        new_car: NewCar,
        specs: MappedSpecs,
        licensing: Option<LicensingData>,
    ) -> Result<Car, AppError> {
        let (mot, tax_status, tax_due_date, year_of_manufacture) = match licensing {
            Some(l) => (l.mot, l.tax_status, l.tax_due_date, l.year_of_manufacture),
            None => (None, None, None, None),
        };

        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (
                make, model, registration, location, price, mileage, service_date,
                acceleration_0_100, body_type, engine_capacity, curb_weight,
                cylinder_layout, drive_wheels, engine_power, fuel_tank_capacity,
                gearbox_type, max_speed, max_torque, max_trunk_capacity,
                number_of_cylinders, number_of_gears, number_of_seats,
                mot, tax_status, tax_due_date, year_of_manufacture, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19,
                $20, $21, $22, $23, $24, $25, $26, $27
            )
            RETURNING *
            "#,
        )
        .bind(new_car.make)
        .bind(new_car.model)
        .bind(new_car.registration)
        .bind(new_car.location)
        .bind(new_car.price)
        .bind(new_car.mileage)
        .bind(new_car.service_date)
        .bind(specs.acceleration_0_100)
        .bind(specs.body_type)
        .bind(specs.engine_capacity)
        .bind(specs.curb_weight)
        .bind(specs.cylinder_layout)
        .bind(specs.drive_wheels)
        .bind(specs.engine_power)
        .bind(specs.fuel_tank_capacity)
        .bind(specs.gearbox_type)
        .bind(specs.max_speed)
        .bind(specs.max_torque)
        .bind(specs.max_trunk_capacity)
        .bind(specs.number_of_cylinders)
        .bind(specs.number_of_gears)
        .bind(specs.number_of_seats)
        .bind(mot)
        .bind(tax_status)
        .bind(tax_due_date)
        .bind(year_of_manufacture)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, car_id: i64) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE car_id = $1")
            .bind(car_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    /// Vehículos con matrícula registrada (para el sync de licensing)
    pub async fn find_with_registration(&self) -> Result<Vec<(i64, String)>, AppError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT car_id, registration FROM cars WHERE registration IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_pictures(&self, car_id: i64, pictures: &[String]) -> Result<(), AppError> {
        sqlx::query("UPDATE cars SET pictures = $2 WHERE car_id = $1")
            .bind(car_id)
            .bind(pictures)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update parcial del formulario de edición de admin.
    /// None = mantener, Some(None) = poner a null, Some(Some(v)) = nuevo valor.
    pub async fn update_fields(
        &self,
        car_id: i64,
        fields: UpdateCarFields,
    ) -> Result<Car, AppError> {
        let current = self
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars SET
                make = $2, model = $3, registration = $4, location = $5,
                price = $6, mileage = $7, service_date = $8,
                acceleration_0_100 = $9, body_type = $10, engine_capacity = $11,
                curb_weight = $12, cylinder_layout = $13, drive_wheels = $14,
                engine_power = $15, fuel_tank_capacity = $16, gearbox_type = $17,
                max_speed = $18, max_torque = $19, max_trunk_capacity = $20,
                number_of_cylinders = $21, number_of_gears = $22, number_of_seats = $23,
                mot = $24, tax_status = $25, tax_due_date = $26, year_of_manufacture = $27
            WHERE car_id = $1
            RETURNING *
            "#,
        )
        .bind(car_id)
        .bind(fields.make.unwrap_or(current.make))
        .bind(fields.model.unwrap_or(current.model))
        .bind(fields.registration.unwrap_or(current.registration))
        .bind(fields.location.unwrap_or(current.location))
        .bind(fields.price.unwrap_or(current.price))
        .bind(fields.mileage.unwrap_or(current.mileage))
        .bind(fields.service_date.unwrap_or(current.service_date))
        .bind(
            fields
                .acceleration_0_100
                .unwrap_or(current.acceleration_0_100),
        )
        .bind(fields.body_type.unwrap_or(current.body_type))
        .bind(fields.engine_capacity.unwrap_or(current.engine_capacity))
        .bind(fields.curb_weight.unwrap_or(current.curb_weight))
        .bind(fields.cylinder_layout.unwrap_or(current.cylinder_layout))
        .bind(fields.drive_wheels.unwrap_or(current.drive_wheels))
        .bind(fields.engine_power.unwrap_or(current.engine_power))
        .bind(
            fields
                .fuel_tank_capacity
                .unwrap_or(current.fuel_tank_capacity),
        )
        .bind(fields.gearbox_type.unwrap_or(current.gearbox_type))
        .bind(fields.max_speed.unwrap_or(current.max_speed))
        .bind(fields.max_torque.unwrap_or(current.max_torque))
        .bind(
            fields
                .max_trunk_capacity
                .unwrap_or(current.max_trunk_capacity),
        )
        .bind(
            fields
                .number_of_cylinders
                .unwrap_or(current.number_of_cylinders),
        )
        .bind(fields.number_of_gears.unwrap_or(current.number_of_gears))
        .bind(fields.number_of_seats.unwrap_or(current.number_of_seats))
        .bind(fields.mot.unwrap_or(current.mot))
        .bind(fields.tax_status.unwrap_or(current.tax_status))
        .bind(fields.tax_due_date.unwrap_or(current.tax_due_date))
        .bind(
            fields
                .year_of_manufacture
                .unwrap_or(current.year_of_manufacture),
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    /// Refrescar compliance tras un lookup de licensing (sync batch)
    pub async fn update_licensing(
        &self,
        car_id: i64,
        data: &LicensingData,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE cars
            SET mot = $2, tax_status = $3, tax_due_date = $4, last_synced_at = $5
            WHERE car_id = $1
            "#,
        )
        .bind(car_id)
        .bind(&data.mot)
        .bind(&data.tax_status)
        .bind(data.tax_due_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reconciliación de odómetro pico: solo avanza si el nuevo valor es mayor.
    /// Devuelve true si la fila cambió.
    pub async fn advance_mileage(&self, car_id: i64, mileage: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE cars
            SET mileage = $2
            WHERE car_id = $1 AND (mileage IS NULL OR mileage < $2)
            "#,
        )
        .bind(car_id)
        .bind(mileage)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, car_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cars WHERE car_id = $1")
            .bind(car_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
