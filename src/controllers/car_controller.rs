//! Controller de vehículos: inducción, edición, decommission y lecturas

use chrono::Utc;
use sqlx::PgPool;

use crate::dto::car_dto::{
    CarDetailResponse, CarResponse, InductCarResponse, UpdateCarFields,
};
use crate::repositories::car_repository::{CarRepository, NewCar};
use crate::dto::trip_dto::TripResponse;
use crate::repositories::trip_repository::TripRepository;
use crate::services::photo_service::{
    merge_pictures, validate_photo_sizes, PhotoService, PhotoUpload,
};
use crate::services::specs_service::map_specifications;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_registration;

/// Formulario de inducción ya extraído del multipart
#[derive(Debug, Default)]
pub struct InductCarForm {
    pub make: String,
    pub model: String,
    pub trim: String,
    pub registration: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub service_date: Option<chrono::NaiveDate>,
    pub photos: Vec<PhotoUpload>,
}

pub struct CarController {
    repository: CarRepository,
    trips: TripRepository,
}

/// Durante la inducción un catálogo sin resultados es un fallo del
/// proveedor (502), no un 404 del recurso.
fn induction_specs_error(error: AppError) -> AppError {
    match error {
        AppError::NotFound(msg) => AppError::ExternalApi(msg),
        other => other,
    }
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    /// Inducción de un vehículo nuevo.
    ///
    /// El lookup de specs es obligatorio y aborta la operación si falla.
    /// El lookup de licensing es best-effort: un fallo se loguea y el
    /// vehículo se crea igualmente con compliance en null.
    pub async fn induct(
        &self,
        state: &AppState,
        form: InductCarForm,
    ) -> Result<InductCarResponse, AppError> {
        if form.make.trim().is_empty()
            || form.model.trim().is_empty()
            || form.trim.trim().is_empty()
        {
            return Err(AppError::Validation("Missing make/model/trim".to_string()));
        }

        if form.photos.is_empty() {
            return Err(AppError::Validation(
                "Please upload at least 1 photo".to_string(),
            ));
        }

        // tamaños validados antes de cualquier lookup o insert
        validate_photo_sizes(&form.photos)?;

        // 1) specs del trim (obligatorio)
        let details = state
            .specs_service()
            .fetch_details(form.make.trim(), form.model.trim(), form.trim.trim())
            .await
            .map_err(induction_specs_error)?;
        let specs = map_specifications(&details.specifications);

        // 2) compliance por matrícula (best-effort)
        let registration = form
            .registration
            .as_deref()
            .map(normalize_registration)
            .filter(|r| !r.is_empty());

        let licensing = match &registration {
            Some(plate) => match state.licensing_service().lookup(plate).await {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!("Licensing enrichment failed for {}: {}", plate, e);
                    None
                }
            },
            None => None,
        };

        // 3) insertar la fila
        let new_car = NewCar {
            make: details.make.unwrap_or(form.make),
            model: details.model.unwrap_or(form.model),
            registration,
            location: form.location,
            price: form.price,
            mileage: form.mileage,
            service_date: form.service_date,
        };
        let car = self.repository.create(new_car, specs, licensing).await?;

        // 4) subir fotos keyed por el car_id nuevo y actualizar la fila.
        // Un fallo aquí deja la fila sin fotos (sin transacción).
        let pictures = state
            .photo_service()
            .upload_photos(car.car_id, form.photos)
            .await?;
        self.repository
            .update_pictures(car.car_id, &pictures)
            .await?;

        log::info!("🚗 Car inducted: #{}", car.car_id);

        Ok(InductCarResponse {
            ok: true,
            car_id: car.car_id,
            pictures,
        })
    }

    pub async fn list(&self) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.repository.find_all().await?;
        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn detail(&self, car_id: i64) -> Result<CarDetailResponse, AppError> {
        let car = self
            .repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let stats = self.trips.stats_for_car(car_id).await?;
        let trips = self.trips.find_by_car(car_id).await?;
        let days_until_service = car.days_until_service(Utc::now().date_naive());

        Ok(CarDetailResponse {
            car: CarResponse::from(car),
            trip_count: stats.trip_count,
            average_rating: stats.average_rating,
            days_until_service,
            trips: trips.into_iter().map(TripResponse::from).collect(),
        })
    }

    /// Edición de admin: campos parciales + fotos añadidas/eliminadas.
    /// Los blobs eliminados se borran best-effort del storage; la lista
    /// final es (existentes − eliminadas) + nuevas.
    pub async fn update(
        &self,
        photo_service: &PhotoService,
        car_id: i64,
        fields: UpdateCarFields,
        removed_photos: Vec<String>,
        new_photos: Vec<PhotoUpload>,
    ) -> Result<CarResponse, AppError> {
        let current = self
            .repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let car = self.repository.update_fields(car_id, fields).await?;

        let touch_photos = !removed_photos.is_empty() || !new_photos.is_empty();
        if !touch_photos {
            return Ok(CarResponse::from(car));
        }

        photo_service
            .remove_photos_best_effort(&removed_photos)
            .await;

        let added = if new_photos.is_empty() {
            Vec::new()
        } else {
            photo_service.upload_photos(car_id, new_photos).await?
        };

        let pictures = merge_pictures(&current.picture_urls(), &removed_photos, added);
        self.repository.update_pictures(car_id, &pictures).await?;

        let mut response = CarResponse::from(car);
        response.pictures = pictures;
        Ok(response)
    }

    /// Decommission: purga de blobs y borrado de la fila.
    /// Si la purga falla, la fila NO se borra.
    pub async fn decommission(
        &self,
        photo_service: &PhotoService,
        car_id: i64,
    ) -> Result<(), AppError> {
        let car = self
            .repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        photo_service.purge_photos(&car.picture_urls()).await?;
        self.repository.delete(car_id).await?;

        log::info!("🗑️ Car decommissioned: #{}", car_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_maps_to_provider_error() {
        let err = induction_specs_error(AppError::NotFound(
            "No details found for this trim".to_string(),
        ));
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[test]
    fn test_other_specs_errors_pass_through() {
        let err = induction_specs_error(AppError::ExternalApi("upstream 500".to_string()));
        assert!(matches!(err, AppError::ExternalApi(_)));

        let err = induction_specs_error(AppError::Validation("bad input".to_string()));
        assert!(matches!(err, AppError::Validation(_)));
    }
}
