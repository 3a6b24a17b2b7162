//! Controller del sync batch de licensing
//!
//! Recorre todos los vehículos con matrícula y refresca su compliance,
//! uno a uno. Un lookup fallido se salta (sin incrementar el contador)
//! y nunca aborta el batch.

use sqlx::PgPool;

use crate::dto::car_dto::SyncFleetResponse;
use crate::repositories::car_repository::CarRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct SyncController {
    repository: CarRepository,
}

impl SyncController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    pub async fn sync_licensing(&self, state: &AppState) -> Result<SyncFleetResponse, AppError> {
        let cars = self.repository.find_with_registration().await?;
        let licensing = state.licensing_service();

        let mut updated: u32 = 0;

        for (car_id, registration) in cars {
            match licensing.lookup(&registration).await {
                Ok(data) => {
                    self.repository.update_licensing(car_id, &data).await?;
                    updated += 1;
                }
                Err(e) => {
                    tracing::warn!("Licensing sync skipped for car #{}: {}", car_id, e);
                }
            }
        }

        log::info!("🔄 Licensing sync complete: {} cars updated", updated);

        Ok(SyncFleetResponse { ok: true, updated })
    }
}
