//! Controller del webhook del proveedor de identidad
//!
//! Sincroniza los eventos de usuarios hacia la tabla `profiles`.
//! Eventos no reconocidos se aceptan y se ignoran.

use sqlx::PgPool;

use crate::dto::webhook_dto::IdentityEvent;
use crate::repositories::profile_repository::ProfileRepository;
use crate::utils::errors::AppError;

pub struct WebhookController {
    repository: ProfileRepository,
}

impl WebhookController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProfileRepository::new(pool),
        }
    }

    pub async fn handle_identity_event(&self, event: IdentityEvent) -> Result<(), AppError> {
        match event.event_type.as_str() {
            "user.created" | "user.updated" => {
                let name = event.data.full_name();
                let email = event.data.primary_email();
                self.repository
                    .upsert(&event.data.id, &name, email.as_deref())
                    .await?;
                log::info!("👤 Profile synced: {}", event.data.id);
            }
            "user.deleted" => {
                self.repository.delete(&event.data.id).await?;
                log::info!("👤 Profile deleted: {}", event.data.id);
            }
            other => {
                tracing::debug!("Ignoring identity event type: {}", other);
            }
        }

        Ok(())
    }
}
