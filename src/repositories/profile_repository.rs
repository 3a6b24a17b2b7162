//! Repositorio de la tabla `profiles`
//!
//! Solo el webhook del proveedor de identidad escribe aquí.

use chrono::Utc;
use sqlx::PgPool;

use crate::utils::errors::AppError;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert por id del proveedor de identidad.
    /// El rol no se toca: lo deja el default del schema ("user").
    pub async fn upsert(
        &self,
        id: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, email, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email,
                          updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
