//! Abstracción de object storage para las fotos de los vehículos
//!
//! Los blobs se guardan bajo el prefijo `{car_id}/` y se sirven desde
//! una base pública configurada.

pub mod s3_backend;

pub use s3_backend::S3Backend;

use crate::utils::errors::AppResult;

/// Backend de almacenamiento de blobs
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Subir un blob. Devuelve la URL pública resultante.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String>;

    /// Borrar un blob por key
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// URL pública de un key
    fn public_url(&self, key: &str) -> String;

    /// Key de un blob a partir de su URL pública, si pertenece a este bucket
    fn key_from_url(&self, url: &str) -> Option<String>;
}
