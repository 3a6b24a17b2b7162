//! Servicio de fotos de vehículos
//!
//! Sube y borra blobs en object storage bajo el prefijo del vehículo.
//! Naming: `{car_id}/{timestamp}-{index}.{ext}`.

use std::sync::Arc;

use crate::storage::StorageBackend;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::file_extension;

/// Tamaño máximo por foto: 15MB
const MAX_PHOTO_BYTES: usize = 15 * 1024 * 1024;

/// Foto pendiente de subir, extraída del multipart
#[derive(Debug)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Validar los tamaños de un lote de fotos, sin tocar storage ni base.
/// Se llama antes de cualquier escritura para que un archivo fuera de
/// límite devuelva 400 sin dejar filas a medias.
pub fn validate_photo_sizes(photos: &[PhotoUpload]) -> AppResult<()> {
    for (index, photo) in photos.iter().enumerate() {
        if photo.data.len() > MAX_PHOTO_BYTES {
            return Err(AppError::Validation(format!(
                "Photo {} is too large (max 15MB)",
                index + 1
            )));
        }
    }
    Ok(())
}

pub struct PhotoService {
    storage: Arc<dyn StorageBackend>,
}

impl PhotoService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Subir las fotos de un vehículo. Devuelve las URLs públicas en orden.
    /// El primer fallo aborta la subida (las anteriores quedan huérfanas,
    /// ventana de inconsistencia conocida).
    pub async fn upload_photos(
        &self,
        car_id: i64,
        photos: Vec<PhotoUpload>,
    ) -> AppResult<Vec<String>> {
        validate_photo_sizes(&photos)?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut urls = Vec::with_capacity(photos.len());

        for (index, photo) in photos.into_iter().enumerate() {
            let ext = file_extension(&photo.filename);
            let key = format!("{}/{}-{}.{}", car_id, timestamp, index, ext);
            let content_type = if photo.content_type.is_empty() {
                "image/jpeg".to_string()
            } else {
                photo.content_type
            };

            let url = self
                .storage
                .upload(&key, &photo.data, &content_type)
                .await?;
            urls.push(url);
        }

        Ok(urls)
    }

    /// Borrado best-effort de una lista de URLs (edición).
    /// Los fallos se loguean y no abortan.
    pub async fn remove_photos_best_effort(&self, urls: &[String]) {
        for url in urls {
            let Some(key) = self.storage.key_from_url(url) else {
                log::warn!("⚠️ Photo URL outside storage, skipping: {}", url);
                continue;
            };
            if let Err(e) = self.storage.delete(&key).await {
                log::warn!("⚠️ Failed to remove photo {}: {}", key, e);
            }
        }
    }

    /// Purga estricta de todas las fotos de un vehículo (decommission).
    /// Un fallo aborta: la fila no debe borrarse si quedan blobs vivos.
    pub async fn purge_photos(&self, urls: &[String]) -> AppResult<()> {
        for url in urls {
            if let Some(key) = self.storage.key_from_url(url) {
                self.storage.delete(&key).await?;
            }
        }
        Ok(())
    }
}

/// Lista final de fotos tras una edición: (existentes − removidas) + nuevas
pub fn merge_pictures(
    existing: &[String],
    removed: &[String],
    added: Vec<String>,
) -> Vec<String> {
    let mut merged: Vec<String> = existing
        .iter()
        .filter(|url| !removed.contains(url))
        .cloned()
        .collect();
    merged.extend(added);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(bytes: usize) -> PhotoUpload {
        PhotoUpload {
            filename: "front.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0u8; bytes],
        }
    }

    #[test]
    fn test_validate_photo_sizes_rejects_oversize() {
        let err = validate_photo_sizes(&[photo(1024), photo(MAX_PHOTO_BYTES + 1)]).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Photo 2 is too large (max 15MB)");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_validate_photo_sizes_accepts_at_limit() {
        assert!(validate_photo_sizes(&[photo(MAX_PHOTO_BYTES)]).is_ok());
        assert!(validate_photo_sizes(&[]).is_ok());
    }

    #[test]
    fn test_merge_pictures_removes_and_appends() {
        let existing = vec![
            "https://cdn/1/a.jpg".to_string(),
            "https://cdn/1/b.jpg".to_string(),
            "https://cdn/1/c.jpg".to_string(),
        ];
        let removed = vec!["https://cdn/1/b.jpg".to_string()];
        let added = vec!["https://cdn/1/d.jpg".to_string()];

        let merged = merge_pictures(&existing, &removed, added);
        assert_eq!(
            merged,
            vec![
                "https://cdn/1/a.jpg".to_string(),
                "https://cdn/1/c.jpg".to_string(),
                "https://cdn/1/d.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge_pictures_preserves_order() {
        let existing = vec!["a".to_string(), "b".to_string()];
        let merged = merge_pictures(&existing, &[], vec!["c".to_string()]);
        assert_eq!(merged, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_pictures_removed_without_replacement() {
        let existing = vec!["u".to_string()];
        let merged = merge_pictures(&existing, &["u".to_string()], vec![]);
        assert!(merged.is_empty());
    }
}
