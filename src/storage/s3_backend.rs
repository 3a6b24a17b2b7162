//! Backend S3-compatible para las fotos del Vault

use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::Region;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

use super::StorageBackend;

pub struct S3Backend {
    bucket: Box<Bucket>,
    bucket_name: String,
    public_base: String,
}

impl S3Backend {
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let region = Region::Custom {
            region: config.storage_region.clone(),
            endpoint: config.storage_endpoint.clone(),
        };

        let credentials = Credentials::new(
            Some(&config.storage_access_key),
            Some(&config.storage_secret_key),
            None, // security token
            None, // session token
            None, // profile
        )
        .map_err(|e| AppError::Storage(format!("Storage credentials error: {}", e)))?;

        let bucket = Bucket::new(&config.storage_bucket, region, credentials)
            .map_err(|e| AppError::Storage(format!("Storage bucket error: {}", e)))?;

        Ok(Self {
            bucket,
            bucket_name: config.storage_bucket.clone(),
            public_base: config.storage_public_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl StorageBackend for S3Backend {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String> {
        self.bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Upload failed: {}", e)))?;

        tracing::info!("📦 Upload: bucket={}, key={}", self.bucket_name, key);
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("Delete failed: {}", e)))?;

        tracing::info!("🗑️ Delete: bucket={}, key={}", self.bucket_name, key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&format!("{}/", self.public_base))
            .map(|k| k.to_string())
    }
}
