use crate::config::StorageConfig;
use crate::domain::ports::LogoStore;
use crate::utils::error::{DeskError, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;

const SIGNED_URL_EXPIRY: Duration = Duration::from_secs(3600);

/// Uploads logo files through a presigned-PUT handshake: ask the storage
/// backend to sign a time-limited write URL for a generated key, PUT the
/// raw bytes at it, then compose the public URL from bucket, region, and
/// key. One write per call, no retry, no existence check afterwards.
pub struct S3LogoStore {
    s3: S3Client,
    http: reqwest::Client,
    bucket: String,
    region: String,
    folder: String,
    endpoint_url: Option<String>,
}

impl S3LogoStore {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "sponsor-desk",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            s3: S3Client::from_conf(builder.build()),
            http: reqwest::Client::new(),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            folder: config.folder.clone(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }

    /// Folder prefix + submission timestamp + original name. Effectively
    /// unique, though two same-millisecond uploads of the same file name
    /// would still collide.
    fn object_key(&self, file_name: &str) -> String {
        format!(
            "{}/{}-{}",
            self.folder.trim_end_matches('/'),
            chrono::Utc::now().timestamp_millis(),
            file_name
        )
    }

    fn public_url(&self, key: &str) -> String {
        match &self.endpoint_url {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[async_trait]
impl LogoStore for S3LogoStore {
    async fn upload(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<String> {
        let key = self.object_key(file_name);

        let presigning = PresigningConfig::expires_in(SIGNED_URL_EXPIRY)
            .map_err(|e| DeskError::upload(format!("invalid presigning expiry: {}", e)))?;
        let signed = self
            .s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| DeskError::upload(format!("could not presign PUT for '{}': {}", key, e)))?;

        tracing::debug!("Uploading {} byte(s) to key '{}'", bytes.len(), key);
        let response = self
            .http
            .put(signed.uri())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| DeskError::upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DeskError::upload(format!(
                "Failed to upload file: {}",
                status.canonical_reason().unwrap_or_else(|| status.as_str())
            )));
        }

        Ok(self.public_url(&key))
    }
}
