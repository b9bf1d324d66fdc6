use std::sync::OnceLock;

use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use shared_types::{key_owned_by, AppError, ASSETS_BUCKET};
use uuid::Uuid;

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

fn assets_bucket() -> String {
    std::env::var("ASSETS_BUCKET").unwrap_or_else(|_| ASSETS_BUCKET.to_string())
}

// ── Trait ────────────────────────────────────────────────────────────

/// Object storage for listing assets (product images and receipts).
#[allow(async_fn_in_trait)]
pub trait ObjectStore: Send + Sync {
    /// Write a new object. Fails if the key is already taken.
    async fn put_new(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String>;

    /// Publicly readable URL for a stored key.
    fn public_url(&self, key: &str) -> String;

    /// The key behind a URL returned by [`ObjectStore::public_url`], or
    /// `None` for URLs this store did not hand out.
    fn key_for_url(&self, url: &str) -> Option<String>;
}

/// Check and store one uploaded asset, returning its public URL.
///
/// The key must sit under the caller's own `products/` or `receipts/`
/// prefix and the body must not exceed `max_bytes`.
pub async fn store_listing_asset(
    store: &impl ObjectStore,
    owner: Uuid,
    key: &str,
    content_type: &str,
    body: Vec<u8>,
    max_bytes: u64,
) -> Result<String, AppError> {
    if !key_owned_by(key, &owner.to_string()) {
        return Err(AppError::forbidden("Uploads must be stored under your own folder"));
    }
    if body.len() as u64 > max_bytes {
        return Err(AppError::invalid_fields(
            "File must be smaller than 1MB",
            [("file".to_string(), "too large".to_string())].into(),
        ));
    }

    store
        .put_new(key, content_type, body)
        .await
        .map_err(AppError::storage)?;

    Ok(store.public_url(key))
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible object store (MinIO locally, Tigris or any S3 in
/// production). Objects are served through a public-read bucket policy.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    endpoint: String,
}

static STORE: OnceLock<S3ObjectStore> = OnceLock::new();

/// Shared store built from the environment on first use.
pub fn assets_store() -> Result<&'static S3ObjectStore, AppError> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let store = S3ObjectStore::from_env().map_err(AppError::internal)?;
    Ok(STORE.get_or_init(|| store))
}

impl S3ObjectStore {
    /// Build from environment variables, accepting both `AWS_*` and
    /// `S3_*` names.
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT must be set")?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY must be set")?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY must be set")?;
        let region =
            env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket: assets_bucket(),
            endpoint,
        })
    }

    /// Create the assets bucket if missing and apply a public-read policy.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            tracing::info!("Creating assets bucket '{}'...", self.bucket);
            if let Err(e) = self.client.create_bucket().bucket(&self.bucket).send().await {
                tracing::warn!("Failed to create assets bucket '{}': {}", self.bucket, e);
                return;
            }
        }

        // Tigris manages public access outside bucket policies.
        if self.endpoint.contains("tigris") {
            return;
        }
        let policy = format!(
            r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"*","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::{}/*"]}}]}}"#,
            self.bucket
        );
        match self
            .client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(&policy)
            .send()
            .await
        {
            Ok(_) => tracing::info!("Public-read policy applied to '{}'", self.bucket),
            Err(e) => tracing::warn!("Failed to set bucket policy on '{}': {}", self.bucket, e),
        }
    }
}

/// Base of every object URL: virtual-hosted for Tigris, path style for
/// everything else.
fn public_base_url(endpoint: &str, bucket: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.contains("tigris") {
        let host = endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("https://{bucket}.{host}/")
    } else {
        format!("{endpoint}/{bucket}/")
    }
}

/// Public URL of `key` with each path segment percent-encoded.
fn public_object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    let path = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{path}", public_base_url(endpoint, bucket))
}

/// Inverse of [`public_object_url`].
fn object_key_from_url(endpoint: &str, bucket: &str, url: &str) -> Option<String> {
    let path = url.strip_prefix(&public_base_url(endpoint, bucket))?;
    let segments = path
        .split('/')
        .map(|segment| urlencoding::decode(segment).ok().map(|s| s.into_owned()))
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

impl ObjectStore for S3ObjectStore {
    async fn put_new(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .if_none_match("*")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 PutObject failed for key '{}': {:?}", key, svc);
                format!("Upload failed: {}", svc)
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.endpoint, &self.bucket, key)
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        object_key_from_url(&self.endpoint, &self.bucket, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl ObjectStore for MemoryStore {
        async fn put_new(&self, key: &str, _ct: &str, body: Vec<u8>) -> Result<(), String> {
            let mut objects = self.objects.lock().unwrap();
            if objects.contains_key(key) {
                return Err("The resource already exists".to_string());
            }
            objects.insert(key.to_string(), body);
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            public_object_url("http://store.test", ASSETS_BUCKET, key)
        }

        fn key_for_url(&self, url: &str) -> Option<String> {
            object_key_from_url("http://store.test", ASSETS_BUCKET, url)
        }
    }

    #[tokio::test]
    async fn stores_owned_key_and_returns_url() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let key = format!("products/{owner}/1_0_a.png");
        let url = store_listing_asset(&store, owner, &key, "image/png", vec![1, 2], 1024)
            .await
            .unwrap();
        assert_eq!(url, format!("http://store.test/business-assets/{key}"));
    }

    #[tokio::test]
    async fn rejects_foreign_prefix() {
        let store = MemoryStore::default();
        let key = format!("products/{}/1_0_a.png", Uuid::new_v4());
        let err = store_listing_asset(&store, Uuid::new_v4(), &key, "image/png", vec![1], 1024)
            .await
            .unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn rejects_oversized_body() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let key = format!("receipts/{owner}/1_r.pdf");
        let err = store_listing_asset(&store, owner, &key, "application/pdf", vec![0; 11], 10)
            .await
            .unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::Invalid);
    }

    #[tokio::test]
    async fn existing_key_is_not_overwritten() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let key = format!("receipts/{owner}/1_r.pdf");
        store_listing_asset(&store, owner, &key, "application/pdf", vec![1], 10)
            .await
            .unwrap();
        let err = store_listing_asset(&store, owner, &key, "application/pdf", vec![2], 10)
            .await
            .unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::Storage);
        assert_eq!(store.objects.lock().unwrap()[&key], vec![1]);
    }

    #[test]
    fn public_urls() {
        assert_eq!(
            public_object_url("http://localhost:9000/", "business-assets", "products/u/1_0_a.png"),
            "http://localhost:9000/business-assets/products/u/1_0_a.png"
        );
        assert_eq!(
            public_object_url("https://fly.storage.tigris.dev", "business-assets", "k"),
            "https://business-assets.fly.storage.tigris.dev/k"
        );
    }

    #[test]
    fn url_encodes_each_key_segment() {
        let url = public_object_url(
            "http://localhost:9000",
            "business-assets",
            "receipts/u1/1_my receipt #2.pdf",
        );
        assert_eq!(
            url,
            "http://localhost:9000/business-assets/receipts/u1/1_my%20receipt%20%232.pdf"
        );
        assert_eq!(
            object_key_from_url("http://localhost:9000", "business-assets", &url).as_deref(),
            Some("receipts/u1/1_my receipt #2.pdf")
        );
    }

    #[test]
    fn foreign_urls_have_no_key() {
        assert_eq!(
            object_key_from_url(
                "http://localhost:9000",
                "business-assets",
                "https://elsewhere.test/business-assets/products/u1/a.png"
            ),
            None
        );
        assert_eq!(
            object_key_from_url(
                "https://fly.storage.tigris.dev",
                "business-assets",
                "https://business-assets.fly.storage.tigris.dev/products/u1/1_0_a.png"
            )
            .as_deref(),
            Some("products/u1/1_0_a.png")
        );
    }
}
