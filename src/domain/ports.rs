use crate::domain::model::FieldMap;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A raw record as the tabular backend returns it: opaque id plus an
/// untyped field map.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: String,
    pub fields: FieldMap,
}

/// Port onto the tabular-database backend. Operations speak raw field maps;
/// typing lives in the mapper.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists records in the backend's native order. `filter` is a backend
    /// filter expression; `fields` restricts the returned columns (empty
    /// means all).
    async fn select(&self, filter: Option<&str>, fields: &[&str]) -> Result<Vec<RawRecord>>;

    async fn create(&self, fields: FieldMap) -> Result<RawRecord>;

    /// Applies a partial field update; unspecified fields are untouched.
    async fn update(&self, record_id: &str, fields: FieldMap) -> Result<()>;

    async fn destroy(&self, record_ids: &[String]) -> Result<()>;
}

/// Port onto object storage: one durable write per call, returning the
/// public URL. No retry happens here.
#[async_trait]
pub trait LogoStore: Send + Sync {
    async fn upload(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<String>;
}
