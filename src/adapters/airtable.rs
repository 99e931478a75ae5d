use crate::config::DatabaseConfig;
use crate::domain::model::FieldMap;
use crate::domain::ports::{RawRecord, RecordStore};
use crate::utils::error::{DeskError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

/// The backend rejects batch deletes above this size.
const DESTROY_BATCH_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: FieldMap,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<ApiRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    records: Vec<ApiRecord>,
}

impl From<ApiRecord> for RawRecord {
    fn from(record: ApiRecord) -> Self {
        RawRecord {
            id: record.id,
            fields: record.fields,
        }
    }
}

/// Airtable-style REST client for one table. Carries the bearer token on
/// every call; the base URL is configurable so tests can point it at a
/// mock server.
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl AirtableStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            client: Client::new(),
            table_url: format!(
                "{}/{}/{}",
                config.base_url().trim_end_matches('/'),
                config.base_id,
                config.table_id
            ),
            api_key: config.api_key.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    async fn check_status(
        response: Response,
        describe: impl Fn(String) -> DeskError,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(describe(format!("status {}: {}", status, body)))
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn select(&self, filter: Option<&str>, fields: &[&str]) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        // The backend pages its listings; follow `offset` until exhausted.
        loop {
            let mut request = self.authorized(self.client.get(&self.table_url));
            if let Some(filter) = filter {
                request = request.query(&[("filterByFormula", filter)]);
            }
            for field in fields {
                request = request.query(&[("fields[]", field)]);
            }
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            tracing::debug!("Listing records from {}", self.table_url);
            let response = request.send().await.map_err(|e| DeskError::fetch(e.to_string()))?;
            let response = Self::check_status(response, |m| DeskError::fetch(m)).await?;
            let page: ListResponse = response
                .json()
                .await
                .map_err(|e| DeskError::decode(format!("invalid list response: {}", e)))?;

            records.extend(page.records.into_iter().map(RawRecord::from));
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    async fn create(&self, fields: FieldMap) -> Result<RawRecord> {
        let body = json!({ "records": [ { "fields": fields } ] });

        let response = self
            .authorized(self.client.post(&self.table_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeskError::write(e.to_string()))?;
        let response = Self::check_status(response, |m| DeskError::write(m)).await?;

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| DeskError::decode(format!("invalid create response: {}", e)))?;
        created
            .records
            .into_iter()
            .next()
            .map(RawRecord::from)
            .ok_or_else(|| DeskError::decode("create response contained no records"))
    }

    async fn update(&self, record_id: &str, fields: FieldMap) -> Result<()> {
        let url = format!("{}/{}", self.table_url, record_id);
        let body = json!({ "fields": fields });

        let response = self
            .authorized(self.client.patch(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeskError::write(e.to_string()))?;
        Self::check_status(response, |m| DeskError::write(m)).await?;
        Ok(())
    }

    async fn destroy(&self, record_ids: &[String]) -> Result<()> {
        for batch in record_ids.chunks(DESTROY_BATCH_SIZE) {
            let query: Vec<(&str, &str)> =
                batch.iter().map(|id| ("records[]", id.as_str())).collect();

            let response = self
                .authorized(self.client.delete(&self.table_url))
                .query(&query)
                .send()
                .await
                .map_err(|e| DeskError::write(e.to_string()))?;
            Self::check_status(response, |m| DeskError::write(m)).await?;
        }
        Ok(())
    }
}
