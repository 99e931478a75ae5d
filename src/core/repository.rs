use crate::config::Capabilities;
use crate::core::mapper;
use crate::domain::model::{Category, FieldMap, Logo, Sponsor, SponsorForm, SponsorPatch};
use crate::domain::ports::{LogoStore, RecordStore};
use crate::utils::error::{DeskError, Result};
use serde_json::json;

/// Filter expression excluding placeholder-less blank levels, applied
/// server-side on the category fetch.
const NON_BLANK_LEVEL_FILTER: &str = r#"NOT({level} = "")"#;

/// CRUD surface over sponsors and their derived categories. Composes the
/// record mapper and the logo store; every backend failure is logged here
/// and rethrown unchanged. No retries, no partial-failure recovery: if an
/// upload succeeds and the following record write fails, the uploaded
/// object is orphaned.
pub struct SponsorRepository<R: RecordStore, U: LogoStore> {
    records: R,
    logos: U,
    capabilities: Capabilities,
}

impl<R: RecordStore, U: LogoStore> SponsorRepository<R, U> {
    pub fn new(records: R, logos: U, capabilities: Capabilities) -> Self {
        Self {
            records,
            logos,
            capabilities,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// All sponsor records in the backend's native order.
    pub async fn fetch_sponsors(&self) -> Result<Vec<Sponsor>> {
        let records = self.records.select(None, &[]).await.map_err(|e| {
            tracing::error!("Error fetching sponsors: {}", e);
            e
        })?;
        Ok(records.iter().map(mapper::decode).collect())
    }

    /// Distinct non-empty level values across all sponsor records. Order is
    /// whatever the backend returns; duplicates are collapsed.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let records = self
            .records
            .select(Some(NON_BLANK_LEVEL_FILTER), &[mapper::F_LEVEL])
            .await
            .map_err(|e| {
                tracing::error!("Error fetching categories: {}", e);
                e
            })?;

        let mut categories: Vec<Category> = Vec::new();
        for record in &records {
            let level = mapper::decode(record).level;
            if !level.is_empty() && !categories.contains(&level) {
                categories.push(level);
            }
        }
        Ok(categories)
    }

    /// Creates a sponsor record. A pending logo is uploaded first and the
    /// resulting URL takes its place before the create call is issued; the
    /// two steps are strictly sequential.
    pub async fn add_sponsor(&self, mut form: SponsorForm) -> Result<Sponsor> {
        if let Some(logo) = form.logo.take() {
            form.logo = Some(self.resolve_logo(logo).await?);
        }

        let fields = mapper::encode_form(&form)?;
        let record = self.records.create(fields).await.map_err(|e| {
            tracing::error!("Error adding sponsor: {}", e);
            e
        })?;
        Ok(mapper::decode(&record))
    }

    /// Applies a partial update. Callers may patch scalar fields and the
    /// logo in separate calls; each patch stands on its own.
    pub async fn update_sponsor(&self, sponsor_id: &str, mut patch: SponsorPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(logo) = patch.logo.take() {
            patch.logo = Some(self.resolve_logo(logo).await?);
        }

        let fields = mapper::encode_patch(&patch)?;
        self.records.update(sponsor_id, fields).await.map_err(|e| {
            tracing::error!("Error updating sponsor {}: {}", sponsor_id, e);
            e
        })
    }

    pub async fn delete_sponsor(&self, sponsor_id: &str) -> Result<()> {
        self.require_delete("delete_sponsor")?;
        self.records
            .destroy(&[sponsor_id.to_string()])
            .await
            .map_err(|e| {
                tracing::error!("Error deleting sponsor {}: {}", sponsor_id, e);
                e
            })
    }

    /// Creates the placeholder record that makes an empty category visible:
    /// a sponsor row whose only populated field is the level.
    pub async fn add_category(&self, name: &str) -> Result<()> {
        let mut fields = FieldMap::new();
        fields.insert(mapper::F_LEVEL.to_string(), json!(name));
        self.records.create(fields).await.map_err(|e| {
            tracing::error!("Error adding category '{}': {}", name, e);
            e
        })?;
        Ok(())
    }

    /// Deletes every record carrying this level. Cascading and
    /// irreversible; a name with no matching records is a no-op.
    pub async fn delete_category(&self, name: &str) -> Result<()> {
        self.require_delete("delete_category")?;

        let filter = format!("{{level}} = '{}'", name);
        let records = self.records.select(Some(&filter), &[]).await.map_err(|e| {
            tracing::error!("Error resolving category '{}': {}", name, e);
            e
        })?;

        let ids: Vec<String> = records.into_iter().map(|r| r.id).collect();
        if ids.is_empty() {
            tracing::debug!("Category '{}' has no records, nothing to delete", name);
            return Ok(());
        }

        tracing::info!("Deleting {} record(s) in category '{}'", ids.len(), name);
        self.records.destroy(&ids).await.map_err(|e| {
            tracing::error!("Error deleting category '{}': {}", name, e);
            e
        })
    }

    async fn resolve_logo(&self, logo: Logo) -> Result<Logo> {
        match logo {
            Logo::Remote(url) => Ok(Logo::Remote(url)),
            Logo::Pending {
                bytes,
                file_name,
                content_type,
            } => {
                let url = self
                    .logos
                    .upload(&bytes, &file_name, &content_type)
                    .await
                    .map_err(|e| {
                        tracing::error!("Error uploading logo '{}': {}", file_name, e);
                        e
                    })?;
                Ok(Logo::Remote(url))
            }
        }
    }

    fn require_delete(&self, operation: &str) -> Result<()> {
        if self.capabilities.supports_delete {
            Ok(())
        } else {
            Err(DeskError::UnsupportedError {
                operation: operation.to_string(),
            })
        }
    }
}
