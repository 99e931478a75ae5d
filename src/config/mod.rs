pub mod cli;

use crate::utils::error::{DeskError, Result};
use crate::utils::validation::{
    self, validate_bucket_name, validate_non_empty_string, validate_region, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "https://api.airtable.com/v0";

/// Which of the historical panel variants this deployment behaves as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoInputMode {
    /// The form accepts a logo URL typed by the operator.
    Url,
    /// The form accepts a local file, uploaded to object storage first.
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub supports_delete: bool,
    pub logo_input_mode: LogoInputMode,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supports_delete: true,
            logo_input_mode: LogoInputMode::Upload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_id: String,
    /// Overridable so tests can point at a local mock server.
    pub base_url: Option<String>,
}

impl DatabaseConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Key prefix under which logo objects are placed.
    pub folder: String,
    /// Non-AWS endpoint (local stacks, tests). Presigning switches to
    /// path-style addressing when set.
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub panel: Capabilities,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeskError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeskError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads everything from the environment, the same variables the
    /// original deployment used.
    pub fn from_env() -> Result<Self> {
        fn required(name: &str) -> Result<String> {
            env::var(name).map_err(|_| DeskError::MissingConfigError {
                field: name.to_string(),
            })
        }

        Ok(Self {
            database: DatabaseConfig {
                api_key: required("AIRTABLE_API_KEY")?,
                base_id: required("AIRTABLE_BASE_ID")?,
                table_id: required("AIRTABLE_TABLE_ID")?,
                base_url: env::var("AIRTABLE_BASE_URL").ok(),
            },
            storage: StorageConfig {
                region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                bucket: required("S3_BUCKET")?,
                folder: env::var("S3_FOLDER").unwrap_or_else(|_| "sponsor-logos".to_string()),
                endpoint_url: env::var("S3_ENDPOINT_URL").ok(),
            },
            panel: Capabilities::default(),
        })
    }

    /// Replaces `${VAR_NAME}` occurrences with the environment value,
    /// leaving unknown variables as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("database.base_url", self.database.base_url())?;
        validate_non_empty_string("database.api_key", &self.database.api_key)?;
        validate_non_empty_string("database.base_id", &self.database.base_id)?;
        validate_non_empty_string("database.table_id", &self.database.table_id)?;

        validate_region("storage.region", &self.storage.region)?;
        validate_bucket_name("storage.bucket", &self.storage.bucket)?;
        validate_non_empty_string("storage.folder", &self.storage.folder)?;
        validate_non_empty_string("storage.access_key_id", &self.storage.access_key_id)?;
        validation::validate_non_empty_string(
            "storage.secret_access_key",
            &self.storage.secret_access_key,
        )?;

        Ok(())
    }
}
