// Webhook endpoint configuration
// Read once at startup from ROWHOOK_* environment variables and passed
// by reference to whoever needs it — no module-level globals.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::docmap::DocumentMap;

pub const DEFAULT_PORT: u16 = 5678;
pub const DEFAULT_FETCH_WEBHOOK: &str = "Fetch-Rows-Multi";
pub const DEFAULT_UPDATE_WEBHOOK: &str = "Update-Row-Multi";
pub const DEFAULT_DELETE_WEBHOOK: &str = "Delete-Row";

pub const ENV_LOCALHOST: &str = "ROWHOOK_LOCALHOST";
pub const ENV_CUSTOM_DOMAIN: &str = "ROWHOOK_CUSTOM_DOMAIN";
pub const ENV_PORT: &str = "ROWHOOK_PORT";
pub const ENV_FETCH_WEBHOOK: &str = "ROWHOOK_FETCH_WEBHOOK";
pub const ENV_UPDATE_WEBHOOK: &str = "ROWHOOK_UPDATE_WEBHOOK";
pub const ENV_DELETE_WEBHOOK: &str = "ROWHOOK_DELETE_WEBHOOK";
pub const ENV_DOC_SHEET_CONFIG: &str = "ROWHOOK_DOC_SHEET_CONFIG";

/// Everything rowhook reads from the environment.
///
/// Two base domains can exist: a localhost variant (typically a dev
/// tunnel, reached over plain http on `port`) and a custom domain
/// (https, no port). At least one must be set for any webhook call to
/// be possible — [`validate`](Self::validate) checks exactly that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub localhost_domain: Option<String>,
    pub custom_domain: Option<String>,
    pub port: u16,
    pub fetch_webhook: String,
    pub update_webhook: String,
    pub delete_webhook: String,
    /// Raw `doc:sheet1[col],sheet2;doc2:sheet3` mapping string.
    pub doc_sheet_config: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            localhost_domain: None,
            custom_domain: None,
            port: DEFAULT_PORT,
            fetch_webhook: DEFAULT_FETCH_WEBHOOK.to_string(),
            update_webhook: DEFAULT_UPDATE_WEBHOOK.to_string(),
            delete_webhook: DEFAULT_DELETE_WEBHOOK.to_string(),
            doc_sheet_config: String::new(),
        }
    }
}

impl WebhookConfig {
    /// Reads configuration from `ROWHOOK_*` variables. Blank values
    /// count as unset; a malformed port falls back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            localhost_domain: env_nonempty(ENV_LOCALHOST),
            custom_domain: env_nonempty(ENV_CUSTOM_DOMAIN),
            port: env_nonempty(ENV_PORT)
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            fetch_webhook: env_nonempty(ENV_FETCH_WEBHOOK).unwrap_or(defaults.fetch_webhook),
            update_webhook: env_nonempty(ENV_UPDATE_WEBHOOK).unwrap_or(defaults.update_webhook),
            delete_webhook: env_nonempty(ENV_DELETE_WEBHOOK).unwrap_or(defaults.delete_webhook),
            doc_sheet_config: env_nonempty(ENV_DOC_SHEET_CONFIG).unwrap_or_default(),
        }
    }

    /// The parsed document → sheets mapping. An empty map is not an
    /// error at this layer; the surface decides how to present it.
    pub fn document_map(&self) -> DocumentMap {
        DocumentMap::parse(&self.doc_sheet_config)
    }

    /// Checks the one startup invariant — at least one domain — and
    /// resolves the concrete endpoint URL lists.
    pub fn validate(&self) -> Result<EndpointSet, ConfigError> {
        if self.localhost_domain.is_none() && self.custom_domain.is_none() {
            return Err(ConfigError::NoDomains);
        }
        Ok(EndpointSet {
            fetch: self.webhook_urls(&self.fetch_webhook),
            update: self.webhook_urls(&self.update_webhook),
            delete: self.webhook_urls(&self.delete_webhook),
        })
    }

    /// Candidate URLs for one webhook, localhost variant first (assumed
    /// lower latency), custom domain second as the fallback.
    fn webhook_urls(&self, webhook: &str) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(domain) = &self.localhost_domain {
            urls.push(format!("http://{}:{}/webhook/{}", domain, self.port, webhook));
        }
        if let Some(domain) = &self.custom_domain {
            urls.push(format!("https://{}/webhook/{}", domain, webhook));
        }
        urls
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Ordered candidate URLs per operation. Built once at startup from a
/// validated [`WebhookConfig`]; each list has one or two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    pub fetch: Vec<String>,
    pub update: Vec<String>,
    pub delete: Vec<String>,
}

/// Startup configuration error. Surfaced as a persistent diagnostic,
/// not thrown during normal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither domain variant is configured.
    NoDomains,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoDomains => write!(
                f,
                "no webhook domain configured: set {} or {}",
                ENV_LOCALHOST, ENV_CUSTOM_DOMAIN
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
