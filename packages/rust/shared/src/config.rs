//! Application configuration for vaultsite.
//!
//! User config lives at `~/.vaultsite/vaultsite.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VaultSiteError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "vaultsite.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".vaultsite";

/// Largest page size the OpenAlex API accepts.
pub const MAX_PER_PAGE: u32 = 200;

// ---------------------------------------------------------------------------
// Config structs (matching vaultsite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site layout and input locations.
    #[serde(default)]
    pub site: SiteConfig,

    /// OpenAlex search settings.
    #[serde(default)]
    pub openalex: OpenAlexConfig,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Heading of the generated index page.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output directory for generated artifacts.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Root folder of the note vault scanned for `[[links]]`.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            docs_dir: default_docs_dir(),
            vault_dir: default_vault_dir(),
        }
    }
}

fn default_title() -> String {
    "Compensation Wiki".into()
}
fn default_docs_dir() -> String {
    "docs".into()
}
fn default_vault_dir() -> String {
    "ObsidianVault/Compensation".into()
}

/// `[openalex]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAlexConfig {
    /// Works search endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Free-text search string.
    #[serde(default = "default_search")]
    pub search: String,

    /// Number of results requested.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Sort expression, e.g. `cited_by_count:desc`.
    #[serde(default = "default_sort")]
    pub sort: String,

    /// User-Agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Contact address for the OpenAlex polite pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,
}

impl Default for OpenAlexConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            search: default_search(),
            per_page: default_per_page(),
            sort: default_sort(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            mailto: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openalex.org/works".into()
}
fn default_search() -> String {
    "compensation muscle weakness biomechanics rehabilitation".into()
}
fn default_per_page() -> u32 {
    10
}
fn default_sort() -> String {
    "cited_by_count:desc".into()
}
fn default_user_agent() -> String {
    concat!("vaultsite/", env!("CARGO_PKG_VERSION")).into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let oa = &self.openalex;

        if oa.per_page == 0 || oa.per_page > MAX_PER_PAGE {
            return Err(VaultSiteError::config(format!(
                "openalex.per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                oa.per_page
            )));
        }

        if oa.search.trim().is_empty() {
            return Err(VaultSiteError::config("openalex.search must not be empty"));
        }

        let endpoint = Url::parse(&oa.endpoint).map_err(|e| {
            VaultSiteError::config(format!("invalid openalex.endpoint '{}': {e}", oa.endpoint))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(VaultSiteError::config(format!(
                "openalex.endpoint must be http(s), got '{}'",
                endpoint.scheme()
            )));
        }

        if self.site.docs_dir.trim().is_empty() {
            return Err(VaultSiteError::config("site.docs_dir must not be empty"));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Search query (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime search request, merged from the config file and CLI flags.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub endpoint: String,
    pub search: String,
    pub per_page: u32,
    pub sort: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub mailto: Option<String>,
}

impl From<&AppConfig> for SearchQuery {
    fn from(config: &AppConfig) -> Self {
        let oa = &config.openalex;
        Self {
            endpoint: oa.endpoint.clone(),
            search: oa.search.clone(),
            per_page: oa.per_page,
            sort: oa.sort.clone(),
            user_agent: oa.user_agent.clone(),
            timeout_secs: oa.timeout_secs,
            mailto: oa.mailto.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.vaultsite/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| VaultSiteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.vaultsite/vaultsite.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VaultSiteError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        VaultSiteError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| VaultSiteError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| VaultSiteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| VaultSiteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("vault_dir"));
        assert!(toml_str.contains("api.openalex.org"));
        assert!(!toml_str.contains("mailto"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.openalex.per_page, 10);
        assert_eq!(parsed.openalex.sort, "cited_by_count:desc");
        assert_eq!(parsed.site.docs_dir, "docs");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[site]
vault_dir = "notes"

[openalex]
per_page = 5
mailto = "me@example.com"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.site.vault_dir, "notes");
        assert_eq!(config.site.title, "Compensation Wiki");
        assert_eq!(config.openalex.per_page, 5);
        assert_eq!(config.openalex.mailto.as_deref(), Some("me@example.com"));
        assert_eq!(config.openalex.timeout_secs, 30);
    }

    #[test]
    fn search_query_from_app_config() {
        let app = AppConfig::default();
        let query = SearchQuery::from(&app);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.endpoint, "https://api.openalex.org/works");
        assert!(query.user_agent.starts_with("vaultsite/"));
        assert!(query.mailto.is_none());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.openalex.per_page = 0;
        assert!(config.validate().unwrap_err().to_string().contains("per_page"));

        let mut config = AppConfig::default();
        config.openalex.endpoint = "ftp://api.openalex.org/works".into();
        assert!(config.validate().unwrap_err().to_string().contains("http(s)"));

        let mut config = AppConfig::default();
        config.openalex.endpoint = "not a url".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.openalex.search = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[site\nvault_dir = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
