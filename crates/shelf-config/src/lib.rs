//! Configuration management for Shelf.
//!
//! Parses `shelf.toml` with serde and auto-discovers the file in the current
//! directory and its parents. CLI overrides are applied through
//! [`CliSettings`].
//!
//! ## Environments
//!
//! The CMS endpoint is selected per environment. `cms.environment` names one
//! of the `[cms.environments.<name>]` tables and defaults to
//! `${SHELF_ENV:-development}`:
//!
//! ```toml
//! [cms]
//! environment = "${SHELF_ENV:-development}"
//!
//! [cms.environments.development]
//! url = "http://localhost:4001/graphql"
//!
//! [cms.environments.production]
//! url = "https://content.example.com/graphql"
//! token = "${CMS_TOKEN}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` expands to the value of VAR, errors if unset
//! - `${VAR:-default}` expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `server.host`, `cms.environment`, and `url`, `token` and
//! `branch` of every CMS environment. Environments other than the selected
//! one are expanded lazily, so production secrets need not be set during
//! development.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "shelf.toml";

/// Upper bound for the CMS listing page size.
const MAX_PAGE_SIZE: u32 = 100;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the selected CMS environment.
    pub environment: Option<String>,
    /// Override the public directory.
    pub public_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// CMS connection and collection names.
    pub cms: CmsConfig,
    /// Site layout (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Search index settings.
    search: SearchConfigRaw,
    /// API reference settings.
    reference: ReferenceConfigRaw,
    /// Themes offered by the theme selector field.
    pub themes: Vec<ThemeConfig>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved search configuration (set after loading).
    #[serde(skip)]
    pub search_resolved: SearchConfig,
    /// Resolved API reference configuration (set after loading).
    #[serde(skip)]
    pub reference_resolved: ReferenceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// CMS configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Name of the active environment.
    pub environment: String,
    /// Endpoints by environment name.
    pub environments: BTreeMap<String, CmsEndpoint>,
    /// Collection names.
    pub collections: CollectionsConfig,
    /// Documents requested per listing page.
    pub page_size: u32,
}

impl Default for CmsConfig {
    fn default() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            "development".to_owned(),
            CmsEndpoint {
                url: "http://localhost:4001/graphql".to_owned(),
                token: String::new(),
                branch: None,
            },
        );
        Self {
            environment: "${SHELF_ENV:-development}".to_owned(),
            environments,
            collections: CollectionsConfig::default(),
            page_size: 50,
        }
    }
}

/// GraphQL endpoint and credentials for one environment.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CmsEndpoint {
    /// GraphQL endpoint URL.
    pub url: String,
    /// API token sent as `X-API-KEY` (empty for a local CMS).
    #[serde(default)]
    pub token: String,
    /// Content branch, when the CMS is branch-aware.
    #[serde(default)]
    pub branch: Option<String>,
}

impl CmsEndpoint {
    /// Validate that the endpoint is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the URL is empty or not http(s).
    pub fn validate(&self, environment: &str) -> Result<(), ConfigError> {
        let field = format!("cms.environments.{environment}.url");
        require_non_empty(&self.url, &field)?;
        require_http_url(&self.url, &field)
    }
}

/// CMS collection names.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Content documents.
    pub docs: String,
    /// Table-of-contents (navigation) documents.
    pub toc: String,
    /// Version records.
    pub versions: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            docs: "docs".to_owned(),
            toc: "docsTableOfContents".to_owned(),
            versions: "version".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    route_prefix: Option<String>,
    content_root: Option<String>,
    toc_document: Option<String>,
    public_dir: Option<String>,
    media_base_url: Option<String>,
    media_origins: Vec<String>,
    default_theme: Option<String>,
}

/// Resolved site layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// URL prefix of documentation pages (e.g. `/docs`).
    pub route_prefix: String,
    /// Repository path prefix of document references (e.g. `content/docs`).
    pub content_root: String,
    /// Relative path of the TOC document inside the TOC collection.
    pub toc_document: String,
    /// Directory holding static assets (media, search index).
    pub public_dir: PathBuf,
    /// Base URL used to fetch media that is not found locally.
    pub media_base_url: Option<String>,
    /// Extra origins (`scheme://host[:port]`) absolute image URLs may be
    /// fetched from. The origin of `media_base_url` is always allowed.
    pub media_origins: Vec<String>,
    /// Theme used when a page selects none.
    pub default_theme: String,
}

impl SiteConfig {
    fn resolve(raw: &SiteConfigRaw, base: &Path) -> Self {
        Self {
            route_prefix: normalize_route(raw.route_prefix.as_deref().unwrap_or("/docs")),
            content_root: raw
                .content_root
                .as_deref()
                .unwrap_or("content/docs")
                .trim_matches('/')
                .to_owned(),
            toc_document: raw
                .toc_document
                .clone()
                .unwrap_or_else(|| "docs-toc.json".to_owned()),
            public_dir: base.join(raw.public_dir.as_deref().unwrap_or("public")),
            media_base_url: raw.media_base_url.clone(),
            media_origins: raw.media_origins.clone(),
            default_theme: raw
                .default_theme
                .clone()
                .unwrap_or_else(|| "default".to_owned()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::resolve(&SiteConfigRaw::default(), Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SearchConfigRaw {
    index_path: Option<String>,
    max_results: Option<usize>,
}

/// Resolved search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Location of the prebuilt static index.
    pub index_path: PathBuf,
    /// Maximum hits returned per query.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("public/search-index.json"),
            max_results: 20,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ReferenceConfigRaw {
    specs_dir: Option<String>,
}

/// Resolved API reference configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceConfig {
    /// Directory containing OpenAPI/Swagger JSON documents.
    pub specs_dir: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("openapi"),
        }
    }
}

/// Theme offered by the theme selector.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Machine name stored in documents.
    pub name: String,
    /// Label shown to editors.
    pub label: String,
    /// Primary color (CSS value).
    #[serde(default)]
    pub primary: Option<String>,
    /// Accent color (CSS value).
    #[serde(default)]
    pub accent: Option<String>,
}

fn default_themes() -> Vec<ThemeConfig> {
    [
        ("default", "Default", "#ec4815", "#0084ff"),
        ("blue", "Blue", "#2563eb", "#60a5fa"),
        ("orange", "Orange", "#ea580c", "#fdba74"),
        ("green", "Green", "#16a34a", "#86efac"),
    ]
    .into_iter()
    .map(|(name, label, primary, accent)| ThemeConfig {
        name: name.to_owned(),
        label: label.to_owned(),
        primary: Some(primary.to_owned()),
        accent: Some(accent.to_owned()),
    })
    .collect()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`cms.environments.production.token`").
        field: String,
        /// Error message (e.g., "${`CMS_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// `docs/`, `/docs/` and `/docs` all become `/docs`; empty becomes `/`.
fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}")
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `shelf.toml` in the current directory and parents, falling back
    /// to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            let mut config = Self::default_with_cwd();
            config.expand_env_vars()?;
            config
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        if config.themes.is_empty() {
            config.themes = default_themes();
        }
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(environment) = &settings.environment {
            self.cms.environment.clone_from(environment);
        }
        if let Some(public_dir) = &settings.public_dir {
            self.search_resolved.index_path = public_dir.join("search-index.json");
            self.site_resolved.public_dir.clone_from(public_dir);
        }
    }

    /// Get the validated endpoint of the active CMS environment.
    ///
    /// Expands environment variables in the endpoint fields, so secrets of
    /// other environments never need to be present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the environment is unknown or the
    /// endpoint is invalid, `ConfigError::EnvVar` if a referenced variable is
    /// unset.
    pub fn require_cms(&self) -> Result<CmsEndpoint, ConfigError> {
        let name = &self.cms.environment;
        let endpoint = self.cms.environments.get(name).ok_or_else(|| {
            ConfigError::Validation(format!(
                "cms environment '{name}' is not defined (known: {})",
                self.cms
                    .environments
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        let prefix = format!("cms.environments.{name}");
        let mut endpoint = endpoint.clone();
        expand::expand_in_place(&mut endpoint.url, &format!("{prefix}.url"))?;
        expand::expand_in_place(&mut endpoint.token, &format!("{prefix}.token"))?;
        if let Some(branch) = endpoint.branch.as_mut() {
            expand::expand_in_place(branch, &format!("{prefix}.branch"))?;
        }
        endpoint.validate(name)?;
        Ok(endpoint)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            server: ServerConfig::default(),
            cms: CmsConfig::default(),
            site: SiteConfigRaw::default(),
            search: SearchConfigRaw::default(),
            reference: ReferenceConfigRaw::default(),
            themes: default_themes(),
            site_resolved: SiteConfig::default(),
            search_resolved: SearchConfig::default(),
            reference_resolved: ReferenceConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if self.cms.page_size == 0 || self.cms.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "cms.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        require_non_empty(&self.cms.collections.docs, "cms.collections.docs")?;
        require_non_empty(&self.cms.collections.toc, "cms.collections.toc")?;
        require_non_empty(&self.cms.collections.versions, "cms.collections.versions")?;

        if let Some(url) = &self.site_resolved.media_base_url {
            require_http_url(url, "site.media_base_url")?;
        }
        for origin in &self.site_resolved.media_origins {
            require_http_url(origin, "site.media_origins")?;
        }

        if self.search_resolved.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be greater than 0".to_owned(),
            ));
        }

        let default_theme = &self.site_resolved.default_theme;
        if !self.themes.iter().any(|t| &t.name == default_theme) {
            return Err(ConfigError::Validation(format!(
                "site.default_theme '{default_theme}' is not one of the configured themes"
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.server.host, "server.host")?;
        expand::expand_in_place(&mut self.cms.environment, "cms.environment")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig::resolve(&self.site, config_dir);
        self.search_resolved = SearchConfig {
            index_path: self.search.index_path.as_deref().map_or_else(
                || self.site_resolved.public_dir.join("search-index.json"),
                |p| config_dir.join(p),
            ),
            max_results: self.search.max_results.unwrap_or(20),
        };
        self.reference_resolved = ReferenceConfig {
            specs_dir: config_dir.join(self.reference.specs_dir.as_deref().unwrap_or("openapi")),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        Config::from_toml(content, Path::new("/project"))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site_resolved.route_prefix, "/docs");
        assert_eq!(config.site_resolved.content_root, "content/docs");
        assert_eq!(config.site_resolved.public_dir, PathBuf::from("/test/public"));
        assert_eq!(
            config.search_resolved.index_path,
            PathBuf::from("/test/public/search-index.json")
        );
        assert_eq!(config.cms.collections, CollectionsConfig::default());
        assert_eq!(config.themes.len(), 4);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse("").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cms.page_size, 50);
        assert!(config.cms.environments.contains_key("development"));
    }

    #[test]
    fn test_parse_site_section_normalizes_paths() {
        let config = parse(
            r#"
            [site]
            route_prefix = "guides/"
            content_root = "/content/guides/"
            toc_document = "toc.json"
            public_dir = "static"
            "#,
        )
        .unwrap();

        assert_eq!(config.site_resolved.route_prefix, "/guides");
        assert_eq!(config.site_resolved.content_root, "content/guides");
        assert_eq!(config.site_resolved.toc_document, "toc.json");
        assert_eq!(config.site_resolved.public_dir, PathBuf::from("/project/static"));
        assert_eq!(
            config.search_resolved.index_path,
            PathBuf::from("/project/static/search-index.json")
        );
    }

    #[test]
    fn test_parse_environments() {
        let config = parse(
            r#"
            [cms]
            environment = "production"

            [cms.environments.production]
            url = "https://content.example.com/graphql"
            token = "secret"
            branch = "main"
            "#,
        )
        .unwrap();

        let endpoint = config.require_cms().unwrap();
        assert_eq!(endpoint.url, "https://content.example.com/graphql");
        assert_eq!(endpoint.token, "secret");
        assert_eq!(endpoint.branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_environment_defaults_to_development() {
        // SAFETY: variable name is only touched by this test
        unsafe {
            std::env::remove_var("SHELF_ENV");
        }
        let config = parse("").unwrap();

        assert_eq!(config.cms.environment, "development");
        let endpoint = config.require_cms().unwrap();
        assert_eq!(endpoint.url, "http://localhost:4001/graphql");
        assert!(endpoint.token.is_empty());
    }

    #[test]
    fn test_require_cms_unknown_environment() {
        let config = parse(
            r#"
            [cms]
            environment = "staging"
            "#,
        )
        .unwrap();

        let err = config.require_cms().unwrap_err();
        assert!(err.to_string().contains("staging"));
        assert!(err.to_string().contains("development"));
    }

    #[test]
    fn test_require_cms_expands_only_selected_environment() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("SHELF_TEST_DEV_URL", "http://localhost:9000/graphql");
            std::env::remove_var("SHELF_TEST_PROD_TOKEN");
        }
        let config = parse(
            r#"
            [cms]
            environment = "development"

            [cms.environments.development]
            url = "${SHELF_TEST_DEV_URL}"

            [cms.environments.production]
            url = "https://content.example.com/graphql"
            token = "${SHELF_TEST_PROD_TOKEN}"
            "#,
        )
        .unwrap();

        let endpoint = config.require_cms().unwrap();
        assert_eq!(endpoint.url, "http://localhost:9000/graphql");
        unsafe {
            std::env::remove_var("SHELF_TEST_DEV_URL");
        }
    }

    #[test]
    fn test_require_cms_missing_token_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SHELF_TEST_MISSING_TOKEN");
        }
        let config = parse(
            r#"
            [cms]
            environment = "production"

            [cms.environments.production]
            url = "https://content.example.com/graphql"
            token = "${SHELF_TEST_MISSING_TOKEN}"
            "#,
        )
        .unwrap();

        let err = config.require_cms().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("cms.environments.production.token"));
    }

    #[test]
    fn test_require_cms_invalid_url() {
        let config = parse(
            r#"
            [cms.environments.development]
            url = "localhost:4001"
            "#,
        )
        .unwrap();

        let err = config.require_cms().unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let err = parse("[server]\nport = 0").unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_page_size_bounds() {
        assert!(parse("[cms]\npage_size = 0").is_err());
        assert!(parse("[cms]\npage_size = 101").is_err());
        assert!(parse("[cms]\npage_size = 100").is_ok());
    }

    #[test]
    fn test_validate_default_theme_must_exist() {
        let err = parse(
            r#"
            [site]
            default_theme = "purple"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("purple"));
    }

    #[test]
    fn test_custom_themes_replace_defaults() {
        let config = parse(
            r##"
            [site]
            default_theme = "night"

            [[themes]]
            name = "night"
            label = "Night"
            primary = "#000"
            "##,
        )
        .unwrap();

        assert_eq!(config.themes.len(), 1);
        assert_eq!(config.themes[0].primary.as_deref(), Some("#000"));
        assert_eq!(config.themes[0].accent, None);
    }

    #[test]
    fn test_validate_media_base_url_scheme() {
        let err = parse("[site]\nmedia_base_url = \"ftp://media\"").unwrap_err();
        assert!(err.to_string().contains("site.media_base_url"));
    }

    #[test]
    fn test_media_origins() {
        let config = parse("[site]\nmedia_origins = [\"https://cdn.example.com\"]").unwrap();
        assert_eq!(config.site_resolved.media_origins, ["https://cdn.example.com"]);

        let err = parse("[site]\nmedia_origins = [\"cdn.example.com\"]").unwrap_err();
        assert!(err.to_string().contains("site.media_origins"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(8080),
            environment: Some("production".to_owned()),
            public_dir: Some(PathBuf::from("/srv/public")),
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cms.environment, "production");
        assert_eq!(
            config.search_resolved.index_path,
            PathBuf::from("/srv/public/search-index.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/shelf.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.toml");
        std::fs::write(&path, "[reference]\nspecs_dir = \"api\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.reference_resolved.specs_dir, dir.path().join("api"));
    }
}
