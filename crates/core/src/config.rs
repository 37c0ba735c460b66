//! Pipeline configuration and its on-disk form.
//!
//! [`UnlockedConfig`] bundles the mirror, fetch, locator, and conversion
//! settings. It is built in code with [`UnlockedConfig::builder`] or read
//! from a JSON file with [`load_config`]; every section and field is
//! optional in the file and falls back to its default.
//!
//! ```json
//! {
//!   "mirror": { "base_url": "https://freedium-mirror.cfd/" },
//!   "fetch": { "timeout": 40 },
//!   "locator": { "body_selector": ".main-content" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::convert::MarkdownConfig;
use crate::fetch::FetchConfig;
use crate::locate::LocatorConfig;
use crate::normalize::MirrorConfig;
use crate::{Result, UnlockedError};

/// Name of the directory under the user config dir.
const CONFIG_DIR_NAME: &str = "unlocked";

/// File name looked up inside the config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnlockedConfig {
    pub mirror: MirrorConfig,
    pub fetch: FetchConfig,
    pub locator: LocatorConfig,
    #[serde(skip)]
    pub markdown: MarkdownConfig,
}

impl UnlockedConfig {
    /// Creates a new builder for UnlockedConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unlocked_core::UnlockedConfig;
    ///
    /// let config = UnlockedConfig::builder()
    ///     .timeout(40)
    ///     .body_selector("article")
    ///     .build();
    /// assert_eq!(config.fetch.timeout, 40);
    /// ```
    pub fn builder() -> UnlockedConfigBuilder {
        UnlockedConfigBuilder::new()
    }
}

/// Builder for UnlockedConfig.
pub struct UnlockedConfigBuilder {
    config: UnlockedConfig,
}

impl UnlockedConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: UnlockedConfig::default() }
    }

    /// Starts from an existing configuration, e.g. one loaded from disk.
    pub fn from_config(config: UnlockedConfig) -> Self {
        Self { config }
    }

    /// Sets the mirror configuration.
    pub fn mirror(mut self, value: MirrorConfig) -> Self {
        self.config.mirror = value;
        self
    }

    /// Sets the mirror base URL.
    pub fn mirror_base(mut self, value: impl Into<String>) -> Self {
        self.config.mirror.base_url = value.into();
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the locator selectors.
    pub fn locator(mut self, value: LocatorConfig) -> Self {
        self.config.locator = value;
        self
    }

    /// Sets the selector of the article body container.
    pub fn body_selector(mut self, value: impl Into<String>) -> Self {
        self.config.locator.body_selector = value.into();
        self
    }

    /// Sets the tags dropped during Markdown conversion.
    pub fn skip_tags(mut self, value: Vec<&'static str>) -> Self {
        self.config.markdown.skip_tags = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> UnlockedConfig {
        self.config
    }
}

impl Default for UnlockedConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Default location of the configuration file, if the platform has a
/// config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads configuration.
///
/// With an explicit `path`, the file must exist. Without one, the default
/// location is used when a file is there; otherwise defaults are returned.
///
/// # Errors
///
/// * [`UnlockedError::FileNotFound`] if an explicit path does not exist.
/// * [`UnlockedError::ConfigError`] if the file is not valid configuration JSON.
pub fn load_config(path: Option<&Path>) -> Result<UnlockedConfig> {
    let path = match path {
        Some(path) if !path.exists() => return Err(UnlockedError::FileNotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(UnlockedConfig::default()),
        },
    };

    debug!(path = %path.display(), "loading configuration");
    let content = fs::read_to_string(&path)?;
    parse_config(&content).map_err(|e| UnlockedError::ConfigError(format!("{}: {}", path.display(), e)))
}

fn parse_config(content: &str) -> std::result::Result<UnlockedConfig, serde_json::Error> {
    serde_json::from_str(content)
}
