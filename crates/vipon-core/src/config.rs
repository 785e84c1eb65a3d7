//! Configuration management for the crawler.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Every section falls back to defaults
//! that match the live vipon.com site.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// Loaded from `~/.config/vipon/config.toml` (or platform equivalent)
/// unless an explicit path is given. Missing files yield defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Crawl behaviour: URLs, targets, waits, throttling
    pub crawl: CrawlConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// CSV export settings
    pub output: OutputConfig,
    /// Markup selectors for each page kind
    pub selectors: SelectorConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from the XDG config file when `None`.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    /// - A value fails validation
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let config: Self = if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `VIPON_HEADLESS`: Override browser headless mode (true/false)
    /// - `VIPON_TARGET_LINKS`: Override the number of links to collect
    /// - `VIPON_FETCH_CODES`: Override whether redemption codes are fetched
    /// - `VIPON_OUTPUT_DIR`: Override the CSV output directory
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|var| std::env::var(var).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-style lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(headless) = lookup("VIPON_HEADLESS").and_then(|v| v.parse().ok()) {
            self.browser.headless = headless;
            tracing::debug!("Override browser.headless from env: {}", headless);
        }

        if let Some(target) = lookup("VIPON_TARGET_LINKS").and_then(|v| v.parse().ok()) {
            self.crawl.target_links = target;
            tracing::debug!("Override crawl.target_links from env: {}", target);
        }

        if let Some(fetch) = lookup("VIPON_FETCH_CODES").and_then(|v| v.parse().ok()) {
            self.crawl.fetch_codes = fetch;
            tracing::debug!("Override crawl.fetch_codes from env: {}", fetch);
        }

        if let Some(dir) = lookup("VIPON_OUTPUT_DIR") {
            tracing::debug!("Override output.directory from env: {}", dir);
            self.output.directory = PathBuf::from(dir);
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.crawl.target_links == 0 {
            return Err(ConfigError::InvalidValue {
                field: "crawl.target_links".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.crawl.max_scroll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "crawl.max_scroll_attempts".to_string(),
                reason: "must allow at least one scroll".to_string(),
            });
        }

        if self.crawl.delay_min_secs > self.crawl.delay_max_secs {
            return Err(ConfigError::InvalidValue {
                field: "crawl.delay_min_secs".to_string(),
                reason: format!(
                    "must not exceed delay_max_secs ({} > {})",
                    self.crawl.delay_min_secs, self.crawl.delay_max_secs
                ),
            });
        }

        if !self.crawl.code_url_template.contains("{id}") {
            return Err(ConfigError::InvalidValue {
                field: "crawl.code_url_template".to_string(),
                reason: "must contain an {id} placeholder".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/vipon/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "vipon", "vipon").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Crawl behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Lazily-loaded listing of current deals
    pub listing_url: String,
    /// Login form page
    pub login_url: String,
    /// Code-reveal endpoint; `{id}` is replaced with the product id
    pub code_url_template: String,
    /// Number of detail links to collect before stopping
    pub target_links: usize,
    /// Consecutive scrolls without new rows before giving up
    pub max_scroll_attempts: u32,
    /// Bound on each explicit wait, in seconds
    pub wait_timeout_secs: u64,
    /// Interval between DOM polls while waiting, in milliseconds
    pub poll_interval_ms: u64,
    /// Whether to log in again and reveal each deal's code
    pub fetch_codes: bool,
    /// Lower bound of the randomized throttle delay, in seconds
    pub delay_min_secs: u64,
    /// Upper bound of the randomized throttle delay, in seconds
    pub delay_max_secs: u64,
}

impl CrawlConfig {
    /// Code-reveal URL for a product id.
    #[must_use]
    pub fn code_url(&self, id: crate::ProductId) -> String {
        self.code_url_template.replace("{id}", &id.to_string())
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.vipon.com/promotion/index?type=instant".to_string(),
            login_url: "https://www.vipon.com/login?ref=menu_login_mobile".to_string(),
            code_url_template: "https://www.vipon.com/code/get-code?id={id}".to_string(),
            target_links: 20,
            max_scroll_attempts: 10,
            wait_timeout_secs: 20,
            poll_interval_ms: 500,
            fetch_codes: false,
            delay_min_secs: 2,
            delay_max_secs: 10,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Fixed user agent; a random desktop one is used when unset
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 800,
            window_height: 600,
            navigation_timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the dated CSV is written into
    pub directory: PathBuf,
    /// File name prefix; the date stamp and `.csv` are appended
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "deals_info".to_string(),
        }
    }
}

/// CSS selectors describing the site's markup.
///
/// Keeping these in configuration confines a site redesign to one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Login email input
    pub login_email: String,
    /// Login password input
    pub login_password: String,
    /// Login submit button
    pub login_submit: String,
    /// One row per deal on the listing page
    pub listing_item: String,
    /// Attribute on each listing row holding the click handler
    pub listing_handler_attr: String,
    /// Detail page title
    pub title: String,
    /// Combined `category;dislike;like` block
    pub category: String,
    /// Discount text
    pub discount: String,
    /// Expiry container
    pub expiry: String,
    /// Element inside the expiry container holding the date text
    pub expiry_value: String,
    /// Combined `list,sale` price block
    pub price: String,
    /// Outbound merchant anchor
    pub merchant_link: String,
    /// Code-reveal container
    pub code_container: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            login_email: r#"input[id="loginform-email"]"#.to_string(),
            login_password: r#"input[id="loginform-password"]"#.to_string(),
            login_submit: r#"button[type="submit"]"#.to_string(),
            listing_item: "div .layer".to_string(),
            listing_handler_attr: "onclick".to_string(),
            title: "p[class=product-title]".to_string(),
            category: "div .product-category".to_string(),
            discount: "p[class=product-discount]".to_string(),
            expiry: "span[id=productExpiry]".to_string(),
            expiry_value: "b".to_string(),
            price: "p[class=product-price]".to_string(),
            merchant_link: r#"a[onclick="bing_open_in_amazon();"]"#.to_string(),
            code_container: "div .code-container".to_string(),
        }
    }
}
