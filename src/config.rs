use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::descriptor::PageDescriptor;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub crawler: CrawlerConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CrawlMode {
    /// Walk one listing starting at the base URL
    Single,
    /// Enumerate categories from the base URL and walk each of them
    #[default]
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    pub base_url: String,
    #[serde(default)]
    pub mode: CrawlMode,
    #[serde(default = "default_max_concurrent_details")]
    pub max_concurrent_details: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub category_container: Option<String>,
    #[serde(default = "default_category_name")]
    pub category_name: String,
    #[serde(default = "default_category_link")]
    pub category_link: String,
    pub product_container: String,
    pub product_title: String,
    pub product_image: String,
    /// Falls back to `product_title` when unset
    #[serde(default)]
    pub product_link: Option<String>,
    pub next_page: String,
    pub detail_table: String,
    #[serde(default = "default_link_attribute")]
    pub link_attribute: String,
    #[serde(default = "default_image_attribute")]
    pub image_attribute: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enables a daily rolling log file in this directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            json: false,
        }
    }
}

fn default_max_concurrent_details() -> usize {
    8
}

fn default_max_pages() -> usize {
    500
}

fn default_request_timeout() -> u64 {
    30
}

fn default_category_name() -> String {
    "span".into()
}

fn default_category_link() -> String {
    "a".into()
}

fn default_link_attribute() -> String {
    "href".into()
}

fn default_image_attribute() -> String {
    "src".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl AppConfig {
    /// Layer `config/default`, an optional explicit file and `CATALOG__*` environment
    /// variables. The result is not validated; call [`AppConfig::validate`] once any
    /// command-line overrides have been applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let s = builder
            // e.g. CATALOG__CRAWLER__BASE_URL
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.crawler.base_url)?;

        if self.crawler.max_concurrent_details == 0 {
            return Err(invalid("Crawler max_concurrent_details must be greater than 0"));
        }

        if self.crawler.max_pages == 0 {
            return Err(invalid("Crawler max_pages must be greater than 0"));
        }

        if self.crawler.request_timeout == 0 {
            return Err(invalid("Crawler request_timeout must be greater than 0"));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(invalid("Output path must not be empty"));
        }

        let required = [
            ("product_container", &self.selectors.product_container),
            ("product_title", &self.selectors.product_title),
            ("product_image", &self.selectors.product_image),
            ("next_page", &self.selectors.next_page),
            ("detail_table", &self.selectors.detail_table),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(&format!("Selector {} must not be empty", name)));
            }
        }

        if self.crawler.mode == CrawlMode::Categories
            && self
                .selectors
                .category_container
                .as_deref()
                .is_none_or(|s| s.trim().is_empty())
        {
            return Err(invalid(
                "Selector category_container is required in categories mode",
            ));
        }

        // Compiling the descriptor surfaces CSS syntax errors
        PageDescriptor::from_config(&self.selectors)?;

        Ok(())
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Config(ConfigError::Message(message.to_string()))
}
