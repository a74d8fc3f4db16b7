use crate::category::Category;
use crate::error::{Error, Result};
use crate::source::Source;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pgportal.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteSettings,
    pub data: DataConfig,
    pub output: OutputConfig,
}

/// Page text and initial tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub title: String,
    pub tagline: Option<String>,
    pub default_tab: String,
}

/// Where category data is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory, http(s) URL, or file:// URL
    pub source: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub copy_data: bool,
    pub copy_assets: bool,
    /// Directory of replacement templates
    pub templates: Option<PathBuf>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "PG Portal".to_string(),
            tagline: Some("Entrance exams, institutes, scholarships and eligibility for postgraduate study".to_string()),
            default_tab: Category::Home.tab_id().to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: ".".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./site"),
            copy_data: true,
            copy_assets: true,
            templates: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        source: Option<String>,
        output: Option<PathBuf>,
        tab: Option<String>,
        no_copy_data: bool,
    ) {
        if let Some(src) = source {
            self.data.source = src;
        }

        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(t) = tab {
            self.site.default_tab = t;
        }

        if no_copy_data {
            self.output.copy_data = false;
        }
    }

    /// Parsed data source
    pub fn source(&self) -> Result<Source> {
        self.data.source.parse()
    }

    /// Tab shown when the page opens
    pub fn default_tab(&self) -> Result<Category> {
        self.site.default_tab.parse()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(Error::config_validation("site title must not be empty"));
        }

        if self.default_tab().is_err() {
            return Err(Error::config_validation(format!(
                "unknown default_tab '{}'",
                self.site.default_tab
            )));
        }

        if self.data.source.trim().is_empty() {
            return Err(Error::config_validation("data source must not be empty"));
        }

        Ok(())
    }
}
