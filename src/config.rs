use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COUNTRY_CODE, DEFAULT_OUTPUT_DIR, FREQUENCY_TABLE_CLASS,
    NOT_FOUND_TITLE, USER_AGENT,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub country_code: String,
    pub band: Option<u32>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Render region IDs as two digits ("06") instead of plain ("6"), the
    /// way the bundled region list writes them.
    pub zero_pad_region_id: bool,
    pub on_missing_table: MissingTablePolicy,
    pub table_class: String,
    pub not_found_title: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            band: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::Tsv,
            zero_pad_region_id: true,
            on_missing_table: MissingTablePolicy::Abort,
            table_class: FREQUENCY_TABLE_CLASS.to_string(),
            not_found_title: NOT_FOUND_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// None keeps the HTTP client's own timeout behaviour.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header and rows as tab-separated cells
    Tsv,
    /// Pretty-printed page HTML
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Html => "html",
        }
    }
}

/// What to do when a region page lacks the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingTablePolicy {
    /// Stop the whole run; the page layout has probably changed
    Abort,
    /// Log it and move on to the next region
    Skip,
}

/// Values supplied on the command line. Anything set here wins over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub country_code: Option<String>,
    pub band: Option<u32>,
    pub format: Option<OutputFormat>,
    pub zero_pad_region_id: Option<bool>,
    pub on_missing_table: Option<MissingTablePolicy>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        let scrape = &mut self.scrape;
        if let Some(dir) = overrides.output_dir {
            scrape.output_dir = dir;
        }
        if let Some(code) = overrides.country_code {
            scrape.country_code = code;
        }
        if overrides.band.is_some() {
            scrape.band = overrides.band;
        }
        if let Some(format) = overrides.format {
            scrape.format = format;
        }
        if let Some(pad) = overrides.zero_pad_region_id {
            scrape.zero_pad_region_id = pad;
        }
        if let Some(policy) = overrides.on_missing_table {
            scrape.on_missing_table = policy;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        let code = &self.scrape.country_code;
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ScraperError::Config(format!(
                "country code must be two letters, got '{}'",
                code
            )));
        }
        if self.scrape.base_url.trim().is_empty() {
            return Err(ScraperError::Config("base_url must not be empty".into()));
        }
        if self.scrape.table_class.trim().is_empty() {
            return Err(ScraperError::Config("table_class must not be empty".into()));
        }
        Ok(())
    }
}
