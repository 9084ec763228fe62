use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Could not reach RepeaterBook at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Page not found. Check URL parameters: {url}")]
    RegionNotFound { url: String },

    #[error("Frequency table (class \"{class}\") missing from {url}")]
    TableNotFound { class: String, url: String },

    #[error("Region list error: {0}")]
    RegionList(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScraperError {
    /// True when the failure only concerns the region being scraped and the
    /// batch can move on. `TableNotFound` is excluded; its handling is a
    /// configuration choice made by the pipeline.
    pub fn is_region_local(&self) -> bool {
        matches!(
            self,
            ScraperError::Transport { .. }
                | ScraperError::HttpStatus { .. }
                | ScraperError::RegionNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
