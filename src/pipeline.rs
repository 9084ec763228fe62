use crate::config::{Config, MissingTablePolicy, OutputFormat};
use crate::error::{Result, ScraperError};
use crate::fetch::PageFetcher;
use crate::parser::{prettify, PageParser};
use crate::request::{build_url, RequestParams};
use crate::types::{PageResponse, Region};
use crate::writer::{output_path, write_html_dump, write_table};
use scraper::Html;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// A region that produced no output, and why.
#[derive(Debug, Clone)]
pub struct SkippedRegion {
    pub region: Region,
    pub reason: String,
}

/// Result of a complete run over a region list
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub written: Vec<(Region, PathBuf)>,
    pub skipped: Vec<SkippedRegion>,
}

/// Drives request building, fetching, parsing and writing for each region,
/// one region at a time.
pub struct Scraper {
    config: Config,
    parser: PageParser,
    fetcher: Arc<dyn PageFetcher>,
}

impl Scraper {
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let parser = PageParser::new(&config.scrape.table_class, &config.scrape.not_found_title)?;
        Ok(Self { config, parser, fetcher })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrapes every region in order. Region-local failures are logged and
    /// recorded in the summary; anything else stops the run.
    pub async fn run(&self, regions: &[Region]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for region in regions {
            summary.attempted += 1;
            match self.scrape_region(region).await {
                Ok(path) => summary.written.push((region.clone(), path)),
                Err(e) if self.should_skip(&e) => {
                    warn!("Skipping {} ({}): {}", region.name, region.id, e);
                    summary.skipped.push(SkippedRegion {
                        region: region.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("Aborting run at {} ({}): {}", region.name, region.id, e);
                    return Err(e);
                }
            }
        }

        info!(
            "Run finished: {} regions, {} written, {} skipped",
            summary.attempted,
            summary.written.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn should_skip(&self, err: &ScraperError) -> bool {
        match err {
            ScraperError::TableNotFound { .. } => {
                self.config.scrape.on_missing_table == MissingTablePolicy::Skip
            }
            other => other.is_region_local(),
        }
    }

    /// Fetches one region page and writes its output file.
    #[instrument(skip(self, region), fields(id = region.id, name = %region.name))]
    pub async fn scrape_region(&self, region: &Region) -> Result<PathBuf> {
        info!("Reading: {} {}", region.id, region.name);
        let scrape = &self.config.scrape;
        let url = build_url(&scrape.base_url, &RequestParams::for_region(scrape, region.id));
        debug!(%url, "Requesting region page");

        let page = self.fetcher.get(&url).await?;
        self.process_page(region, &page)
    }

    /// Everything after the fetch. Kept synchronous so the parsed document
    /// never lives across an await point.
    pub fn process_page(&self, region: &Region, page: &PageResponse) -> Result<PathBuf> {
        if !page.is_success() {
            return Err(ScraperError::HttpStatus {
                status: page.status,
                url: page.url.clone(),
            });
        }

        debug!("response: {}", page.body);

        let scrape = &self.config.scrape;
        let path = output_path(&scrape.output_dir, region, scrape.format);
        match scrape.format {
            OutputFormat::Tsv => {
                let parsed = self.parser.parse_page(&page.body, &page.url)?;
                info!("Processing page for {}", parsed.title);
                write_table(&parsed.table, &path)?;
                info!("Wrote {} rows to {}", parsed.table.rows.len(), path.display());
            }
            OutputFormat::Html => {
                let document = Html::parse_document(&page.body);
                let title = self.parser.check_title(&document, &page.url)?;
                info!("Processing page for {}", title);
                write_html_dump(&prettify(&document), &path)?;
                info!("Wrote page dump to {}", path.display());
            }
        }
        Ok(path)
    }
}
