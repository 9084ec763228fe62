use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use repeater_scraper::config::{Config, ConfigOverrides, MissingTablePolicy, OutputFormat};
use repeater_scraper::constants::DEFAULT_REGIONS_FILE;
use repeater_scraper::fetch::ReqwestFetcher;
use repeater_scraper::logging;
use repeater_scraper::pipeline::{RunSummary, Scraper};
use repeater_scraper::regions::load_regions;
use repeater_scraper::types::Region;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "repeater_scraper")]
#[command(about = "Scrapes RepeaterBook repeater listings into one TSV file per region")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every region in a region list
    Scrape {
        /// Tab-separated region list (id, name)
        #[arg(long, default_value = DEFAULT_REGIONS_FILE)]
        regions: PathBuf,
        #[command(flatten)]
        opts: ScrapeOpts,
    },
    /// Scrape a single region
    Region {
        /// RepeaterBook region (state) ID
        #[arg(long)]
        id: u32,
        /// Display name, used for the output file name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        opts: ScrapeOpts,
    },
    /// Print the parsed region list and exit
    ListRegions {
        #[arg(long, default_value = DEFAULT_REGIONS_FILE)]
        regions: PathBuf,
    },
}

#[derive(Args)]
struct ScrapeOpts {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for the per-region output files
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Two-letter country code
    #[arg(long)]
    country: Option<String>,
    /// Band filter ID (e.g. 14 for 2 m)
    #[arg(long)]
    band: Option<u32>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Send region IDs zero-padded to two digits (the default)
    #[arg(long, conflicts_with = "no_zero_pad")]
    zero_pad: bool,
    /// Send region IDs without zero padding
    #[arg(long)]
    no_zero_pad: bool,
    #[arg(long, value_enum)]
    on_missing_table: Option<MissingTablePolicy>,
    /// Directory for the JSON log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

impl ScrapeOpts {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        config.apply_overrides(ConfigOverrides {
            output_dir: self.output_dir.clone(),
            country_code: self.country.clone(),
            band: self.band,
            format: self.format,
            zero_pad_region_id: match (self.zero_pad, self.no_zero_pad) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            on_missing_table: self.on_missing_table,
        })?;
        Ok(config)
    }
}

async fn run_scrape(opts: &ScrapeOpts, regions: Vec<Region>) -> anyhow::Result<RunSummary> {
    let config = opts.load_config().context("loading configuration")?;
    let fetcher = ReqwestFetcher::new(&config.http)?;
    let scraper = Scraper::new(config, Arc::new(fetcher))?;

    info!(
        regions = regions.len(),
        output_dir = %scraper.config().scrape.output_dir.display(),
        "Starting scrape"
    );
    let summary = scraper.run(&regions).await?;
    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Scrape results:");
    println!("   Regions: {}", summary.attempted);
    println!("   Written: {}", summary.written.len());
    println!("   Skipped: {}", summary.skipped.len());
    for skipped in &summary.skipped {
        println!("   - {} ({}): {}", skipped.region.name, skipped.region.id, skipped.reason);
    }
}

fn read_regions(path: &Path) -> anyhow::Result<Vec<Region>> {
    load_regions(path).with_context(|| format!("reading region list {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { regions, opts } => {
            let _guard = logging::init_logging(&opts.log_dir)?;
            let regions = read_regions(&regions)?;
            run_scrape(&opts, regions).await?;
        }
        Commands::Region { id, name, opts } => {
            let _guard = logging::init_logging(&opts.log_dir)?;
            let name = name.unwrap_or_else(|| format!("region_{}", id));
            run_scrape(&opts, vec![Region::new(id, name)]).await?;
        }
        Commands::ListRegions { regions } => {
            for region in read_regions(&regions)? {
                println!("{}\t{}", region.id, region.name);
            }
        }
    }

    Ok(())
}
