use anyhow::Context;
use clap::Parser;
use mockup_forge::config::Config;
use mockup_forge::fetch::{FetcherConfig, HttpFetcher};
use mockup_forge::generator::{Generator, GeneratorOptions};
use mockup_forge::logging::{init_subscriber, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;

/// Mockup Forge - batch mockup generator for crawled product artwork
#[derive(Parser, Debug)]
#[command(name = "mockup-forge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Directory for archives and the run summary (overrides output.dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Only process this domain
    #[arg(long)]
    domain: Option<String>,

    /// Render everything but do not touch the output directory
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_subscriber(format)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        config_file = %args.config.display(),
        template_sets = config.template_sets.len(),
        domains = config.domains.len(),
        format = config.output.format.as_str(),
        dry_run = args.dry_run,
        "Configuration loaded successfully"
    );

    let fetcher =
        HttpFetcher::new(FetcherConfig::default()).context("Failed to create HTTP client")?;
    let options = GeneratorOptions {
        output_dir: args.output_dir,
        domain_filter: args.domain,
        dry_run: args.dry_run,
    };

    let mut generator = Generator::new(config, Arc::new(fetcher), options)?;
    let summary = generator.run().await?;

    tracing::info!(
        processed = summary.total_processed(),
        skipped = summary.total_skipped(),
        archives = summary.archives.len(),
        "Done"
    );
    Ok(())
}
