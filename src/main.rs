use anyhow::{bail, Context, Result};
use site_enhance::calculator::PricingConfig;
use site_enhance::config::Config;
use site_enhance::dom::MemoryDocument;
use site_enhance::preferences::FileStore;
use site_enhance::preview::{self, PreviewRequest, QuoteRequest};
use site_enhance::resource::ConfiguredSource;
use site_enhance::site::{Site, SiteOptions};
use site_enhance::validation::{FieldValidator, PatternPhoneRule};
use std::time::Instant;
use tracing::info;

fn parse_args(args: &[String]) -> Result<PreviewRequest> {
    let mut parsed = PreviewRequest::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" => {
                parsed.lang = Some(iter.next().context("--lang needs a language code")?.clone());
            }
            "--quote" => {
                let project_type = iter.next().context("--quote needs a project type")?.clone();
                let area = iter.next().context("--quote needs an area")?.clone();
                let add_ons = iter.by_ref().cloned().collect();
                parsed.quote = Some(QuoteRequest {
                    project_type,
                    area,
                    add_ons,
                });
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(parsed)
}

fn print_usage() {
    println!("Usage: site-enhance [--lang CODE] [--quote TYPE AREA [ADDON...]]");
    println!();
    println!("Renders the configured page snapshot and prints it as JSON.");
    println!("  --lang CODE               switch to CODE after startup");
    println!("  --quote TYPE AREA ...     fill in and submit the cost calculator (last option)");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_enhance=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let request = parse_args(&args)?;

    let config = Config::from_env()?;

    let page = std::fs::read_to_string(&config.page_file)
        .with_context(|| format!("Failed to read page file {}", config.page_file.display()))?;
    let mut document: MemoryDocument =
        serde_json::from_str(&page).context("Failed to parse page snapshot")?;
    info!("Loaded page with {} nodes", document.nodes.len());

    let pricing = PricingConfig::load(&config.pricing_file)?;
    let phone_rule = PatternPhoneRule::new(&config.phone_pattern)
        .with_context(|| format!("Invalid PHONE_PATTERN: {}", config.phone_pattern))?;

    let source = ConfiguredSource::from_location(&config.translations_source, config.resource_timeout)?;
    let store = FileStore::open(&config.preferences_file);

    let options = SiteOptions {
        pricing,
        validator: FieldValidator::new(Box::new(phone_rule)),
        ..SiteOptions::default()
    };
    let mut site = Site::start(store, &source, &mut document, options).await;

    let preview = preview::render(&mut site, document, &request, Instant::now())?;

    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}
