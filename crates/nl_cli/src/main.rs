use std::sync::Arc;

use clap::{Parser, Subcommand};
use nl_core::{Config, KeywordExtractor, Result};
use nl_extract::{create_extractor, VocabularyRef};
use nl_sources::{CrawlPipeline, EnrichmentClient, SourceRegistry};
use nl_web::{create_app, AppState, DailyScheduler};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "newslex", about = "News crawler with CEFR-graded vocabulary extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server with the daily crawl scheduler
    Serve,
    /// Crawl one source now and print the enriched batch
    Crawl {
        /// Source name, e.g. bbc, guardian or reuters
        source: String,
    },
    /// List registered sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Fail fast: an unusable vocabulary reference means the pipeline must
    // refuse to run, not limp along with an empty word list.
    let vocab = Arc::new(VocabularyRef::load(&config.vocab_path, &config)?);
    let extractor: Arc<dyn KeywordExtractor> = create_extractor(&config, vocab.clone()).into();
    let registry = Arc::new(SourceRegistry::with_default_sources()?);
    let store = nl_storage::create_store(&config.storage_url).await?;

    let mut pipeline = CrawlPipeline::new(
        registry,
        extractor,
        vocab,
        store.clone(),
        config.discovery_limit,
    );
    if let Some(endpoint) = &config.enrichment_endpoint {
        pipeline = pipeline.with_enrichment(EnrichmentClient::new(endpoint.clone())?);
    }
    let pipeline = Arc::new(pipeline);

    match cli.command {
        Commands::Sources => {
            for name in pipeline.sources() {
                println!("{}", name);
            }
        }
        Commands::Crawl { source } => {
            let articles = pipeline.crawl(&source).await?;
            println!("{}", serde_json::to_string_pretty(&articles)?);
        }
        Commands::Serve => {
            let scheduler = Arc::new(DailyScheduler::new(pipeline.clone(), store.clone()));
            let _daily = scheduler.spawn();

            let app = create_app(AppState::new(pipeline, store)).await;
            let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
            info!("listening on {}", config.bind_addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
