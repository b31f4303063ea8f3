mod catalog;
mod config;
mod errors;
mod matching;
mod routes;
mod scoring_client;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::{CatalogStore, JobSource};
use crate::config::{Config, ScorerBackend};
use crate::matching::agent::CareerAgent;
use crate::matching::recommender::{curated_skills, ResourceRecommender, StaticRecommender};
use crate::matching::resume::SkillVocabulary;
use crate::matching::scoring::{RemoteScorer, Scorer, SkillTaxonomy, TaxonomyScorer};
use crate::routes::build_router;
use crate::scoring_client::ScoringClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Load the job catalog once; an unreadable file leaves it empty
    let catalog = Arc::new(CatalogStore::open(config.job_catalog_path.clone()).await);
    info!(
        "Job catalog ready: {} postings",
        catalog.snapshot().map(|c| c.len()).unwrap_or(0)
    );

    let taxonomy = SkillTaxonomy::new(config.skill_taxonomy.clone());
    info!("Reference taxonomy: {}", taxonomy.skills().join(", "));

    let scorer = build_scorer(&config, taxonomy.clone())?;
    info!("Scorer backend: {}", scorer.backend());

    let recommender: Arc<dyn ResourceRecommender> =
        Arc::new(StaticRecommender::new(config.resource_base_url.clone()));

    let vocabulary = SkillVocabulary::new(
        taxonomy
            .skills()
            .iter()
            .cloned()
            .chain(curated_skills().map(String::from)),
    )
    .context("failed to build resume skill vocabulary")?;
    info!("Resume vocabulary: {} skills", vocabulary.len());

    // Build app state
    let state = AppState {
        catalog,
        agent: Arc::new(CareerAgent::new(scorer, Arc::clone(&recommender))),
        recommender,
        vocabulary: Arc::new(vocabulary),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the scoring backend named in config.
fn build_scorer(config: &Config, taxonomy: SkillTaxonomy) -> Result<Arc<dyn Scorer>> {
    match &config.scorer_backend {
        ScorerBackend::Static => Ok(Arc::new(TaxonomyScorer::new(taxonomy))),
        ScorerBackend::Remote { service_url } => {
            let client = ScoringClient::new(service_url.clone(), config.scoring_timeout)
                .context("failed to build scoring service client")?;
            info!(
                "Remote scoring at {service_url} (timeout {}s)",
                config.scoring_timeout.as_secs()
            );
            Ok(Arc::new(RemoteScorer::new(
                client,
                taxonomy,
                config.scoring_timeout,
            )))
        }
    }
}
