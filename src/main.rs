use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use interview_scorer::config::Settings;
use interview_scorer::core::{CoverageScorer, FeedbackBuilder, SynonymError, SynonymTable};
use interview_scorer::models::FeedbackWeights;
use interview_scorer::routes::{self, AppState};
use interview_scorer::services::FeedbackStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Errors that stop the service from starting
#[derive(Debug, Error)]
enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Synonym table error: {0}")]
    Synonyms(#[from] SynonymError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_logging();

    info!("Starting interview scoring service...");

    let settings = Settings::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let synonyms = match &settings.scoring.synonyms_path {
        Some(path) => SynonymTable::from_path(path)?,
        None => SynonymTable::builtin(),
    };

    info!("Synonym table ready ({} entries)", synonyms.len());

    let weights = FeedbackWeights::from(&settings.scoring.weights);
    let scorer = CoverageScorer::with_synonyms(Arc::new(synonyms));
    let feedback = FeedbackBuilder::new(scorer, weights);

    info!("Feedback builder initialized with weights: {:?}", weights);

    let store = Arc::new(FeedbackStore::new(
        settings.store.max_answers,
        settings.store.ttl_secs,
    ));

    info!(
        "Feedback store initialized (max: {} answers, TTL: {}s)",
        settings.store.max_answers, settings.store.ttl_secs
    );

    let app_state = AppState { feedback, store };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
