use std::{net::TcpListener, sync::Arc};

use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings, StorageBackend},
    domain::services::{
        lexicon_sentiment_scorer::LexiconSentimentScorer, png_chart_renderer::PngChartRenderer,
    },
    ports::{
        chart_renderer::{ChartRenderer, ChartRendererError},
        sentiment_repository::SentimentRepository,
        sentiment_scorer::SentimentScorer,
    },
    repositories::{
        sentiment_in_memory_repository::SentimentInMemoryRepository,
        sentiment_postgres_repository::SentimentPostgresRepository,
    },
    routes::{
        analyze_text, dashboard, health_check, json_error_handler, query_error_handler,
        sentiment_graph, welcome,
    },
};

/// Collaborators used by the request handlers
///
/// Each of them is shared by all the actix-web workers.
#[derive(Clone)]
pub struct SentimentContext {
    pub repository: Arc<dyn SentimentRepository>,
    pub scorer: Arc<dyn SentimentScorer>,
    pub renderer: Arc<dyn ChartRenderer>,
}

impl SentimentContext {
    pub fn new(
        repository: Arc<dyn SentimentRepository>,
        scorer: Arc<dyn SentimentScorer>,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            repository,
            scorer,
            renderer,
        }
    }
}

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,
    /// Only set with the Postgres storage backend, closed once the server is stopped
    db_pool: Option<PgPool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplicationBuildError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Failed to migrate the database: {0}")]
    MigrationError(#[from] MigrateError),
    #[error("Invalid chart settings: {0}")]
    ChartSettingsError(#[from] ChartRendererError),
}

impl Application {
    /// Builds the collaborators described by `settings`, then the server
    ///
    /// With the Postgres storage backend, pending migrations are run first.
    ///
    /// # Parameters
    /// - nb_workers: number of actix-web workers
    ///   if `None`, the number of available physical CPUs is used as the worker count.
    #[tracing::instrument(name = "Building application", skip(settings))]
    pub async fn build(
        settings: Settings,
        nb_workers: Option<usize>,
    ) -> Result<Self, ApplicationBuildError> {
        let renderer = PngChartRenderer::new(settings.chart.width, settings.chart.height)?;

        let (repository, db_pool): (Arc<dyn SentimentRepository>, Option<PgPool>) =
            match settings.storage.backend {
                StorageBackend::Postgres => {
                    let connection_pool = get_connection_pool(&settings.database);
                    migrate_database(&connection_pool).await?;

                    (
                        Arc::new(SentimentPostgresRepository::new(connection_pool.clone()))
                            as Arc<dyn SentimentRepository>,
                        Some(connection_pool),
                    )
                }
                StorageBackend::Memory => {
                    info!("Using in-memory storage, records will be lost on shutdown");
                    (
                        Arc::new(SentimentInMemoryRepository::new()) as Arc<dyn SentimentRepository>,
                        None,
                    )
                }
            };

        let context = SentimentContext::new(
            repository,
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(renderer),
        );

        let mut application = Self::build_with_context(settings, nb_workers, context)?;
        application.db_pool = db_pool;
        Ok(application)
    }

    /// Builds the server around already built collaborators
    pub fn build_with_context(
        settings: Settings,
        nb_workers: Option<usize>,
        context: SentimentContext,
    ) -> Result<Self, ApplicationBuildError> {
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, nb_workers, context)?;

        Ok(Self {
            server,
            port,
            db_pool: None,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await?;

        if let Some(db_pool) = self.db_pool {
            db_pool.close().await;
            info!("Closed database connections");
        }

        Ok(())
    }
}

/// listener: the consumer binds their own port
///
/// TracingLogger middleware: generates a unique `request_id` for each incoming request
/// and attaches it to the spans of the request.
///
/// Every route answers both with and without a trailing slash.
pub fn run(
    listener: TcpListener,
    nb_workers: Option<usize>,
    context: SentimentContext,
) -> Result<Server, std::io::Error> {
    // `Data::from` keeps the trait objects behind the same `Arc`: every worker shares them
    let repository: Data<dyn SentimentRepository> = Data::from(context.repository);
    let scorer: Data<dyn SentimentScorer> = Data::from(context.scorer);
    let renderer: Data<dyn ChartRenderer> = Data::from(context.renderer);

    let server = HttpServer::new(move || {
        info!("Starting actix-web worker");

        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(welcome))
            .route("/health_check", web::get().to(health_check))
            .route("/analyze", web::post().to(analyze_text))
            .route("/analyze/", web::post().to(analyze_text))
            .route("/graph", web::get().to(sentiment_graph))
            .route("/graph/", web::get().to(sentiment_graph))
            .route("/dashboard", web::get().to(dashboard))
            .route("/dashboard/", web::get().to(dashboard))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(repository.clone())
            .app_data(scorer.clone())
            .app_data(renderer.clone())
    })
    .listen(listener)?;

    // If no workers were set, use the actix-web settings (number of workers = number of physical CPUs)
    if let Some(nb_workers) = nb_workers {
        return Ok(server.workers(nb_workers).run());
    }

    // No await
    Ok(server.run())
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(settings.with_db())
}

/// Runs the migrations embedded from the workspace `migrations` directory
#[tracing::instrument(name = "Migrating database", skip(pool))]
pub async fn migrate_database(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../migrations").run(pool).await
}
