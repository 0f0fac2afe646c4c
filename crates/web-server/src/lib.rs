use analyzer::ResultsAggregator;
use axum::{routing::get, Router};
use configuration::Config;
use database::DbRepository;
use handlebars::Handlebars;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod views;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub aggregator: ResultsAggregator,
    /// Where `/export` writes the results CSV.
    pub export_path: PathBuf,
    pub templates: Arc<Handlebars<'static>>,
}

impl AppState {
    pub fn new(db_repo: DbRepository, export_path: PathBuf) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            db_repo,
            aggregator: ResultsAggregator::default(),
            export_path,
            templates: Arc::new(views::registry()?),
        })
    }
}

/// Wires every route to its handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(|| async { "OK" }))
        .route("/add-student", get(handlers::add_student_form).post(handlers::add_student))
        .route("/add-subject", get(handlers::add_subject_form).post(handlers::add_subject))
        .route("/add-marks", get(handlers::add_marks_form).post(handlers::add_marks))
        .route("/results", get(handlers::view_results))
        .route("/export", get(handlers::export_results))
        .with_state(state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, applies migrations and serves until the process exits.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Note: tracing is initialised by the calling binary.
    let db_pool = database::connect_and_migrate(&config.database).await?;
    let app_state = Arc::new(AppState::new(DbRepository::new(db_pool), config.export.path.clone())?);
    let app = build_router(app_state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
