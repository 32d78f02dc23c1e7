use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use vitrine::config::Config;
use vitrine::installments::{InstallmentService, MySqlTenantSettingsRepository};
use vitrine::middleware::{ApiKeyAuth, ApiKeyStore, MySqlApiKeyStore, RateLimiter, RequestId};
use vitrine::modules;
use vitrine::reports::{MySqlReportRepository, ReportService};
use vitrine::telemetry;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    telemetry::init(&config.app);

    tracing::info!("Starting Vitrine pricing and reporting service");
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let installment_service = web::Data::new(InstallmentService::new(Arc::new(
        MySqlTenantSettingsRepository::new(db_pool.clone()),
    )));
    let report_service = web::Data::new(ReportService::new(
        Arc::new(MySqlReportRepository::new(db_pool.clone())),
        config.reporting.clone(),
    ));
    let api_keys: Arc<dyn ApiKeyStore> = Arc::new(MySqlApiKeyStore::new(db_pool.clone()));
    // Shared across workers so the quota is global per client
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute);
    rate_limiter.spawn_cleanup(Duration::from_secs(60));
    let allowed_origins = config.security.cors_allowed_origins.clone();

    let bind_address = config.server.bind_address();
    tracing::info!("Server binding to: {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(installment_service.clone())
            .app_data(report_service.clone())
            .wrap(ApiKeyAuth::new(api_keys.clone()))
            .wrap(rate_limiter.clone())
            .wrap(cors(&allowed_origins))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .route("/", web::get().to(index))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Vitrine pricing and reporting",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
