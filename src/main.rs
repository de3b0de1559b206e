use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_dashboard::{
  adapters::http::{
    InvoiceRouteDependencies, RequestIdMiddleware, TemplateEngine, configure_invoice_routes,
  },
  application::invoice::{
    CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceUseCase, ListInvoicesUseCase,
    UpdateInvoiceUseCase,
  },
  domain::invoice::{InvoiceService, ViewCache},
  infrastructure::{
    cache::{InMemoryViewCache, RedisViewCache},
    config::Config,
    persistence::postgres::PostgresInvoiceRepository,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoice_dashboard=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoice dashboard");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  let view_cache = build_view_cache(&config).await.map_err(|e| {
    tracing::error!("Failed to set up view cache: {:#}", e);
    std::io::Error::other(e.to_string())
  })?;

  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let invoice_service = Arc::new(InvoiceService::new(invoice_repo));

  let templates = TemplateEngine::new().map_err(|e| {
    tracing::error!("Failed to initialize template engine: {}", e);
    std::io::Error::other(e.to_string())
  })?;
  tracing::info!("Template engine initialized");

  let dependencies = InvoiceRouteDependencies {
    templates,
    view_cache: view_cache.clone(),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
    get_invoice_use_case: Arc::new(GetInvoiceUseCase::new(invoice_service.clone())),
    create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(
      invoice_service.clone(),
      view_cache.clone(),
    )),
    update_invoice_use_case: Arc::new(UpdateInvoiceUseCase::new(
      invoice_service.clone(),
      view_cache.clone(),
    )),
    delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(
      invoice_service.clone(),
      view_cache.clone(),
    )),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_invoice_routes(cfg, dependencies.clone()))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Picks redis when configured, otherwise an in-process cache
async fn build_view_cache(config: &Config) -> anyhow::Result<Arc<dyn ViewCache>> {
  let Some(redis_config) = &config.redis else {
    tracing::info!("No redis configured, caching views in memory");
    return Ok(Arc::new(InMemoryViewCache::new(Duration::from_secs(
      config.cache.ttl_seconds,
    ))));
  };

  tracing::info!("Connecting to Redis: {}", redis_config.url);

  let client = redis::Client::open(redis_config.url.clone()).context("Invalid Redis URL")?;
  let connection = tokio::time::timeout(
    Duration::from_secs(redis_config.connect_timeout_seconds),
    client.get_connection_manager(),
  )
  .await
  .with_context(|| {
    format!(
      "Redis connection timed out after {} seconds",
      redis_config.connect_timeout_seconds
    )
  })?
  .with_context(|| format!("Could not connect to Redis at {}", redis_config.url))?;

  tracing::info!("Redis connection established");

  Ok(Arc::new(RedisViewCache::new(
    connection,
    redis_config.key_prefix.clone(),
    config.cache.ttl_seconds,
  )))
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
