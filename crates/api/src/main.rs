mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod repos;
mod services;
mod state;
mod stores;
#[cfg(test)]
mod test_utils;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, ServiceExt, extract::Request, http};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    repos::{PgReviewRepo, PgStatusRepo, Repos, ReviewRepo},
    services::{ContactDispatcher, EmailSenderImpl, MailSettings},
    state::AppState,
    stores::{SlidingWindowLimiter, Stores},
};

#[derive(Parser)]
#[command(name = "api")]
#[command(about = "Reviews and contact form API server")]
struct Args {
    /// Create the database schema and exit
    #[arg(long)]
    init_db: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider before any TLS operations
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let args = Args::parse();
    dotenvy::dotenv().ok();
    let config = envy::from_env::<Config>().context("Failed to read configuration")?;
    config.validate()?;

    error::expose_internal_details(!config.is_production());

    // Initialize Sentry for error tracking (must be done early, guard must stay alive)
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.env.clone().into()),
                ..Default::default()
            },
        ))
    });

    // Set up tracing: JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }

    let database = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let reviews = Arc::new(PgReviewRepo::new(database.clone()));

    if args.init_db {
        tracing::info!("Creating database schema...");
        reviews.ensure_schema().await?;
        tracing::info!("Database schema ready");
        return Ok(());
    }

    let email = EmailSenderImpl::new(
        config.resend_api_key.clone(),
        config.smtp_url.clone(),
        config.sender()?,
        config.email_timeout(),
    )?;
    let dispatcher = ContactDispatcher::new(Arc::new(email), MailSettings::from_config(&config));

    let repos = Repos {
        reviews,
        status: Arc::new(PgStatusRepo::new(database)),
    };

    let stores = Stores {
        rate_limiter: Arc::new(SlidingWindowLimiter::new(
            config.rate_limit_requests as usize,
            config.rate_limit_window,
        )),
    };

    let cors = cors_layer(&config)?;

    let state = AppState {
        config: config.clone(),
        repos,
        stores,
        dispatcher: Arc::new(dispatcher),
    };

    // Trailing slashes are trimmed before routing, so `/reviews/` and `/reviews` match alike
    let app = NormalizePathLayer::trim_trailing_slash().layer(app(state, cors));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_origins()
        .into_iter()
        .map(|origin| {
            origin
                .parse::<http::HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

fn app(state: AppState, cors: CorsLayer) -> Router {
    // Request ID header name
    let x_request_id = http::HeaderName::from_static("x-request-id");

    Router::new()
        .merge(handlers::index::router())
        .nest("/health", handlers::health::router())
        .nest("/reviews", handlers::reviews::router())
        .nest("/contact", handlers::contact::router())
        .nest("/init-db", handlers::schema::router())
        .with_state(state)
        // Request ID: generate UUID, include in logs, return in response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &http::Request<axum::body::Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)) // 1MB limit
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
