use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum_server::tls_rustls::RustlsConfig;
use groupmatch::config::AppConfig;
use groupmatch::middleware::auth::JwtUserResolver;
use groupmatch::services::match_store::PgMatchStore;
use groupmatch::{db, routes, AppState};
use mimalloc::MiMalloc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupmatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    let features = db::detect_features(&pool).await?;
    tracing::info!(meeting_schedules = features.meeting_schedules, "Schema features detected");

    let state = AppState {
        store: Arc::new(PgMatchStore::new(pool)),
        auth: Arc::new(JwtUserResolver::new(
            config.jwt_secret.clone(),
            config.session_cookie_name.clone(),
        )),
        features,
    };

    let origin: HeaderValue = config
        .frontend_url
        .parse()
        .context("FRONTEND_URL is not a valid origin")?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state, cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid BACKEND_HOST/BACKEND_PORT")?;

    match &config.tls {
        Some(tls) => {
            rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;
            let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
            tracing::info!(host = %addr, "Starting group matching API server (HTTPS)");
            axum_server::bind_rustls(addr, rustls_config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            tracing::info!(host = %addr, "Starting group matching API server");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
