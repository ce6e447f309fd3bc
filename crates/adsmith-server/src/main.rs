mod api;
mod cache;
mod middleware;
mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use adsmith_copywriter::CopyClient;
use adsmith_scraper::{PageFetcher, RenderGateway};

use crate::api::{build_app, AppState, GenerationSettings};
use crate::cache::ListingCache;
use crate::middleware::RateLimitState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = adsmith_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = adsmith_db::PoolConfig::from_app_config(&config);
    let pool = adsmith_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = adsmith_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations up to date");

    let render_gateway = match (&config.render_api_url, &config.render_api_key) {
        (Some(endpoint), Some(api_key)) => Some(RenderGateway {
            endpoint: endpoint.clone(),
            api_key: api_key.clone(),
        }),
        (Some(_), None) => {
            tracing::warn!(
                "ADSMITH_RENDER_API_URL is set without ADSMITH_RENDER_API_KEY; \
                 fetching pages directly"
            );
            None
        }
        _ => None,
    };
    let fetcher = PageFetcher::new(
        config.scraper_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_concurrent_renders,
        render_gateway,
    )?;
    let copy = CopyClient::new(
        &config.anthropic_api_key,
        &config.generation_model,
        config.generation_timeout_secs,
    )?;

    let state = AppState {
        pool,
        fetcher: Arc::new(fetcher),
        copy: Arc::new(copy),
        cache: Arc::new(ListingCache::from_app_config(&config)),
        generation: GenerationSettings {
            max_tokens: config.generation_max_tokens,
            temperature: config.generation_temperature,
        },
    };
    let rate_limit = RateLimitState::from_app_config(&config);
    let app = build_app(state, rate_limit, &config.cors_allowed_origins);

    tracing::info!(addr = %config.bind_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
