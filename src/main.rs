use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use watch_buddy_api::{
    auth::SupabaseAuth,
    config::Config,
    db::{
        self,
        repositories::{PgContentRepository, PgPreferenceRepository, PgStatusRepository},
        Cache,
    },
    services::TmdbProvider,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watch_buddy_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database ready");

    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, cache_handle) = Cache::new(redis_client);

    let state = Arc::new(AppState {
        metadata: Arc::new(TmdbProvider::new(
            cache,
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
        )),
        sessions: Arc::new(SupabaseAuth::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
        )),
        content: Arc::new(PgContentRepository::new(pool.clone())),
        statuses: Arc::new(PgStatusRepository::new(pool.clone())),
        preferences: Arc::new(PgPreferenceRepository::new(pool)),
        watch_region: config.watch_region.clone(),
    });

    let app = watch_buddy_api::create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache_handle.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
