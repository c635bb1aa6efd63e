use std::net::SocketAddr;
use std::sync::Arc;

use recruitment_tracker::{
    config::{get_config, init_config, LogFormat},
    database::{
        memory::MemoryStore,
        pool::{create_pool, run_migrations},
        postgres::PgStore,
        Store,
    },
    routes, AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("recruitment_tracker=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL is memory://, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let pool = create_pool(config).await?;
        run_migrations(&pool).await?;
        info!("database migrations applied");
        Arc::new(PgStore::new(pool))
    };

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let app_state = AppState::new(store, config)?;
    let app = routes::build_app(app_state, config);

    let addr: SocketAddr = config.server_address.parse()?;
    info!(
        %addr,
        policy = ?config.transition_policy,
        "recruitment tracker listening"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
