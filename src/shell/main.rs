use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use time_costing::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use time_costing::adapters::in_memory::in_memory_entry_store::InMemoryEntryStore;
use time_costing::adapters::inbound::http::router;
use time_costing::shell::config::AppConfig;
use time_costing::shell::seed::Seed;
use time_costing::shell::state::AppState;

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,time_costing=debug,tower_http=debug"));

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().inspect_err(|error| {
        tracing::error!(%error, "invalid configuration");
    })?;

    let directory = match &config.seed_file {
        Some(path) => {
            let seed = Seed::load(path)?;
            tracing::info!(
                users = seed.users.len(),
                projects = seed.projects.len(),
                tasks = seed.tasks.len(),
                "seed loaded"
            );
            seed.into_directory()
        }
        None => InMemoryDirectory::new(),
    };

    let state = AppState::new(InMemoryEntryStore::new(), directory, config.rates.clone());
    tracing::info!(
        pln_to_uah = %state.rates.pln_to_uah(),
        monthly_hours = state.rates.monthly_hours(),
        default_currency = %state.rates.default_currency(),
        "rates configured"
    );

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "time costing listening");
    axum::serve(listener, app).await?;
    Ok(())
}
