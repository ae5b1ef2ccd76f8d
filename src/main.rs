use cylinder_ledger::{
    api::{self, AppState},
    config::{Settings, load_seed_config},
    errors::Result,
    store::Store,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Resolve settings
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Invalid settings: {}", e))?;
    let bind_addr = settings.bind_addr;

    // 4. Load the seed used for a fresh data file
    let seed = load_seed_config(&settings.seed_config_path)
        .inspect_err(|e| error!("Failed to load seed configuration: {}", e))?;

    // 5. Open the data file (seeding or migrating it if needed)
    let store = Store::open(&settings.data_path, &seed)
        .await
        .inspect(|_| info!("Data file opened successfully."))
        .inspect_err(|e| error!("Failed to open data file: {}", e))?;

    // 6. Serve the API
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_addr, e))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, api::router(AppState::new(store)))
        .await
        .inspect_err(|e| error!("Server stopped: {}", e))?;

    Ok(())
}
