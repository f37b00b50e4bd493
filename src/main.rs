use database::ItemRepository;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use web_server::AppState;

/// The main entry point for the stockroom items API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if one is present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stockroom=info,web_server=info,tower_http=info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let settings = configuration::load_settings()?;
    let addr = settings.bind_addr();

    // The pool connects lazily: startup succeeds even while the database is
    // down, and readiness reports the difference until it comes back.
    let pool = database::connect(&settings);
    let repo = ItemRepository::new(pool);

    let state = Arc::new(AppState {
        repo,
        version: settings.app_version.clone(),
    });

    web_server::run_server(addr, state).await
}
