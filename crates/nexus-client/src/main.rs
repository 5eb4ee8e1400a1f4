//! `nexus` -- opens the configured storage, restores the saved session and
//! prints the dashboard summary of whoever is logged in.

use tracing::info;
use tracing_subscriber::EnvFilter;

use nexus_client::{AppState, ClientConfig};
use nexus_shared::constants::APP_NAME;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,nexus_client=debug,nexus_store=info")),
        )
        .with_target(true)
        .init();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    let state = AppState::open(&config)?;

    match (state.session.current_user(), state.dashboard()) {
        (Some(user), Some(summary)) => {
            info!(user_id = %user.id, role = %user.role, "session restored");
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => info!("No saved session; log in from the application first"),
    }

    Ok(())
}
