//! services/client/src/bin/session.rs
//!
//! Restores (or opens) a session against the configured backend and logs a
//! summary of what the store fetched. Handy for checking a deployment.

use client_lib::{
    config::Config, error::ClientError, inspector::LogoutOnUnauthorized, telemetry,
    ClientApp, ErrorInspector,
};
use dnada_core::ports::Navigator;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_level)?;
    info!("Configuration loaded.");

    // --- 2. Assemble the Client ---
    let inspector = ErrorInspector::new().with(LogoutOnUnauthorized);
    let app = ClientApp::from_config(config, inspector)?;
    let actions = &app.actions;

    // --- 3. Restore or Open the Session ---
    actions.check_logged_in().await;
    if !app.store.read(|s| s.is_logged_in()) {
        match (std::env::var("DNADA_USERNAME"), std::env::var("DNADA_PASSWORD")) {
            (Ok(username), Ok(password)) => {
                if !actions.log_in(&username, &password).await {
                    return Err(ClientError::Internal("login rejected".to_string()));
                }
            }
            _ => {
                warn!("No stored session and no DNADA_USERNAME/DNADA_PASSWORD set.");
                return Ok(());
            }
        }
    }

    // --- 4. Fetch & Summarize ---
    let (experiments, designs, workflows) = tokio::join!(
        actions.get_experiments(),
        actions.get_designs(),
        actions.get_workflows(),
    );
    actions.get_banner().await;

    let state = app.store.snapshot();
    info!(
        user = state.user_profile().map(|p| p.email.as_str()).unwrap_or("?"),
        admin = state.has_admin_access(),
        experiments = experiments.map(|e| e.len()).unwrap_or_default(),
        designs = designs.map(|d| d.len()).unwrap_or_default(),
        workflows = workflows.map(|w| w.len()).unwrap_or_default(),
        banner = state.banner().map(|b| b.text.as_str()).unwrap_or(""),
        route = %app.navigator.current_path(),
        "Session summary"
    );

    Ok(())
}
