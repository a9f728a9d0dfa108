//! services/client/src/telemetry.rs
//!
//! Installs the global tracing subscriber for a host application.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ClientError;

/// Sets up an `EnvFilter` at `level` plus a formatting layer.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: Level) -> Result<(), ClientError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ClientError::Internal(format!("failed to install tracing subscriber: {e}")))
}
