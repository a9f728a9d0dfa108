//! services/client/src/app.rs
//!
//! Wires configuration, adapters, store and actions into one handle a host
//! UI holds for its whole lifetime.

use std::sync::Arc;

use dnada_core::ports::{LabApi, TokenStorage};
use tracing::info;

use crate::adapters::{FileTokenStorage, HttpLabApi};
use crate::config::Config;
use crate::error::ClientError;
use crate::inspector::ErrorInspector;
use crate::router::{HistoryNavigator, Router};
use crate::store::actions::Actions;
use crate::store::Store;

/// The assembled client.
#[derive(Clone)]
pub struct ClientApp {
    pub config: Arc<Config>,
    pub store: Store,
    pub navigator: Arc<HistoryNavigator>,
    pub actions: Actions,
}

impl ClientApp {
    /// Builds the production stack: reqwest against `API_URL` and a token file.
    pub fn from_config(config: Config, inspector: ErrorInspector) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        let api = Arc::new(HttpLabApi::new(http, config.api_base(), config.list_limit));
        let tokens = Arc::new(FileTokenStorage::new(config.token_path.clone()));
        info!(api_url = %config.api_url, token_path = %config.token_path.display(), "Client configured");
        Self::with_parts(config, api, tokens, inspector)
    }

    /// Builds the client around caller-supplied ports.
    pub fn with_parts(
        config: Config,
        api: Arc<dyn LabApi>,
        tokens: Arc<dyn TokenStorage>,
        inspector: ErrorInspector,
    ) -> Result<Self, ClientError> {
        let navigator = Arc::new(HistoryNavigator::new(Router::default_routes(), "/")?);
        let store = Store::new();
        let actions = Actions::new(
            store.clone(),
            api,
            tokens,
            navigator.clone(),
            inspector,
            config.min_loading,
        );
        Ok(Self {
            config: Arc::new(config),
            store,
            navigator,
            actions,
        })
    }
}
