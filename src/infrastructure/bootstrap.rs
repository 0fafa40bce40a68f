//! Composition root: build the gateway from configuration.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::adapter::inbound::http::build_router;
use crate::adapter::outbound::inference::HttpBackend;
use crate::adapter::outbound::storage::LocalAssetStore;
use crate::application::{ChatService, Dispatcher};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{AssetStore, InferenceBackend};

/// Wired gateway components.
pub struct Gateway {
    pub router: Router,
    pub store: Arc<dyn AssetStore>,
}

/// Build the backend client and upload store named by `config`.
///
/// # Errors
///
/// Fails if the credential variable is missing, an endpoint URL is invalid,
/// the HTTP client cannot be built, or the upload directory cannot be
/// created.
pub fn build_adapters(
    config: &Config,
) -> Result<(Arc<dyn InferenceBackend>, Arc<dyn AssetStore>)> {
    let backend = HttpBackend::from_config(&config.backend)?;
    let store = LocalAssetStore::new(&config.storage.upload_dir, &config.storage.public_prefix)?;
    Ok((Arc::new(backend), Arc::new(store)))
}

/// Wire the chat service around the given adapters.
#[must_use]
pub fn build_chat_service(
    config: &Config,
    backend: Arc<dyn InferenceBackend>,
    store: Arc<dyn AssetStore>,
) -> ChatService {
    let dispatcher = Dispatcher::new(backend, store, config.dispatch.max_concurrency);
    ChatService::new(dispatcher, config.request_timeout())
}

/// Build the full gateway: adapters, service and router.
///
/// # Errors
///
/// See [`build_adapters`].
pub fn build_gateway(config: &Config) -> Result<Gateway> {
    let (backend, store) = build_adapters(config)?;
    info!(
        backend = backend.name(),
        max_concurrency = config.dispatch.max_concurrency,
        upload_dir = %config.storage.upload_dir.display(),
        "Gateway components ready"
    );

    let chat = build_chat_service(config, backend, Arc::clone(&store));
    let router = build_router(chat, &config.server, &config.storage);
    Ok(Gateway { router, store })
}
