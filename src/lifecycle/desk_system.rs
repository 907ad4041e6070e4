use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{ConfigError, DeskConfig};
use crate::desk::ProductDesk;
use crate::gateway::{self, GatewayError, ProductGateway, RestGateway};
use crate::model::Product;
use crate::notify::{Notifier, TracingNotifier};

#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The desk as the binary runs it: gateway and notifier behind trait objects.
pub type Desk = ProductDesk<dyn ProductGateway, dyn Notifier>;

/// Runtime wiring for the product desk.
///
/// `DeskSystem` is responsible for:
/// - **Gateway selection**: REST when an API URL is configured, the in-process store otherwise
/// - **Lifecycle Management**: starting the store actor and stopping it on shutdown
///
/// # Example
///
/// ```ignore
/// let mut system = DeskSystem::start(&DeskConfig::default(), Vec::new())?;
/// system.desk.initialize();
/// // ... drive the desk ...
/// system.shutdown().await?;
/// ```
pub struct DeskSystem {
    pub desk: Desk,

    /// Store actor task, when running against the in-process store.
    store: Option<JoinHandle<()>>,
}

impl DeskSystem {
    /// Builds the desk with a [`TracingNotifier`].
    ///
    /// `seed` pre-populates the in-process store and is ignored for REST.
    pub fn start(config: &DeskConfig, seed: Vec<Product>) -> Result<Self, StartError> {
        Self::start_with_notifier(config, seed, Arc::new(TracingNotifier))
    }

    pub fn start_with_notifier(
        config: &DeskConfig,
        seed: Vec<Product>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StartError> {
        config.validate()?;
        let (gateway, store) = match &config.api_url {
            Some(url) => {
                info!(%url, "Using REST gateway");
                let rest: Arc<dyn ProductGateway> =
                    Arc::new(RestGateway::new(url, config.request_timeout())?);
                (rest, None)
            }
            None => {
                info!(buffer = config.store_buffer_size, "Using in-process store");
                let (actor, store_gateway) = gateway::store::new(config.store_buffer_size);
                let handle = tokio::spawn(actor.with_items(seed).run());
                let local: Arc<dyn ProductGateway> = Arc::new(store_gateway);
                (local, Some(handle))
            }
        };

        Ok(Self {
            desk: ProductDesk::new(gateway, notifier),
            store,
        })
    }

    /// Disposes the desk, then waits for the store actor to drain.
    ///
    /// Dropping the desk drops the last store client, which closes the
    /// channel and lets the actor's loop exit.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down desk...");
        let Self { mut desk, store } = self;
        desk.dispose().await;
        drop(desk);

        if let Some(handle) = store {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
