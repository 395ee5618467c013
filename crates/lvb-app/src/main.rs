use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use lvb_accessory::{Accessory, AccessoryHost, CharacteristicBinding, HostError};
use lvb_cloud::LevitonClient;
use lvb_core::models::Credentials;
use lvb_platform::Platform;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Stand-in accessory host that records the bridge wiring in the log.
/// A real host runtime implements [`AccessoryHost`] and drives the bound
/// handlers on characteristic access.
#[derive(Debug, Default)]
struct LoggingHost;

#[async_trait]
impl AccessoryHost for LoggingHost {
    async fn register_accessory(&self, accessory: &Accessory) -> Result<(), HostError> {
        let info = accessory.information();
        tracing::info!(
            name = %info.name,
            serial = %info.serial_number,
            model = %info.model,
            "accessory registered"
        );
        Ok(())
    }

    async fn unregister_accessory(&self, id: Uuid) -> Result<(), HostError> {
        tracing::info!(%id, "accessory unregistered");
        Ok(())
    }

    async fn bind_characteristic(
        &self,
        id: Uuid,
        binding: CharacteristicBinding,
    ) -> Result<(), HostError> {
        tracing::info!(%id, ?binding, "characteristic bound");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let email = env_or("LVB_EMAIL", "");
    let password = env_or("LVB_PASSWORD", "");
    let base_url = env_or("LVB_API_URL", lvb_cloud::DEFAULT_BASE_URL);

    let api = match LevitonClient::new(&base_url) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::error!("invalid API configuration: {err}");
            return;
        }
    };

    let host = Arc::new(LoggingHost);
    let platform = Platform::new(api, host, Credentials::new(email, password));

    if let Err(err) = platform.did_finish_launching().await {
        tracing::error!("accessory discovery failed: {err}");
    }

    tracing::info!("bridge running; Ctrl-C to exit");
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("shutdown signal unavailable");
    }
    platform.remove_accessories().await;
}
