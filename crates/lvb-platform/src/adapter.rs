use std::sync::{Arc, Mutex};

use lvb_accessory::{
    Accessory, AccessoryHost, CharacteristicBinding, CharacteristicBounds, CharacteristicKind,
    CharacteristicValue,
};
use lvb_cloud::DecoraCloud;
use lvb_core::device_map::{map_device_service, ServiceKind};
use lvb_core::models::{Credentials, Device, SessionToken};

use crate::controls::{BrightnessControl, PowerControl};
use crate::discovery::discover;
use crate::PlatformError;

/// Orchestrates login, device discovery and accessory registration, and
/// wires every discovered switch to the vendor API through characteristic
/// handlers.
pub struct Platform<C, H> {
    api: Arc<C>,
    host: Arc<H>,
    credentials: Credentials,
    accessories: Mutex<Vec<Accessory>>,
}

impl<C, H> Platform<C, H>
where
    C: DecoraCloud + 'static,
    H: AccessoryHost,
{
    pub fn new(api: Arc<C>, host: Arc<H>, credentials: Credentials) -> Self {
        Self {
            api,
            host,
            credentials,
            accessories: Mutex::new(Vec::new()),
        }
    }

    pub fn accessories(&self) -> Vec<Accessory> {
        self.accessories.lock().expect("accessory list").clone()
    }

    fn is_tracked(&self, serial: &str) -> bool {
        self.accessories
            .lock()
            .expect("accessory list")
            .iter()
            .any(|accessory| accessory.device.serial == serial)
    }

    fn track(&self, accessory: Accessory) {
        self.accessories.lock().expect("accessory list").push(accessory);
    }

    /// Host-runtime readiness signal. Runs discovery and registers an
    /// accessory for every switch not already tracked. Without complete
    /// credentials no network call is made and the platform stays inert.
    pub async fn did_finish_launching(&self) -> Result<(), PlatformError> {
        if !self.credentials.is_complete() {
            tracing::error!("email and password are required; no accessories will be bridged");
            return Ok(());
        }

        let discovery = discover(self.api.as_ref(), &self.credentials).await?;
        for device in discovery.devices {
            if self.is_tracked(&device.serial) {
                tracing::debug!(serial = %device.serial, "device already bridged");
                continue;
            }
            self.add_accessory(device, discovery.token.clone()).await?;
        }
        Ok(())
    }

    /// Create, wire and register a new accessory for a discovered device.
    pub async fn add_accessory(
        &self,
        device: Device,
        token: SessionToken,
    ) -> Result<(), PlatformError> {
        tracing::info!(name = %device.name, serial = %device.serial, "adding accessory");
        let accessory = Accessory::new(device, token);
        self.setup_service(&accessory).await?;
        self.host.register_accessory(&accessory).await?;
        self.track(accessory);
        Ok(())
    }

    /// Invoked by the host for accessories restored from its own storage.
    /// Handlers are rebound from scratch; nothing about the previous run is
    /// assumed durable.
    pub async fn configure_accessory(&self, accessory: Accessory) -> Result<(), PlatformError> {
        if self.is_tracked(&accessory.device.serial) {
            tracing::debug!(name = %accessory.display_name, "accessory already configured");
            return Ok(());
        }
        tracing::info!(name = %accessory.display_name, "configuring restored accessory");
        self.setup_service(&accessory).await?;
        self.track(accessory);
        Ok(())
    }

    /// Fetch live status once, then bind power (and brightness, when the
    /// model supports dimming) with bounds and initial values taken from
    /// that status.
    async fn setup_service(&self, accessory: &Accessory) -> Result<(), PlatformError> {
        let status = self
            .api
            .get_iot_switch(accessory.device.id, &accessory.token)
            .await?;

        let power = PowerControl::new(
            self.api.clone(),
            accessory.device.id,
            accessory.device.name.clone(),
            accessory.token.clone(),
        );
        self.host
            .bind_characteristic(
                accessory.id,
                CharacteristicBinding {
                    kind: CharacteristicKind::On,
                    bounds: None,
                    initial: CharacteristicValue::Bool(status.power.is_on()),
                    handler: Arc::new(power),
                },
            )
            .await?;

        if map_device_service(&accessory.device) == ServiceKind::DimmableLightbulb {
            let brightness = BrightnessControl::new(
                self.api.clone(),
                accessory.device.id,
                accessory.device.name.clone(),
                accessory.token.clone(),
            );
            self.host
                .bind_characteristic(
                    accessory.id,
                    CharacteristicBinding {
                        kind: CharacteristicKind::Brightness,
                        bounds: Some(CharacteristicBounds {
                            min: i64::from(status.min_level),
                            max: i64::from(status.max_level),
                            step: 1,
                        }),
                        initial: CharacteristicValue::Int(i64::from(status.brightness)),
                        handler: Arc::new(brightness),
                    },
                )
                .await?;
        }

        Ok(())
    }

    /// Unregister every tracked accessory and clear the list. Failures are
    /// logged and do not stop the sweep.
    pub async fn remove_accessories(&self) {
        let accessories: Vec<Accessory> = {
            let mut list = self.accessories.lock().expect("accessory list");
            list.drain(..).collect()
        };

        tracing::info!(count = accessories.len(), "removing all accessories");
        for accessory in accessories {
            if let Err(err) = self.host.unregister_accessory(accessory.id).await {
                tracing::warn!(name = %accessory.display_name, "unregister failed: {err}");
            }
        }
    }
}
