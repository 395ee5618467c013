use std::sync::Arc;

use async_trait::async_trait;
use lvb_accessory::{CharacteristicError, CharacteristicHandler, CharacteristicValue};
use lvb_cloud::{CloudError, DecoraCloud, SwitchUpdate};
use lvb_core::models::{DeviceId, SessionToken};

fn vendor_failure(op: &str, device_name: &str, err: CloudError) -> CharacteristicError {
    tracing::warn!(device = device_name, "{op} failed: {err}");
    CharacteristicError::Vendor(err.to_string())
}

/// On/off capability for one switch. Holds the device identity and session
/// token by value; every read and write is an independent round-trip.
pub struct PowerControl<C> {
    api: Arc<C>,
    device_id: DeviceId,
    device_name: String,
    token: SessionToken,
}

impl<C> PowerControl<C> {
    pub fn new(api: Arc<C>, device_id: DeviceId, device_name: String, token: SessionToken) -> Self {
        Self {
            api,
            device_id,
            device_name,
            token,
        }
    }
}

#[async_trait]
impl<C: DecoraCloud + 'static> CharacteristicHandler for PowerControl<C> {
    async fn read(&self) -> Result<CharacteristicValue, CharacteristicError> {
        tracing::debug!(device = %self.device_name, "power read");
        let status = self
            .api
            .get_iot_switch(self.device_id, &self.token)
            .await
            .map_err(|err| vendor_failure("power read", &self.device_name, err))?;
        Ok(CharacteristicValue::Bool(status.power.is_on()))
    }

    async fn write(
        &self,
        value: CharacteristicValue,
    ) -> Result<CharacteristicValue, CharacteristicError> {
        let on = value.as_bool().ok_or(CharacteristicError::InvalidValue)?;
        tracing::debug!(device = %self.device_name, on, "power write");
        let status = self
            .api
            .set_iot_switch(self.device_id, &self.token, SwitchUpdate::power(on))
            .await
            .map_err(|err| vendor_failure("power write", &self.device_name, err))?;
        Ok(CharacteristicValue::Bool(status.power.is_on()))
    }
}

/// Brightness capability, symmetric with [`PowerControl`] but carrying an
/// integer level.
pub struct BrightnessControl<C> {
    api: Arc<C>,
    device_id: DeviceId,
    device_name: String,
    token: SessionToken,
}

impl<C> BrightnessControl<C> {
    pub fn new(api: Arc<C>, device_id: DeviceId, device_name: String, token: SessionToken) -> Self {
        Self {
            api,
            device_id,
            device_name,
            token,
        }
    }
}

#[async_trait]
impl<C: DecoraCloud + 'static> CharacteristicHandler for BrightnessControl<C> {
    async fn read(&self) -> Result<CharacteristicValue, CharacteristicError> {
        tracing::debug!(device = %self.device_name, "brightness read");
        let status = self
            .api
            .get_iot_switch(self.device_id, &self.token)
            .await
            .map_err(|err| vendor_failure("brightness read", &self.device_name, err))?;
        Ok(CharacteristicValue::Int(i64::from(status.brightness)))
    }

    async fn write(
        &self,
        value: CharacteristicValue,
    ) -> Result<CharacteristicValue, CharacteristicError> {
        let level = value
            .as_int()
            .and_then(|level| u32::try_from(level).ok())
            .ok_or(CharacteristicError::InvalidValue)?;
        tracing::debug!(device = %self.device_name, level, "brightness write");
        let status = self
            .api
            .set_iot_switch(self.device_id, &self.token, SwitchUpdate::brightness(level))
            .await
            .map_err(|err| vendor_failure("brightness write", &self.device_name, err))?;
        Ok(CharacteristicValue::Int(i64::from(status.brightness)))
    }
}
