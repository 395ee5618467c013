use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lvb_core::identity;
use lvb_core::models::{Device, SessionToken};
use uuid::Uuid;

use crate::{CharacteristicError, HostError};

/// One bridged device as the host runtime sees it. Identity is derived from
/// the device serial, so a restored accessory and a rediscovered device
/// resolve to the same id.
#[derive(Debug, Clone)]
pub struct Accessory {
    pub id: Uuid,
    pub display_name: String,
    pub device: Device,
    pub token: SessionToken,
}

impl Accessory {
    pub fn new(device: Device, token: SessionToken) -> Self {
        Self {
            id: identity::accessory_uuid(&device.serial),
            display_name: device.name.clone(),
            device,
            token,
        }
    }

    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            name: self.device.name.clone(),
            serial_number: self.device.serial.clone(),
            manufacturer: self.device.manufacturer.clone(),
            model: self.device.model.clone(),
            firmware_revision: self.device.version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    pub name: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub firmware_revision: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacteristicKind {
    On,
    Brightness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicValue {
    Bool(bool),
    Int(i64),
}

impl CharacteristicValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            CharacteristicValue::Bool(value) => Some(value),
            CharacteristicValue::Int(_) => None,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            CharacteristicValue::Int(value) => Some(value),
            CharacteristicValue::Bool(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicBounds {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Read/write endpoint the host invokes on characteristic access. Failures
/// surface to the caller; the host decides how to present them.
#[async_trait]
pub trait CharacteristicHandler: Send + Sync {
    async fn read(&self) -> Result<CharacteristicValue, CharacteristicError>;

    async fn write(
        &self,
        value: CharacteristicValue,
    ) -> Result<CharacteristicValue, CharacteristicError>;
}

pub struct CharacteristicBinding {
    pub kind: CharacteristicKind,
    pub bounds: Option<CharacteristicBounds>,
    pub initial: CharacteristicValue,
    pub handler: Arc<dyn CharacteristicHandler>,
}

impl fmt::Debug for CharacteristicBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacteristicBinding")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait AccessoryHost: Send + Sync {
    async fn register_accessory(&self, accessory: &Accessory) -> Result<(), HostError>;

    async fn unregister_accessory(&self, id: Uuid) -> Result<(), HostError>;

    async fn bind_characteristic(
        &self,
        id: Uuid,
        binding: CharacteristicBinding,
    ) -> Result<(), HostError>;
}
