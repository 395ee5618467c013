mod host;

pub use host::{
    Accessory, AccessoryHost, AccessoryInformation, CharacteristicBinding, CharacteristicBounds,
    CharacteristicHandler, CharacteristicKind, CharacteristicValue,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("accessory {0} is not registered")]
    UnknownAccessory(uuid::Uuid),
    #[error("host runtime error: {0}")]
    Runtime(String),
}

#[derive(Debug, Error)]
pub enum CharacteristicError {
    #[error("vendor call failed: {0}")]
    Vendor(String),
    #[error("value does not fit the characteristic")]
    InvalidValue,
}
