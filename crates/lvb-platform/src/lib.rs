pub mod adapter;
pub mod controls;
pub mod discovery;

pub use adapter::Platform;
pub use discovery::{discover, Discovery, DiscoveryError, DiscoveryStage};

use lvb_accessory::HostError;
use lvb_cloud::CloudError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("cloud call failed: {0}")]
    Cloud(#[from] CloudError),
    #[error("host runtime error: {0}")]
    Host(#[from] HostError),
}
