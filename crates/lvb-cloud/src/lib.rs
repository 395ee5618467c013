//! Client for the My Leviton cloud API: login, residence discovery and
//! per-switch get/set. Every call is a single best-effort attempt; there is
//! no caching, rate limiting or retry at this boundary.

mod client;

pub use client::LevitonClient;

use async_trait::async_trait;
use lvb_core::models::{Device, DeviceId, PowerState, SessionToken};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://my.leviton.com/api";

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),
    #[error("authentication rejected (status {status})")]
    Auth { status: u16 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("vendor api error {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    #[serde(rename = "id")]
    pub token: SessionToken,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialPermission {
    pub residential_account_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialAccount {
    pub primary_residence_id: i64,
}

/// Partial update for a switch; only the fields present are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwitchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u32>,
}

impl SwitchUpdate {
    pub fn power(on: bool) -> Self {
        Self {
            power: Some(on.into()),
            ..Self::default()
        }
    }

    pub fn brightness(level: u32) -> Self {
        Self {
            brightness: Some(level),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait DecoraCloud: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Login, CloudError>;

    async fn residential_permissions(
        &self,
        user_id: i64,
        token: &SessionToken,
    ) -> Result<Vec<ResidentialPermission>, CloudError>;

    async fn residential_account(
        &self,
        account_id: i64,
        token: &SessionToken,
    ) -> Result<ResidentialAccount, CloudError>;

    async fn residence_iot_switches(
        &self,
        residence_id: i64,
        token: &SessionToken,
    ) -> Result<Vec<Device>, CloudError>;

    async fn get_iot_switch(
        &self,
        switch_id: DeviceId,
        token: &SessionToken,
    ) -> Result<Device, CloudError>;

    async fn set_iot_switch(
        &self,
        switch_id: DeviceId,
        token: &SessionToken,
        update: SwitchUpdate,
    ) -> Result<Device, CloudError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_update_sends_only_set_fields() {
        let body = serde_json::to_value(SwitchUpdate::power(true)).unwrap();
        assert_eq!(body, serde_json::json!({ "power": "ON" }));

        let body = serde_json::to_value(SwitchUpdate::brightness(40)).unwrap();
        assert_eq!(body, serde_json::json!({ "brightness": 40 }));
    }
}
