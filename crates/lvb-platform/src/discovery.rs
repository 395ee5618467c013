use std::fmt;

use lvb_cloud::{CloudError, DecoraCloud};
use lvb_core::models::{Credentials, Device, SessionToken};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    Login,
    Permissions,
    Account,
    Devices,
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscoveryStage::Login => "login",
            DiscoveryStage::Permissions => "permission lookup",
            DiscoveryStage::Account => "account lookup",
            DiscoveryStage::Devices => "device listing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("discovery failed during {stage}: {source}")]
pub struct DiscoveryError {
    pub stage: DiscoveryStage,
    #[source]
    pub source: CloudError,
}

#[derive(Debug, Clone)]
pub struct Discovery {
    pub token: SessionToken,
    pub devices: Vec<Device>,
}

fn at(stage: DiscoveryStage) -> impl FnOnce(CloudError) -> DiscoveryError {
    move |source| DiscoveryError { stage, source }
}

/// Ordered discovery pipeline: login, first residential permission, that
/// permission's account, the account's primary residence, its switches.
/// Each stage is one network call with no retry; the failing stage is
/// reported in the error.
pub async fn discover<C: DecoraCloud + ?Sized>(
    api: &C,
    credentials: &Credentials,
) -> Result<Discovery, DiscoveryError> {
    let login = api
        .login(&credentials.email, &credentials.password)
        .await
        .map_err(at(DiscoveryStage::Login))?;
    tracing::debug!(user_id = login.user_id, "logged in");

    let permissions = api
        .residential_permissions(login.user_id, &login.token)
        .await
        .map_err(at(DiscoveryStage::Permissions))?;

    let account_id = permissions
        .first()
        .map(|permission| permission.residential_account_id)
        .ok_or_else(|| DiscoveryError {
            stage: DiscoveryStage::Account,
            source: CloudError::NotFound("no residential permissions for this login".into()),
        })?;

    let account = api
        .residential_account(account_id, &login.token)
        .await
        .map_err(at(DiscoveryStage::Account))?;

    let devices = api
        .residence_iot_switches(account.primary_residence_id, &login.token)
        .await
        .map_err(at(DiscoveryStage::Devices))?;

    tracing::info!(
        residence_id = account.primary_residence_id,
        devices = devices.len(),
        "discovery complete"
    );

    Ok(Discovery {
        token: login.token,
        devices,
    })
}
