use lvb_core::models::{Device, DeviceId, SessionToken};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    CloudError, DecoraCloud, Login, ResidentialAccount, ResidentialPermission, SwitchUpdate,
};

#[derive(Debug, Clone)]
pub struct LevitonClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl LevitonClient {
    pub fn new(base_url: &str) -> Result<Self, CloudError> {
        // Url::join treats the last path segment as a file unless the base
        // ends with a slash.
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = ClientBuilder::new()
            .user_agent(format!(
                "leviton-accessory-bridge/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CloudError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &SessionToken,
    ) -> Result<T, CloudError> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CloudError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        401 | 403 => CloudError::Auth {
            status: status.as_u16(),
        },
        404 => CloudError::NotFound(body),
        code => CloudError::Api { status: code, body },
    })
}

#[async_trait::async_trait]
impl DecoraCloud for LevitonClient {
    async fn login(&self, email: &str, password: &str) -> Result<Login, CloudError> {
        let url = self.endpoint("Person/login")?;
        tracing::debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        parse(response).await
    }

    async fn residential_permissions(
        &self,
        user_id: i64,
        token: &SessionToken,
    ) -> Result<Vec<ResidentialPermission>, CloudError> {
        self.get_authed(&format!("Person/{user_id}/residentialPermissions"), token)
            .await
    }

    async fn residential_account(
        &self,
        account_id: i64,
        token: &SessionToken,
    ) -> Result<ResidentialAccount, CloudError> {
        self.get_authed(&format!("ResidentialAccounts/{account_id}"), token)
            .await
    }

    async fn residence_iot_switches(
        &self,
        residence_id: i64,
        token: &SessionToken,
    ) -> Result<Vec<Device>, CloudError> {
        self.get_authed(&format!("Residences/{residence_id}/iotSwitches"), token)
            .await
    }

    async fn get_iot_switch(
        &self,
        switch_id: DeviceId,
        token: &SessionToken,
    ) -> Result<Device, CloudError> {
        self.get_authed(&format!("IotSwitches/{switch_id}"), token)
            .await
    }

    async fn set_iot_switch(
        &self,
        switch_id: DeviceId,
        token: &SessionToken,
        update: SwitchUpdate,
    ) -> Result<Device, CloudError> {
        let url = self.endpoint(&format!("IotSwitches/{switch_id}"))?;
        tracing::debug!("PUT {url}");
        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, token.as_str())
            .json(&update)
            .send()
            .await?;
        parse(response).await
    }
}
