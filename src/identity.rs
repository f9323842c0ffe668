use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use reqwest::Response;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

/// The user record the provider hands back after a successful sign-in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub id_token: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    /// The provider understood the request and said no (bad password, unknown
    /// user, expired token...)
    #[error("Identity provider rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[derive(Deserialize)]
struct ProviderError {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignOutRequest<'a> {
    id_token: &'a str,
}

/// HTTP client for the third-party identity provider. The site never sees
/// password hashes; it only forwards credentials and keeps the returned
/// identity.
pub struct IdentityClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl IdentityClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build identity provider http client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[tracing::instrument(name = "Signing in at identity provider", skip(self, password))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<IdentityUser, IdentityError> {
        let resp = self
            .http_client
            .post(format!("{}/accounts:signInWithPassword", self.base_url))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&SignInRequest {
                email,
                password: password.expose_secret(),
                return_secure_token: true,
            })
            .send()
            .await
            .context("Failed to reach the identity provider")?;
        let user = check_status(resp)
            .await?
            .json::<IdentityUser>()
            .await
            .context("Failed to decode signed-in user")?;
        Ok(user)
    }

    /// End the provider-side session associated with `id_token`
    #[tracing::instrument(name = "Signing out at identity provider", skip_all)]
    pub async fn sign_out(
        &self,
        id_token: &Secret<String>,
    ) -> Result<(), IdentityError> {
        let resp = self
            .http_client
            .post(format!("{}/accounts:signOut", self.base_url))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&SignOutRequest {
                id_token: id_token.expose_secret(),
            })
            .send()
            .await
            .context("Failed to reach the identity provider")?;
        check_status(resp).await?;
        Ok(())
    }
}

/// 4xx means the provider rejected us, and usually says why; anything else
/// that is not a success is unexpected.
async fn check_status(resp: Response) -> Result<Response, IdentityError> {
    let status = resp.status();
    if status.is_client_error() {
        let message = match resp.json::<ProviderError>().await {
            Ok(body) => body.error.message,
            Err(_) => status.to_string(),
        };
        return Err(IdentityError::Rejected(message));
    }
    Ok(resp
        .error_for_status()
        .context("Identity provider returned an error")?)
}
