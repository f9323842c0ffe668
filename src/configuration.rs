use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use config::Config;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::authentication::AdminEmail;
use crate::document_store::DocumentStoreClient;
use crate::identity::IdentityClient;

/// Global configuration, loaded from `configuration/*.yaml` and `APP_*`
/// environment variables. See `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub identity: IdentitySettings,
    pub document_store: DocumentStoreSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// 127.0.0.1 on a dev machine, 0.0.0.0 in a container
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Public origin, used for the served sitemap
    pub base_url: String,
    /// Signs and encrypts the session and flash message cookies. At least 64
    /// bytes.
    pub hmac_secret: Secret<String>,
    /// Mark cookies `Secure`; only `false` for plain-http local development
    #[serde(default = "default_true")]
    pub secure_cookies: bool,
    /// Served at `/` for any path without a route of its own (post images,
    /// a generated `sitemap.xml`). Relative paths resolve against the working
    /// directory.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_true() -> bool { true }

fn default_static_dir() -> String { "public".to_string() }

/// Identity provider, and the one address allowed into the admin panel
#[derive(Deserialize, Clone)]
pub struct IdentitySettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub admin_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl IdentitySettings {
    pub fn client(&self) -> Result<IdentityClient, anyhow::Error> {
        IdentityClient::new(
            self.base_url.clone(),
            self.api_key.clone(),
            Duration::from_millis(self.timeout_ms),
        )
    }

    pub fn admin_email(&self) -> AdminEmail { AdminEmail::new(&self.admin_email) }
}

/// Managed document database holding the newsletter collection
#[derive(Deserialize, Clone)]
pub struct DocumentStoreSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl DocumentStoreSettings {
    pub fn client(&self) -> Result<DocumentStoreClient, anyhow::Error> {
        DocumentStoreClient::new(
            self.base_url.clone(),
            self.api_key.clone(),
            Duration::from_millis(self.timeout_ms),
        )
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!(
                "{e} is not a supported environment; use `local` or `production`"
            )),
        }
    }
}

/// Load `configuration/base.yaml`, then `configuration/{APP_ENVIRONMENT}.yaml`
/// (default `local`), then `APP_`-prefixed env vars, each layer overriding the
/// last.
///
/// `APP_IDENTITY__API_KEY=...` -> `Settings.identity.api_key`
pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let cfg_dir = current_dir()
        .context("Failed to determine the current directory")?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        // env vars are always strings; `serde-aux` parses the numeric ones
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to load {env} configuration"))?;

    Ok(settings.try_deserialize::<Settings>()?)
}
