//! HTTP client for the component registry
//!
//! [`RegistryClient`] performs the two read operations the CLI needs. The base
//! URL is passed in through [`RegistrySettings`] at construction so tests can
//! point the client at a local server; the client itself never reads the
//! environment.
//!
//! Failures are never retried. A transport failure or timeout is reported as
//! [`PixelMotionError::RegistryUnavailable`]; a non-success status for a
//! component payload means the component does not exist and is reported as
//! [`PixelMotionError::ComponentNotFound`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{RegistryComponent, RegistryIndex};
use crate::constants::{
    DEFAULT_REGISTRY_URL, REGISTRY_COMPONENTS_DIR, REGISTRY_INDEX_PATH, REGISTRY_REQUEST_TIMEOUT,
};
use crate::core::PixelMotionError;

/// Where the registry lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    base_url: String,
}

impl RegistrySettings {
    /// Settings for a registry at `base_url` (trailing slashes are ignored)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Use `override_url` when present, otherwise the hosted registry
    #[must_use]
    pub fn from_override(override_url: Option<&str>) -> Self {
        match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the index document
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("{}/{REGISTRY_INDEX_PATH}", self.base_url)
    }

    /// URL of a single component payload
    #[must_use]
    pub fn component_url(&self, name: &str) -> String {
        format!("{}/{REGISTRY_COMPONENTS_DIR}/{name}.json", self.base_url)
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

/// Anything that can hand out component payloads by name
///
/// The installer is written against this trait; [`RegistryClient`] is the
/// production implementation and tests substitute an in-memory registry.
pub trait ComponentSource {
    /// Fetch the full payload for `name`
    fn fetch_component(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RegistryComponent, PixelMotionError>>;
}

/// Read-only client for a registry service
pub struct RegistryClient {
    http: reqwest::Client,
    settings: RegistrySettings,
    /// Payloads already fetched during this run
    components: Mutex<HashMap<String, RegistryComponent>>,
}

impl RegistryClient {
    /// Build a client with the default request timeout
    pub fn new(settings: RegistrySettings) -> Result<Self, PixelMotionError> {
        let http = reqwest::Client::builder()
            .timeout(REGISTRY_REQUEST_TIMEOUT)
            .user_agent(concat!("pixel-motion/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PixelMotionError::Other {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            settings,
            components: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch `registry.json`
    ///
    /// Any failure, including a body that is not a registry index, is a
    /// [`PixelMotionError::RegistryUnavailable`].
    pub async fn fetch_index(&self) -> Result<RegistryIndex, PixelMotionError> {
        self.fetch_index_document().await.map(|(index, _)| index)
    }

    /// Fetch `registry.json`, keeping the raw document next to the typed index
    ///
    /// The raw value carries item fields the typed model does not know about.
    pub async fn fetch_index_document(
        &self,
    ) -> Result<(RegistryIndex, serde_json::Value), PixelMotionError> {
        let url = self.settings.index_url();
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            return Err(PixelMotionError::RegistryUnavailable {
                url,
                reason: format!("HTTP {}", response.status()),
            });
        }

        let document: serde_json::Value = match decode(response).await {
            Ok(document) => document,
            Err(reason) => return Err(PixelMotionError::RegistryUnavailable { url, reason }),
        };
        let index = serde_json::from_value(document.clone()).map_err(|e| {
            PixelMotionError::RegistryUnavailable {
                url,
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        Ok((index, document))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, PixelMotionError> {
        debug!("GET {}", url);
        self.http.get(url).send().await.map_err(|e| PixelMotionError::RegistryUnavailable {
            url: url.to_string(),
            reason: describe_transport_error(&e),
        })
    }

    fn cached(&self, name: &str) -> Option<RegistryComponent> {
        self.components.lock().ok().and_then(|cache| cache.get(name).cloned())
    }

    fn remember(&self, component: &RegistryComponent) {
        if let Ok(mut cache) = self.components.lock() {
            cache.insert(component.name.clone(), component.clone());
        }
    }
}

impl ComponentSource for RegistryClient {
    async fn fetch_component(&self, name: &str) -> Result<RegistryComponent, PixelMotionError> {
        if let Some(component) = self.cached(name) {
            debug!("Using already fetched payload for {}", name);
            return Ok(component);
        }

        let url = self.settings.component_url(name);
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            debug!("{} answered HTTP {}", url, response.status());
            return Err(PixelMotionError::ComponentNotFound {
                name: name.to_string(),
            });
        }

        let mut component: RegistryComponent =
            decode(response).await.map_err(|reason| PixelMotionError::InvalidComponent {
                name: name.to_string(),
                reason,
            })?;

        // The payload is keyed by the name it was requested under
        if component.name != name {
            debug!("Payload for {} declares name {}", name, component.name);
            component.name = name.to_string();
        }

        self.remember(&component);
        Ok(component)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
    let body = response.text().await.map_err(|e| describe_transport_error(&e))?;
    serde_json::from_str(&body).map_err(|e| format!("invalid JSON: {e}"))
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out after {} seconds", REGISTRY_REQUEST_TIMEOUT.as_secs())
    } else if error.is_connect() {
        format!("could not connect: {error}")
    } else {
        error.to_string()
    }
}
