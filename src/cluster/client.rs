//! Kubernetes API access
//!
//! Handlers see the cluster only through [`ClusterConnector`] and
//! [`ClusterApi`]. A connector hands out a fresh API handle per invocation;
//! nothing is pooled or cached between queries.

use crate::cluster::types::{Pod, PodList};
use crate::core::config::ClusterSettings;
use crate::core::error::{KubeAiError, Result};
use async_trait::async_trait;
use reqwest::{Certificate, Client, Url};
use std::sync::Arc;

/// Read access to cluster resources
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List pods in `namespace`, in server order
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
}

/// Produces cluster handles
pub trait ClusterConnector: Send + Sync {
    /// Build a handle for one invocation
    ///
    /// Fails with `Configuration` when credentials are unavailable.
    fn connect(&self) -> Result<Arc<dyn ClusterApi>>;
}

/// Connector backed by [`ClusterSettings`]
pub struct KubeConnector {
    settings: ClusterSettings,
}

impl KubeConnector {
    pub fn new(settings: ClusterSettings) -> Self {
        Self { settings }
    }
}

impl ClusterConnector for KubeConnector {
    fn connect(&self) -> Result<Arc<dyn ClusterApi>> {
        Ok(Arc::new(KubeClient::from_settings(&self.settings)?))
    }
}

/// Bearer-token client for the core/v1 REST API
pub struct KubeClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl KubeClient {
    pub fn from_settings(settings: &ClusterSettings) -> Result<Self> {
        let server = settings.api_server.as_deref().ok_or_else(|| {
            KubeAiError::Configuration(
                "No cluster API server configured (set KUBE_API_SERVER)".into(),
            )
        })?;
        let base_url = Url::parse(server).map_err(|e| {
            KubeAiError::Configuration(format!("Invalid API server URL {}: {}", server, e))
        })?;
        let token = resolve_token(settings)?;

        let mut builder = Client::builder();
        if let Some(ca_path) = &settings.ca_cert {
            let pem = std::fs::read(ca_path).map_err(|e| {
                KubeAiError::Configuration(format!(
                    "Failed to read CA bundle {}: {}",
                    ca_path.display(),
                    e
                ))
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                KubeAiError::Configuration(format!("Invalid CA bundle: {}", e))
            })?;
            builder = builder.add_root_certificate(cert);
        }
        if settings.insecure_skip_tls_verify {
            tracing::warn!("TLS verification disabled for {}", base_url);
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| KubeAiError::Configuration(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// `{server}/api/v1/namespaces/{namespace}/pods`, segments percent-encoded
    pub(crate) fn pods_url(&self, namespace: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                KubeAiError::Configuration(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "v1", "namespaces", namespace, "pods"]);
        Ok(url)
    }
}

#[async_trait]
impl ClusterApi for KubeClient {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        let url = self.pods_url(namespace)?;
        tracing::debug!(%url, "Listing pods");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| KubeAiError::Cluster(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(KubeAiError::Cluster(format!("({}) {}", status, reason)));
        }

        let list: PodList = response
            .json()
            .await
            .map_err(|e| KubeAiError::Cluster(format!("Undecodable pod list: {}", e)))?;
        Ok(list.items)
    }
}

fn resolve_token(settings: &ClusterSettings) -> Result<String> {
    if let Some(token) = settings.token.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }
    if let Some(path) = &settings.token_file {
        let token = std::fs::read_to_string(path).map_err(|e| {
            KubeAiError::Configuration(format!(
                "Failed to read token file {}: {}",
                path.display(),
                e
            ))
        })?;
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    Err(KubeAiError::Configuration(
        "No cluster credentials available (set KUBE_TOKEN or KUBE_TOKEN_FILE)".into(),
    ))
}
