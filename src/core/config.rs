//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then (for the cluster only) the in-cluster service
//! account. Credentials are not required to be present here; a collaborator
//! that needs a missing credential reports it when it is constructed.

use crate::core::error::{KubeAiError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Service account token mounted into every pod
pub const IN_CLUSTER_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Service account CA bundle mounted into every pod
pub const IN_CLUSTER_CA_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmSettings,
    pub cluster: ClusterSettings,
}

/// Language collaborator settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Endpoint URL
    ///
    /// URLs on anthropic.com speak the Anthropic messages format; anything
    /// else is treated as OpenAI-compatible (OpenAI, DeepSeek, local servers).
    pub api_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// API key; usually supplied through `LLM_API_KEY` rather than the file
    pub api_key: Option<String>,

    /// Upper bound on generated tokens per request
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-3-haiku-20240307".into(),
            api_key: None,
            max_tokens: 4096,
        }
    }
}

/// Cluster collaborator settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// API server base URL, e.g. `https://10.0.0.1:6443`
    pub api_server: Option<String>,

    /// Bearer token; takes precedence over `token_file`
    pub token: Option<String>,

    /// File holding the bearer token, read on every connect
    pub token_file: Option<PathBuf>,

    /// PEM bundle used to verify the API server
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification entirely (test clusters only)
    pub insecure_skip_tls_verify: bool,
}

impl AppConfig {
    /// Build the effective configuration
    ///
    /// `path` is an optional TOML file; environment variables override it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_in_cluster_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KubeAiError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| KubeAiError::Configuration(format!("Invalid config: {}", e)))
    }

    /// Override settings from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("LLM_API_URL") {
            self.llm.api_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(server) = lookup("KUBE_API_SERVER") {
            self.cluster.api_server = Some(server);
        }
        if let Some(token) = lookup("KUBE_TOKEN") {
            self.cluster.token = Some(token);
        }
        if let Some(file) = lookup("KUBE_TOKEN_FILE") {
            self.cluster.token_file = Some(PathBuf::from(file));
        }

        // In-cluster service discovery
        if self.cluster.api_server.is_none() {
            if let (Some(host), Some(port)) = (
                lookup("KUBERNETES_SERVICE_HOST"),
                lookup("KUBERNETES_SERVICE_PORT"),
            ) {
                self.cluster.api_server = Some(format!("https://{}:{}", host, port));
            }
        }
    }

    fn apply_in_cluster_defaults(&mut self) {
        let cluster = &mut self.cluster;
        if cluster.token.is_none() && cluster.token_file.is_none() {
            let token_path = Path::new(IN_CLUSTER_TOKEN_PATH);
            if token_path.exists() {
                cluster.token_file = Some(token_path.to_path_buf());
            }
        }
        if cluster.ca_cert.is_none() {
            let ca_path = Path::new(IN_CLUSTER_CA_PATH);
            if ca_path.exists() {
                cluster.ca_cert = Some(ca_path.to_path_buf());
            }
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_url.trim().is_empty() {
            return Err(KubeAiError::Configuration("llm.api_url is empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(KubeAiError::Configuration("llm.model is empty".into()));
        }
        if self.llm.max_tokens == 0 {
            return Err(KubeAiError::Configuration(
                "llm.max_tokens must be positive".into(),
            ));
        }
        if let Some(server) = &self.cluster.api_server {
            if !(server.starts_with("https://") || server.starts_with("http://")) {
                return Err(KubeAiError::Configuration(format!(
                    "cluster.api_server ({}) must be an http(s) URL",
                    server
                )));
            }
        }
        Ok(())
    }
}
