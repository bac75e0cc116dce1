//! Relay settings, sourced from the environment.

use std::env;

const DEFAULT_SERVICE_URL: &str = "https://comfyai.run";
const DEFAULT_WORKFLOW_ID: &str = "0e123dd8-3cd1-43e8-8257-e4b5a1b4de88";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Settings for the relay server and its upstream calls.
///
/// The bearer token deliberately has no default: it is a secret and must
/// come from the environment rather than the binary.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the hosted workflow service.
    pub service_url: String,
    /// Identifier of the predefined workflow graph to run.
    pub workflow_id: String,
    /// Bearer token for the hosted service. Empty when unset.
    pub access_token: String,
    /// Local bind address.
    pub host: String,
    /// Local bind port.
    pub port: u16,
}

impl RelayConfig {
    /// Read the configuration from the environment, falling back to the
    /// defaults above for everything but the token.
    pub fn from_env() -> Self {
        Self {
            service_url: env::var("COMFY_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            workflow_id: env::var("COMFY_WORKFLOW_ID")
                .unwrap_or_else(|_| DEFAULT_WORKFLOW_ID.to_string()),
            access_token: env::var("COMFY_ACCESS_TOKEN").unwrap_or_default(),
            host: env::var("BIND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("BIND_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
