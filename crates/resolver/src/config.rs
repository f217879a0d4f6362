//! Resolver configuration: third-party API keys and first-party RPC hosts.

use crate::template::Placeholder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical production host of the first-party RPC proxy.
pub const PRODUCTION_RPC_HOST: &str = "rpc.thirdweb.com";

/// The host that serves first-party RPC traffic for non-production deployments.
pub const PREVIEW_RPC_HOST: &str = "rpc.thirdweb-dev.com";

/// API keys available for placeholder expansion.
///
/// Empty strings are treated the same as absent keys.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// Value for `${THIRDWEB_API_KEY}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thirdweb: Option<String>,
    /// Value for `${INFURA_API_KEY}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infura: Option<String>,
    /// Value for `${ALCHEMY_API_KEY}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alchemy: Option<String>,
}

impl ApiKeys {
    /// Reads every key from the environment variable named after its placeholder, e.g.
    /// `THIRDWEB_API_KEY`.
    pub fn from_env() -> Self {
        let read = |placeholder: Placeholder| {
            std::env::var(placeholder.name()).ok().filter(|value| !value.is_empty())
        };
        Self {
            thirdweb: read(Placeholder::ThirdwebApiKey),
            infura: read(Placeholder::InfuraApiKey),
            alchemy: read(Placeholder::AlchemyApiKey),
        }
    }

    /// Returns the configured value for `placeholder`, if any.
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        let value = match placeholder {
            Placeholder::ThirdwebApiKey => &self.thirdweb,
            Placeholder::InfuraApiKey => &self.infura,
            Placeholder::AlchemyApiKey => &self.alchemy,
        };
        value.as_deref().filter(|value| !value.is_empty())
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ApiKeys")
            .field("thirdweb", &redact(&self.thirdweb))
            .field("infura", &redact(&self.infura))
            .field("alchemy", &redact(&self.alchemy))
            .finish()
    }
}

/// First-party RPC hosts used for the environment host rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcHosts {
    /// Host that is rewritten in non-production environments, including its subdomains.
    pub production: String,
    /// Replacement host for non-production environments.
    pub preview: String,
}

impl Default for RpcHosts {
    fn default() -> Self {
        Self { production: PRODUCTION_RPC_HOST.to_string(), preview: PREVIEW_RPC_HOST.to_string() }
    }
}

/// Configuration for an [crate::RpcResolver].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Keys used to expand placeholders.
    pub api_keys: ApiKeys,
    /// Hosts used for the environment host rewrite.
    pub hosts: RpcHosts,
}

impl ResolverConfig {
    /// Builds a configuration with API keys read from the environment and the default hosts.
    pub fn from_env() -> Self {
        Self { api_keys: ApiKeys::from_env(), hosts: RpcHosts::default() }
    }

    /// Replaces the API keys.
    pub fn with_api_keys(mut self, api_keys: ApiKeys) -> Self {
        self.api_keys = api_keys;
        self
    }

    /// Replaces the RPC hosts.
    pub fn with_hosts(mut self, hosts: RpcHosts) -> Self {
        self.hosts = hosts;
        self
    }
}
