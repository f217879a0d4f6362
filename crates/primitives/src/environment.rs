//! Deployment environment and transport selectors.

use alloc::string::String;
use core::{fmt::Display, str::FromStr};

/// The deployment environment a caller runs in.
///
/// Non-production deployments route first-party RPC traffic to the preview RPC host.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Environment {
    /// Production deployment.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "prod"))]
    Production,
    /// Preview, development or staging deployment.
    #[cfg_attr(feature = "serde", serde(alias = "dev", alias = "development", alias = "staging"))]
    Preview,
}

impl Environment {
    /// Returns `true` for [Environment::Production].
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// An environment string was not recognized.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown environment `{0}`, expected one of: production, prod, preview, dev, development, staging")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["production", "prod"].iter().any(|v| s.eq_ignore_ascii_case(v)) {
            Ok(Self::Production)
        } else if ["preview", "dev", "development", "staging"].iter().any(|v| s.eq_ignore_ascii_case(v))
        {
            Ok(Self::Preview)
        } else {
            Err(ParseEnvironmentError(s.into()))
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Preview => "preview",
        })
    }
}

/// The transport a caller intends to use against the resolved endpoint.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Transport {
    /// Any scheme.
    #[default]
    Any,
    /// `http://` or `https://` only.
    Http,
    /// `ws://` or `wss://` only.
    #[cfg_attr(feature = "serde", serde(alias = "ws"))]
    WebSocket,
}

impl Transport {
    /// Returns `true` if the scheme of `url` is usable with this transport.
    ///
    /// Templates are checked before expansion, so only the text before `://` is inspected.
    pub fn accepts(&self, url: &str) -> bool {
        let Some((scheme, _)) = url.split_once("://") else {
            return matches!(self, Self::Any);
        };
        match self {
            Self::Any => true,
            Self::Http => scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"),
            Self::WebSocket => scheme.eq_ignore_ascii_case("ws") || scheme.eq_ignore_ascii_case("wss"),
        }
    }
}

/// A transport string was not recognized.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown transport `{0}`, expected one of: any, http, ws")]
pub struct ParseTransportError(pub String);

impl FromStr for Transport {
    type Err = ParseTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "http" | "https" => Ok(Self::Http),
            "ws" | "wss" | "websocket" => Ok(Self::WebSocket),
            _ => Err(ParseTransportError(s.into())),
        }
    }
}

impl Display for Transport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::Http => "http",
            Self::WebSocket => "ws",
        })
    }
}
