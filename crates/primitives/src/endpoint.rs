//! The output of RPC resolution.

use alloc::string::String;
use core::fmt::Display;

/// A concrete, ready-to-use RPC endpoint.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResolvedEndpoint {
    /// Fully expanded URL. Never contains a `${...}` placeholder.
    pub url: String,
    /// The chain this endpoint serves.
    pub chain_id: u64,
    /// Index of the RPC candidate this endpoint was expanded from.
    pub source_template_index: usize,
}

impl ResolvedEndpoint {
    /// Returns the URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Consumes the endpoint, returning the URL.
    pub fn into_url(self) -> String {
        self.url
    }
}

impl Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.url)
    }
}
