//! Chain metadata as published by the chain-definition source.

use alloc::{string::String, vec::Vec};
use core::fmt::Display;

/// Lifecycle status of a chain.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChainStatus {
    /// The chain is live.
    #[default]
    Active,
    /// The chain is launching and may be unstable.
    Incubating,
    /// The chain has been shut down or superseded.
    Deprecated,
}

impl Display for ChainStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Incubating => "incubating",
            Self::Deprecated => "deprecated",
        };
        f.write_str(s)
    }
}

/// The native gas currency of a chain.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeCurrency {
    /// Display name, e.g. `Ether`.
    pub name: String,
    /// Ticker symbol, e.g. `ETH`.
    pub symbol: String,
    /// Number of decimals of the smallest unit.
    pub decimals: u8,
}

/// A block explorer for a chain. Informational only.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explorer {
    /// Explorer name.
    pub name: String,
    /// Explorer base URL.
    pub url: String,
    /// URL scheme standard implemented by the explorer, e.g. `EIP3091`.
    pub standard: String,
}

/// A chain icon.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    /// Icon location, usually an `ipfs://` URI.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Image format, e.g. `png`.
    pub format: String,
}

/// One blockchain network.
///
/// Serialized with the camelCase keys of the chain-definition source. The candidate RPC URL
/// templates live under `rpc` and are ordered by preference: the first entry is tried first.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainMetadata {
    /// The EIP-155 chain id. Unique within a registry.
    pub chain_id: u64,
    /// Human readable unique key, compared case-sensitively.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Short name, e.g. `eth`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub short_name: Option<String>,
    /// The native currency.
    pub native_currency: NativeCurrency,
    /// Candidate RPC URL templates in preference order. May contain `${PLACEHOLDER}` tokens and
    /// may be empty.
    #[cfg_attr(feature = "serde", serde(rename = "rpc"))]
    pub rpc_candidates: Vec<String>,
    /// Block explorers.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub explorers: Vec<Explorer>,
    /// Whether this is a test network.
    #[cfg_attr(feature = "serde", serde(default))]
    pub testnet: bool,
    /// Lifecycle status, when the source reports one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<ChainStatus>,
    /// Chain icon.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub icon: Option<Icon>,
    /// Project homepage.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")
    )]
    pub info_url: Option<String>,
}

impl ChainMetadata {
    /// Returns `true` if the chain lists at least one RPC candidate.
    pub fn has_rpc(&self) -> bool {
        !self.rpc_candidates.is_empty()
    }

    /// Returns `true` if the chain is marked deprecated.
    pub const fn is_deprecated(&self) -> bool {
        matches!(self.status, Some(ChainStatus::Deprecated))
    }
}
