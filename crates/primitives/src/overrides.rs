//! Override records and the field-by-field merge onto base chain definitions.

use crate::{ChainMetadata, ChainStatus, Explorer, Icon, NativeCurrency};
use alloc::{string::String, vec::Vec};

/// A partial [ChainMetadata] keyed by chain id.
///
/// Applied on top of a base record with [ChainOverride::merge]. An override whose chain id has no
/// base record adds a new chain, in which case it must be complete (see
/// [ChainOverride::into_metadata]).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainOverride {
    /// The chain id this record applies to.
    pub chain_id: u64,
    /// Replacement slug.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub slug: Option<String>,
    /// Replacement name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Replacement short name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub short_name: Option<String>,
    /// Replacement native currency.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub native_currency: Option<NativeCurrency>,
    /// Replacement RPC candidates. Replaces the base list wholesale.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "rpc", default, skip_serializing_if = "Option::is_none")
    )]
    pub rpc_candidates: Option<Vec<String>>,
    /// Replacement explorers. Replaces the base list wholesale.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub explorers: Option<Vec<Explorer>>,
    /// Replacement testnet flag.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub testnet: Option<bool>,
    /// Replacement status.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<ChainStatus>,
    /// Replacement icon.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub icon: Option<Icon>,
    /// Replacement homepage.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")
    )]
    pub info_url: Option<String>,
}

/// An override for a chain without a base record is missing a required field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("override for chain {chain_id} adds a new chain but is missing `{field}`")]
pub struct IncompleteOverride {
    /// The chain id of the offending record.
    pub chain_id: u64,
    /// The first missing required field.
    pub field: &'static str,
}

impl ChainOverride {
    /// Merges this override onto `base`.
    ///
    /// Every field present in the override replaces the base field of the same name and every
    /// absent field is inherited. List fields (`rpc`, `explorers`) are replaced as a whole and
    /// never concatenated. The chain id is the join key and is kept from `base`.
    pub fn merge(self, base: ChainMetadata) -> ChainMetadata {
        debug_assert_eq!(self.chain_id, base.chain_id, "override applied to the wrong chain");
        ChainMetadata {
            chain_id: base.chain_id,
            slug: self.slug.unwrap_or(base.slug),
            name: self.name.unwrap_or(base.name),
            short_name: self.short_name.or(base.short_name),
            native_currency: self.native_currency.unwrap_or(base.native_currency),
            rpc_candidates: self.rpc_candidates.unwrap_or(base.rpc_candidates),
            explorers: self.explorers.unwrap_or(base.explorers),
            testnet: self.testnet.unwrap_or(base.testnet),
            status: self.status.or(base.status),
            icon: self.icon.or(base.icon),
            info_url: self.info_url.or(base.info_url),
        }
    }

    /// Converts an override for an unknown chain into a full record.
    ///
    /// `slug`, `name`, `nativeCurrency` and `rpc` are required; everything else falls back to the
    /// same defaults a base record gets.
    pub fn into_metadata(self) -> Result<ChainMetadata, IncompleteOverride> {
        let chain_id = self.chain_id;
        let missing = |field| IncompleteOverride { chain_id, field };
        Ok(ChainMetadata {
            chain_id,
            slug: self.slug.ok_or_else(|| missing("slug"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            short_name: self.short_name,
            native_currency: self.native_currency.ok_or_else(|| missing("nativeCurrency"))?,
            rpc_candidates: self.rpc_candidates.ok_or_else(|| missing("rpc"))?,
            explorers: self.explorers.unwrap_or_default(),
            testnet: self.testnet.unwrap_or_default(),
            status: self.status,
            icon: self.icon,
            info_url: self.info_url,
        })
    }
}
