//! An immutable registry of chain metadata, keyed by chain id and slug.
//!
//! The registry is built once from a base set of chain definitions plus a smaller set of override
//! records, and is read-only afterwards. [CHAINS] holds the registry built from the snapshot
//! bundled with this crate.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use alloy_primitives::map::{DefaultHashBuilder, HashMap};
pub use chainrpc_primitives::{ChainKey, ChainMetadata, ChainOverride};

mod error;
pub use error::RegistryError;

pub mod registry;
pub use registry::{BUNDLED_CHAINS, BUNDLED_OVERRIDES, ChainRegistry};

lazy_static::lazy_static! {
    /// Chain registry built from the bundled snapshot on first access.
    ///
    /// The snapshot is validated by this crate's tests; a snapshot that fails to load is an
    /// invariant violation and aborts on first access.
    pub static ref CHAINS: ChainRegistry = ChainRegistry::bundled()
        .unwrap_or_else(|err| panic!("bundled chain snapshot is invalid: {err}"));
}

/// Returns a [ChainMetadata] from [CHAINS] by chain id or slug.
pub fn chain_by_key(key: &ChainKey) -> Option<&'static ChainMetadata> {
    CHAINS.get(key)
}

/// Returns a [ChainMetadata] from [CHAINS] by its [alloy_chains::Chain].
pub fn chain_by_alloy_ident(chain: &alloy_chains::Chain) -> Option<&'static ChainMetadata> {
    CHAINS.get_by_alloy_chain(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_by_key() {
        assert_eq!(chain_by_key(&ChainKey::Slug("base".to_string())).unwrap().chain_id, 8453);
        assert_eq!(chain_by_key(&ChainKey::Id(10)).unwrap().slug, "optimism");
        assert!(chain_by_key(&ChainKey::Slug("Base".to_string())).is_none());
    }

    #[test]
    fn test_chain_by_alloy_ident() {
        let chain = chain_by_alloy_ident(&alloy_chains::Chain::mainnet()).unwrap();
        assert_eq!(chain.slug, "ethereum");
        assert!(chain_by_alloy_ident(&alloy_chains::Chain::from_id(999_999_999)).is_none());
    }
}
