//! Contains the [ChainRegistry] and its construction from chain-definition records.

use crate::{DefaultHashBuilder, HashMap, RegistryError};
use chainrpc_primitives::{ChainKey, ChainMetadata, ChainOverride};
use tracing::{debug, info};

/// Base chain definitions bundled with the crate.
pub const BUNDLED_CHAINS: &str = include_str!("../data/chains.json");

/// Override records applied on top of [BUNDLED_CHAINS].
pub const BUNDLED_OVERRIDES: &str = include_str!("../data/overrides.json");

/// An immutable index of [ChainMetadata] by chain id and by slug.
///
/// Records are stored in load order: base records first, in source order, followed by chains
/// that only exist as override records. Lookups are O(1) and never fail with an error; an unknown
/// identifier yields `None`.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: Vec<ChainMetadata>,
    by_id: HashMap<u64, usize, DefaultHashBuilder>,
    by_slug: HashMap<String, usize, DefaultHashBuilder>,
}

impl ChainRegistry {
    /// Builds a registry from base records and override records.
    ///
    /// Overrides are applied in iteration order with [ChainOverride::merge]; an override whose
    /// chain id has no base record adds a new chain. Fails on duplicate chain ids, duplicate
    /// slugs, empty slugs or names, and incomplete added records.
    pub fn new(
        base: impl IntoIterator<Item = ChainMetadata>,
        overrides: impl IntoIterator<Item = ChainOverride>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for chain in base {
            registry.insert(chain)?;
        }

        for record in overrides {
            match registry.by_id.get(&record.chain_id).copied() {
                Some(index) => {
                    debug!(target: "chain_registry", chain_id = record.chain_id, "applying override");
                    let merged = record.merge(registry.chains[index].clone());
                    registry.replace(index, merged)?;
                }
                None => {
                    debug!(target: "chain_registry", chain_id = record.chain_id, "adding chain from override");
                    registry.insert(record.into_metadata()?)?;
                }
            }
        }

        info!(target: "chain_registry", chains = registry.len(), "Built chain registry");
        Ok(registry)
    }

    /// Builds a registry from two JSON arrays: base records and override records.
    pub fn from_json(base: &str, overrides: &str) -> Result<Self, RegistryError> {
        let base: Vec<ChainMetadata> = serde_json::from_str(base)?;
        let overrides: Vec<ChainOverride> = serde_json::from_str(overrides)?;
        Self::new(base, overrides)
    }

    /// Builds a registry from the snapshot bundled with this crate.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_CHAINS, BUNDLED_OVERRIDES)
    }

    /// Returns the chain with the given chain id.
    pub fn get_by_chain_id(&self, chain_id: u64) -> Option<&ChainMetadata> {
        self.by_id.get(&chain_id).map(|&index| &self.chains[index])
    }

    /// Returns the chain with the given slug. The comparison is case-sensitive.
    pub fn get_by_slug(&self, slug: &str) -> Option<&ChainMetadata> {
        self.by_slug.get(slug).map(|&index| &self.chains[index])
    }

    /// Returns the chain identified by `key`.
    pub fn get(&self, key: &ChainKey) -> Option<&ChainMetadata> {
        match key {
            ChainKey::Id(id) => self.get_by_chain_id(*id),
            ChainKey::Slug(slug) => self.get_by_slug(slug),
        }
    }

    /// Returns the chain matching an [alloy_chains::Chain].
    pub fn get_by_alloy_chain(&self, chain: &alloy_chains::Chain) -> Option<&ChainMetadata> {
        self.get_by_chain_id(chain.id())
    }

    /// Returns `true` if `key` identifies a chain in the registry.
    pub fn contains(&self, key: &ChainKey) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over all chains in load order.
    pub fn all(&self) -> impl Iterator<Item = &ChainMetadata> + '_ {
        self.chains.iter()
    }

    /// Returns the number of chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` if the registry holds no chains.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn insert(&mut self, chain: ChainMetadata) -> Result<(), RegistryError> {
        validate(&chain)?;
        if self.by_id.contains_key(&chain.chain_id) {
            return Err(RegistryError::DuplicateChainId(chain.chain_id));
        }
        if let Some(&existing) = self.by_slug.get(&chain.slug) {
            return Err(RegistryError::DuplicateSlug {
                slug: chain.slug,
                first: self.chains[existing].chain_id,
                second: chain.chain_id,
            });
        }

        let index = self.chains.len();
        self.by_id.insert(chain.chain_id, index);
        self.by_slug.insert(chain.slug.clone(), index);
        self.chains.push(chain);
        Ok(())
    }

    /// Replaces the record at `index`, re-indexing its slug if the merge changed it.
    fn replace(&mut self, index: usize, chain: ChainMetadata) -> Result<(), RegistryError> {
        validate(&chain)?;
        let previous = &self.chains[index];
        if previous.slug != chain.slug {
            if let Some(&existing) = self.by_slug.get(&chain.slug) {
                return Err(RegistryError::DuplicateSlug {
                    slug: chain.slug,
                    first: self.chains[existing].chain_id,
                    second: chain.chain_id,
                });
            }
            self.by_slug.remove(&previous.slug);
            self.by_slug.insert(chain.slug.clone(), index);
        }
        self.chains[index] = chain;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ChainRegistry {
    type Item = &'a ChainMetadata;
    type IntoIter = std::slice::Iter<'a, ChainMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}

fn validate(chain: &ChainMetadata) -> Result<(), RegistryError> {
    let empty = |field| RegistryError::EmptyField { chain_id: chain.chain_id, field };
    if chain.slug.trim().is_empty() {
        return Err(empty("slug"));
    }
    if chain.name.trim().is_empty() {
        return Err(empty("name"));
    }
    Ok(())
}
