use chainrpc_primitives::IncompleteOverride;

/// An error building a [crate::ChainRegistry].
///
/// All of these are raised at construction; lookups never fail with an error.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two records share a chain id.
    #[error("duplicate chain id {0}")]
    DuplicateChainId(u64),
    /// Two records share a slug.
    #[error("duplicate slug `{slug}` on chains {first} and {second}")]
    DuplicateSlug {
        /// The shared slug.
        slug: String,
        /// Chain id of the record that claimed the slug first.
        first: u64,
        /// Chain id of the conflicting record.
        second: u64,
    },
    /// A required string field is empty.
    #[error("chain {chain_id} has an empty `{field}`")]
    EmptyField {
        /// The offending chain.
        chain_id: u64,
        /// The empty field.
        field: &'static str,
    },
    /// An override adds a chain but does not carry every required field.
    #[error(transparent)]
    IncompleteRecord(#[from] IncompleteOverride),
    /// The chain-definition source is not valid JSON of the expected shape.
    #[error("invalid chain data: {0}")]
    Json(#[from] serde_json::Error),
}
