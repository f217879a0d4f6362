use chainrpc_primitives::ChainKey;

/// A chain could not be resolved to an RPC endpoint.
///
/// Both variants are expected outcomes that callers surface to users rather than treat as bugs.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum RpcError {
    /// The identifier does not match any chain in the registry.
    #[error("unsupported network: chain {0} not found")]
    ChainNotFound(ChainKey),
    /// The chain exists but none of its RPC candidates can be used.
    #[error("no RPC configured for chain {chain_id}")]
    NoViableEndpoint {
        /// The chain without a usable endpoint.
        chain_id: u64,
    },
}
