//! Resolution of chains to ready-to-use RPC endpoints.
//!
//! A chain's RPC candidates are tried in declared order. Each candidate is expanded by a
//! [TemplateExpander]; candidates needing an unconfigured key are skipped. The first viable URL
//! is routed to the preview RPC host outside production and memoized in a [ResolutionCache].
//!
//! ```no_run
//! use chainrpc_resolver::{Environment, resolve_rpc};
//!
//! let url = resolve_rpc(137, "my-client-id", Environment::Production)?;
//! # Ok::<(), chainrpc_resolver::RpcError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use chainrpc_primitives::{ChainKey, Environment, ResolvedEndpoint, Transport};
use chainrpc_registry::CHAINS;

mod config;
pub use config::{ApiKeys, PREVIEW_RPC_HOST, PRODUCTION_RPC_HOST, ResolverConfig, RpcHosts};

mod error;
pub use error::RpcError;

pub mod template;
pub use template::{EndpointTemplateResolver, Placeholder, TemplateError, TemplateExpander};

mod selector;
pub use selector::RpcSelector;

mod cache;
pub use cache::{CacheKey, ResolutionCache};

mod resolver;
pub use resolver::{RpcRequest, RpcResolver};

lazy_static::lazy_static! {
    /// Resolver over [CHAINS] configured from the process environment on first use.
    static ref RESOLVER: RpcResolver<'static> = RpcResolver::new(&CHAINS, ResolverConfig::from_env());
}

/// Resolves `chain` against the bundled registry using API keys from the environment.
pub fn resolve_rpc(
    chain: impl Into<ChainKey>,
    client_id: &str,
    environment: Environment,
) -> Result<String, RpcError> {
    RESOLVER.resolve_rpc(&chain.into(), client_id, environment)
}

/// Resolves a request against the bundled registry using API keys from the environment.
pub fn resolve(request: &RpcRequest) -> Result<ResolvedEndpoint, RpcError> {
    RESOLVER.resolve(request)
}
