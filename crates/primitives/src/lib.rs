//! Core types shared by the chain registry and the RPC resolver.
//!
//! A [ChainMetadata] describes one network as it appears in the chain-definition source, a
//! [ChainOverride] patches (or adds) a network by chain id, and a [ResolvedEndpoint] is the
//! output of resolving a chain to a concrete RPC URL.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

#[allow(unused_extern_crates)]
extern crate alloc;

mod chain;
pub use chain::{ChainMetadata, ChainStatus, Explorer, Icon, NativeCurrency};

mod overrides;
pub use overrides::{ChainOverride, IncompleteOverride};

mod key;
pub use key::ChainKey;

mod environment;
pub use environment::{Environment, ParseEnvironmentError, ParseTransportError, Transport};

mod endpoint;
pub use endpoint::ResolvedEndpoint;
