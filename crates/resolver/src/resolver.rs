//! The [RpcResolver] entry point tying registry, selector and cache together.

use crate::{
    CacheKey, EndpointTemplateResolver, ResolutionCache, ResolverConfig, RpcError, RpcHosts,
    RpcSelector, TemplateExpander,
};
use chainrpc_primitives::{ChainKey, ChainMetadata, Environment, ResolvedEndpoint, Transport};
use chainrpc_registry::ChainRegistry;
use tracing::{trace, warn};

/// A single resolution request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RpcRequest {
    /// The chain, by id or slug.
    pub chain: ChainKey,
    /// Opaque identifier of the calling application.
    pub client_id: String,
    /// The deployment environment.
    pub environment: Environment,
    /// The transport the caller will use.
    pub transport: Transport,
}

impl RpcRequest {
    /// Creates a request accepting any transport.
    pub fn new(
        chain: impl Into<ChainKey>,
        client_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            chain: chain.into(),
            client_id: client_id.into(),
            environment,
            transport: Transport::Any,
        }
    }

    /// Restricts the request to `transport`.
    pub const fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }
}

/// Resolves chains to RPC endpoints against a [ChainRegistry].
///
/// Successful resolutions are memoized per chain id, client id, environment and transport for the
/// lifetime of the resolver. Failures are not cached.
#[derive(Debug)]
pub struct RpcResolver<'r, E = EndpointTemplateResolver> {
    registry: &'r ChainRegistry,
    selector: RpcSelector<E>,
    cache: ResolutionCache,
}

impl<'r> RpcResolver<'r> {
    /// Creates a resolver expanding templates with the API keys from `config`.
    pub fn new(registry: &'r ChainRegistry, config: ResolverConfig) -> Self {
        Self::with_expander(registry, EndpointTemplateResolver::new(config.api_keys), config.hosts)
    }
}

impl<'r, E: TemplateExpander> RpcResolver<'r, E> {
    /// Creates a resolver with a custom [TemplateExpander].
    pub fn with_expander(registry: &'r ChainRegistry, expander: E, hosts: RpcHosts) -> Self {
        Self { registry, selector: RpcSelector::new(expander, hosts), cache: ResolutionCache::new() }
    }

    /// Resolves `chain` to an endpoint URL for `client_id` in `environment`.
    pub fn resolve_rpc(
        &self,
        chain: &ChainKey,
        client_id: &str,
        environment: Environment,
    ) -> Result<String, RpcError> {
        let chain = self.lookup(chain)?;
        self.resolve_chain(chain, client_id, environment, Transport::Any)
            .map(ResolvedEndpoint::into_url)
    }

    /// Resolves a request to its preferred endpoint.
    pub fn resolve(&self, request: &RpcRequest) -> Result<ResolvedEndpoint, RpcError> {
        let chain = self.lookup(&request.chain)?;
        self.resolve_chain(chain, &request.client_id, request.environment, request.transport)
    }

    /// Returns every viable endpoint for a request in priority order. Not cached.
    pub fn candidates(&self, request: &RpcRequest) -> Result<Vec<ResolvedEndpoint>, RpcError> {
        let chain = self.lookup(&request.chain)?;
        let candidates = self.selector.candidates(
            chain,
            &request.client_id,
            request.environment,
            request.transport,
        );
        if candidates.is_empty() {
            return Err(RpcError::NoViableEndpoint { chain_id: chain.chain_id });
        }
        Ok(candidates)
    }

    /// Returns the registry this resolver reads from.
    pub const fn registry(&self) -> &'r ChainRegistry {
        self.registry
    }

    /// Returns the resolution cache.
    pub const fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Returns the selector.
    pub const fn selector(&self) -> &RpcSelector<E> {
        &self.selector
    }

    fn lookup(&self, key: &ChainKey) -> Result<&'r ChainMetadata, RpcError> {
        self.registry.get(key).ok_or_else(|| RpcError::ChainNotFound(key.clone()))
    }

    fn resolve_chain(
        &self,
        chain: &ChainMetadata,
        client_id: &str,
        environment: Environment,
        transport: Transport,
    ) -> Result<ResolvedEndpoint, RpcError> {
        let key = CacheKey {
            chain_id: chain.chain_id,
            client_id: client_id.to_string(),
            environment,
            transport,
        };
        if let Some(endpoint) = self.cache.get(&key) {
            trace!(target: "rpc_resolver", chain_id = chain.chain_id, client_id, "cache hit");
            return Ok(endpoint);
        }

        let Some(endpoint) = self.selector.select(chain, client_id, environment, transport) else {
            warn!(
                target: "rpc_resolver",
                chain_id = chain.chain_id,
                candidates = chain.rpc_candidates.len(),
                %environment,
                %transport,
                "No viable RPC endpoint"
            );
            return Err(RpcError::NoViableEndpoint { chain_id: chain.chain_id });
        };
        self.cache.put(key, endpoint.clone());
        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiKeys, TemplateError, template::has_placeholder};
    use chainrpc_primitives::{ChainOverride, NativeCurrency};
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls to the wrapped expander.
    #[derive(Debug, Default)]
    struct CountingExpander {
        inner: EndpointTemplateResolver,
        calls: AtomicUsize,
    }

    impl CountingExpander {
        fn new(api_keys: ApiKeys) -> Self {
            Self { inner: EndpointTemplateResolver::new(api_keys), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TemplateExpander for CountingExpander {
        fn expand(&self, template: &str, client_id: &str) -> Result<String, TemplateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.expand(template, client_id)
        }
    }

    fn chain(chain_id: u64, slug: &str, rpc: &[&str]) -> ChainMetadata {
        ChainMetadata {
            chain_id,
            slug: slug.to_string(),
            name: slug.to_string(),
            short_name: None,
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_candidates: rpc.iter().map(|s| s.to_string()).collect(),
            explorers: vec![],
            testnet: false,
            status: None,
            icon: None,
            info_url: None,
        }
    }

    fn all_keys() -> ApiKeys {
        ApiKeys {
            thirdweb: Some("tw".to_string()),
            infura: Some("infura".to_string()),
            alchemy: Some("alchemy".to_string()),
        }
    }

    fn config(api_keys: ApiKeys) -> ResolverConfig {
        ResolverConfig::default().with_api_keys(api_keys)
    }

    #[test]
    fn test_localhost_passthrough() {
        let registry = ChainRegistry::new([chain(1337, "localhost", &["http://localhost:8545"])], [])
            .unwrap();
        let resolver = RpcResolver::new(&registry, config(ApiKeys::default()));
        for environment in [Environment::Production, Environment::Preview] {
            assert_eq!(
                resolver.resolve_rpc(&ChainKey::Id(1337), "any-client", environment).unwrap(),
                "http://localhost:8545"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(all_keys()));
        for chain in registry.all() {
            let key = ChainKey::Id(chain.chain_id);
            let first = resolver.resolve_rpc(&key, "client", Environment::Preview);
            resolver.cache().clear();
            let second = resolver.resolve_rpc(&key, "client", Environment::Preview);
            assert_eq!(first, second);
        }
    }

    #[rstest]
    #[case::no_keys(ApiKeys::default())]
    #[case::thirdweb_only(ApiKeys { thirdweb: Some("tw".to_string()), ..Default::default() })]
    #[case::all_keys(all_keys())]
    fn test_no_leaking_placeholders(#[case] api_keys: ApiKeys) {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(api_keys));
        for chain in registry.all() {
            for environment in [Environment::Production, Environment::Preview] {
                let request = RpcRequest::new(chain.chain_id, "client", environment);
                if let Ok(url) = resolver.resolve_rpc(&request.chain, "client", environment) {
                    assert!(!has_placeholder(&url), "{url} leaks a placeholder");
                    assert!(!url.is_empty());
                }
                if let Ok(candidates) = resolver.candidates(&request) {
                    assert!(candidates.iter().all(|c| !has_placeholder(&c.url)));
                }
            }
        }
    }

    #[test]
    fn test_priority_skips_unavailable_key() {
        let registry = ChainRegistry::new(
            [chain(
                10,
                "optimism",
                &["https://optimism-mainnet.infura.io/v3/${INFURA_API_KEY}", "https://mainnet.optimism.io"],
            )],
            [],
        )
        .unwrap();
        let resolver = RpcResolver::new(&registry, config(ApiKeys::default()));
        let endpoint = resolver.resolve(&RpcRequest::new(10u64, "client", Environment::Production)).unwrap();
        assert_eq!(endpoint.url, "https://mainnet.optimism.io");
        assert_eq!(endpoint.source_template_index, 1);
    }

    #[test]
    fn test_override_rpc_is_resolved() {
        let overrides = ChainOverride {
            chain_id: 137,
            rpc_candidates: Some(vec!["https://u2.example".to_string()]),
            ..Default::default()
        };
        let registry =
            ChainRegistry::new([chain(137, "polygon", &["https://u1.example"])], [overrides]).unwrap();
        let resolver = RpcResolver::new(&registry, config(ApiKeys::default()));
        let candidates =
            resolver.candidates(&RpcRequest::new("polygon", "client", Environment::Production)).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://u2.example");
    }

    #[rstest]
    #[case::production(Environment::Production, "https://1.rpc.thirdweb.com/tw")]
    #[case::preview(Environment::Preview, "https://1.rpc.thirdweb-dev.com/tw")]
    fn test_environment_host_rewrite(#[case] environment: Environment, #[case] expected: &str) {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(all_keys()));
        assert_eq!(resolver.resolve_rpc(&ChainKey::Id(1), "client", environment).unwrap(), expected);
    }

    #[test]
    fn test_third_party_host_not_rewritten() {
        let registry = ChainRegistry::bundled().unwrap();
        let keys = ApiKeys { infura: Some("infura".to_string()), ..Default::default() };
        let resolver = RpcResolver::new(&registry, config(keys));
        assert_eq!(
            resolver.resolve_rpc(&"polygon".into(), "client", Environment::Preview).unwrap(),
            "https://polygon-mainnet.infura.io/v3/infura"
        );
    }

    #[test]
    fn test_empty_candidates_fail() {
        let registry = ChainRegistry::new([chain(5, "goerli", &[])], []).unwrap();
        let resolver = RpcResolver::new(&registry, config(all_keys()));
        assert_eq!(
            resolver.resolve_rpc(&ChainKey::Id(5), "client", Environment::Production),
            Err(RpcError::NoViableEndpoint { chain_id: 5 })
        );
        assert_eq!(
            resolver.candidates(&RpcRequest::new(5u64, "client", Environment::Production)),
            Err(RpcError::NoViableEndpoint { chain_id: 5 })
        );
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_polygon_without_third_party_keys_fails() {
        let registry = ChainRegistry::bundled().unwrap();
        let keys = ApiKeys { thirdweb: Some("tw".to_string()), ..Default::default() };
        let resolver = RpcResolver::new(&registry, config(keys));
        for environment in [Environment::Production, Environment::Preview] {
            assert_eq!(
                resolver.resolve_rpc(&ChainKey::Id(137), "client", environment),
                Err(RpcError::NoViableEndpoint { chain_id: 137 })
            );
        }
    }

    #[test]
    fn test_unknown_chain() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(all_keys()));
        assert_eq!(
            resolver.resolve_rpc(&ChainKey::Id(999_999_999), "client", Environment::Production),
            Err(RpcError::ChainNotFound(ChainKey::Id(999_999_999)))
        );
        assert_eq!(
            resolver.resolve_rpc(&"Ethereum".into(), "client", Environment::Production),
            Err(RpcError::ChainNotFound(ChainKey::Slug("Ethereum".to_string())))
        );
    }

    #[test]
    fn test_cache_skips_expansion() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::with_expander(
            &registry,
            CountingExpander::new(all_keys()),
            RpcHosts::default(),
        );

        let first = resolver.resolve_rpc(&ChainKey::Id(1), "client", Environment::Production).unwrap();
        let calls = resolver.selector().expander().calls();
        assert!(calls > 0);

        let second = resolver.resolve_rpc(&ChainKey::Id(1), "client", Environment::Production).unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.selector().expander().calls(), calls);

        // Slug and id lookups share the cache entry.
        resolver.resolve_rpc(&"ethereum".into(), "client", Environment::Production).unwrap();
        assert_eq!(resolver.selector().expander().calls(), calls);

        // A different client is a different key.
        resolver.resolve_rpc(&ChainKey::Id(1), "other", Environment::Production).unwrap();
        assert!(resolver.selector().expander().calls() > calls);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[test]
    fn test_select_stops_at_first_viable() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::with_expander(
            &registry,
            CountingExpander::new(all_keys()),
            RpcHosts::default(),
        );
        resolver.resolve_rpc(&ChainKey::Id(1), "client", Environment::Production).unwrap();
        assert_eq!(resolver.selector().expander().calls(), 1);
    }

    #[test]
    fn test_transport_request() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(ApiKeys::default()));
        let request = RpcRequest::new("hardhat", "client", Environment::Production)
            .with_transport(Transport::WebSocket);
        assert_eq!(resolver.resolve(&request).unwrap().url, "ws://127.0.0.1:8545");

        let request = RpcRequest::new("localhost", "client", Environment::Production)
            .with_transport(Transport::WebSocket);
        assert_eq!(resolver.resolve(&request), Err(RpcError::NoViableEndpoint { chain_id: 1337 }));
    }

    #[test]
    fn test_concurrent_resolution() {
        let registry = ChainRegistry::bundled().unwrap();
        let resolver = RpcResolver::new(&registry, config(all_keys()));
        let expected = resolver.resolve_rpc(&ChainKey::Id(8453), "client", Environment::Preview).unwrap();
        resolver.cache().clear();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        resolver.resolve_rpc(&ChainKey::Id(8453), "client", Environment::Preview)
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
        assert_eq!(resolver.cache().len(), 1);
    }
}
