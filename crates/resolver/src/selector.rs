//! Static-preference selection of RPC candidates with environment host rewriting.

use crate::{
    RpcHosts,
    template::{TemplateExpander, has_placeholder, placeholders},
};
use chainrpc_primitives::{ChainMetadata, Environment, ResolvedEndpoint, Transport};
use tracing::debug;
use url::Url;

/// Picks endpoints for a chain out of its ordered RPC candidates.
///
/// Declaration order is the priority order. Candidates that do not match the requested
/// [Transport] or cannot be expanded are skipped. Selection is deterministic: the same chain,
/// client id, environment and transport always yield the same endpoint.
#[derive(Debug, Clone)]
pub struct RpcSelector<E> {
    expander: E,
    hosts: RpcHosts,
}

impl<E: TemplateExpander> RpcSelector<E> {
    /// Creates a selector expanding templates with `expander` and rewriting first-party hosts
    /// according to `hosts`.
    pub const fn new(expander: E, hosts: RpcHosts) -> Self {
        Self { expander, hosts }
    }

    /// Returns the template expander.
    pub const fn expander(&self) -> &E {
        &self.expander
    }

    /// Returns the first viable endpoint, or `None` if no candidate can be used.
    ///
    /// Candidates after the first viable one are not expanded.
    pub fn select(
        &self,
        chain: &ChainMetadata,
        client_id: &str,
        environment: Environment,
        transport: Transport,
    ) -> Option<ResolvedEndpoint> {
        self.viable(chain, client_id, environment, transport).next()
    }

    /// Returns every viable endpoint in priority order.
    ///
    /// Callers that observe a network failure on one endpoint retry with the next.
    pub fn candidates(
        &self,
        chain: &ChainMetadata,
        client_id: &str,
        environment: Environment,
        transport: Transport,
    ) -> Vec<ResolvedEndpoint> {
        self.viable(chain, client_id, environment, transport).collect()
    }

    fn viable<'a>(
        &'a self,
        chain: &'a ChainMetadata,
        client_id: &'a str,
        environment: Environment,
        transport: Transport,
    ) -> impl Iterator<Item = ResolvedEndpoint> + 'a {
        let chain_id = chain.chain_id;
        chain
            .rpc_candidates
            .iter()
            .enumerate()
            .filter(move |(index, template)| {
                let accepted = transport.accepts(template);
                if !accepted {
                    debug!(target: "rpc_selector", chain_id, index, %transport, "skipping rpc candidate with other transport");
                }
                accepted
            })
            .filter_map(move |(index, template)| {
                let url = match self.expander.expand(template, client_id) {
                    Ok(url) => url,
                    Err(err) => {
                        let required: Vec<_> = placeholders(template).collect();
                        debug!(
                            target: "rpc_selector",
                            chain_id,
                            index,
                            client_id,
                            ?required,
                            %err,
                            "skipping rpc candidate"
                        );
                        return None;
                    }
                };
                if url.trim().is_empty() || has_placeholder(&url) {
                    debug!(target: "rpc_selector", chain_id, index, "discarding unusable expansion");
                    return None;
                }
                let url = self.rewrite_host(url, environment);
                Some(ResolvedEndpoint { url, chain_id, source_template_index: index })
            })
    }

    /// Routes a first-party production URL to the preview host outside production.
    ///
    /// Applies when the host equals the production RPC host or is a subdomain of it, with or
    /// without a trailing root dot. Only the host is replaced and the rest of the URL is kept
    /// verbatim, unless the host is written in a form `Url` normalizes (such as percent-encoding),
    /// in which case the URL is re-serialized.
    pub fn rewrite_host(&self, url: String, environment: Environment) -> String {
        if environment.is_production() {
            return url;
        }
        rewrite_host(&url, &self.hosts.production, &self.hosts.preview).unwrap_or(url)
    }
}

fn rewrite_host(url: &str, from: &str, to: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_owned();
    // a fully qualified host keeps its trailing dot
    let bare = host.strip_suffix('.').unwrap_or(&host);
    let prefix_len = if bare.eq_ignore_ascii_case(from) {
        0
    } else {
        let split = bare.len().checked_sub(from.len() + 1)?;
        let suffix = &bare[split..];
        if !suffix.starts_with('.') || !suffix[1..].eq_ignore_ascii_case(from) {
            return None;
        }
        split + 1
    };
    let new_host = format!("{}{to}{}", &host[..prefix_len], &host[bare.len()..]);

    // `Url` normalizes the host; splice it into the original string when it appears there
    // verbatim so the rest of the URL is kept byte for byte.
    if let Some(start) = locate_host(url, &host) {
        let end = start + host.len();
        return Some(format!("{}{new_host}{}", &url[..start], &url[end..]));
    }
    parsed.set_host(Some(&new_host)).ok()?;
    Some(parsed.into())
}

/// Returns the byte offset of `host` inside the authority of `url`, ignoring ASCII case.
fn locate_host(url: &str, host: &str) -> Option<usize> {
    let authority_start = url.find("://")? + 3;
    let authority_len =
        url[authority_start..].find(['/', '?', '#']).unwrap_or(url.len() - authority_start);
    let authority = &url[authority_start..authority_start + authority_len];
    let host_start = authority.rfind('@').map_or(0, |at| at + 1);
    let host_offset = authority[host_start..].to_ascii_lowercase().find(host)?;
    Some(authority_start + host_start + host_offset)
}
