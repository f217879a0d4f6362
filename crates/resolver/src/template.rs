//! Expansion of `${PLACEHOLDER}` tokens in RPC URL templates.

use crate::ApiKeys;
use auto_impl::auto_impl;
use std::fmt::Display;

/// A placeholder recognized in RPC URL templates.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Placeholder {
    /// `${THIRDWEB_API_KEY}`, the first-party RPC key.
    ThirdwebApiKey,
    /// `${INFURA_API_KEY}`.
    InfuraApiKey,
    /// `${ALCHEMY_API_KEY}`.
    AlchemyApiKey,
}

impl Placeholder {
    /// All recognized placeholders.
    pub const ALL: [Self; 3] = [Self::ThirdwebApiKey, Self::InfuraApiKey, Self::AlchemyApiKey];

    /// The token name between `${` and `}`. Also the environment variable the value is read from.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ThirdwebApiKey => "THIRDWEB_API_KEY",
            Self::InfuraApiKey => "INFURA_API_KEY",
            Self::AlchemyApiKey => "ALCHEMY_API_KEY",
        }
    }

    /// Looks up a placeholder by token name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|placeholder| placeholder.name() == name)
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${{{}}}", self.name())
    }
}

/// Why a template could not be expanded. Every variant makes the candidate non-viable.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TemplateError {
    /// The placeholder is recognized but no value is configured for it.
    #[error("no value configured for {0}")]
    MissingKey(Placeholder),
    /// The template uses a placeholder outside the recognized set.
    #[error("unrecognized placeholder `${{{0}}}`")]
    Unrecognized(String),
    /// A `${` is never closed.
    #[error("unterminated placeholder in `{0}`")]
    Unterminated(String),
}

/// Expands an RPC URL template into a concrete URL.
#[auto_impl(&, Box, Arc)]
pub trait TemplateExpander {
    /// Expands every placeholder in `template`.
    ///
    /// `client_id` identifies the caller and is only used for diagnostics; it is never
    /// substituted into the URL.
    fn expand(&self, template: &str, client_id: &str) -> Result<String, TemplateError>;
}

/// The [TemplateExpander] backed by configured [ApiKeys].
#[derive(Debug, Clone, Default)]
pub struct EndpointTemplateResolver {
    api_keys: ApiKeys,
}

impl EndpointTemplateResolver {
    /// Creates a resolver that substitutes values from `api_keys`.
    pub const fn new(api_keys: ApiKeys) -> Self {
        Self { api_keys }
    }

    /// Returns the configured keys.
    pub const fn api_keys(&self) -> &ApiKeys {
        &self.api_keys
    }
}

impl TemplateExpander for EndpointTemplateResolver {
    fn expand(&self, template: &str, client_id: &str) -> Result<String, TemplateError> {
        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let token = &rest[start + 2..];
            let end =
                token.find('}').ok_or_else(|| TemplateError::Unterminated(template.to_string()))?;
            let name = &token[..end];
            let placeholder = Placeholder::from_name(name)
                .ok_or_else(|| TemplateError::Unrecognized(name.to_string()))?;
            let value = self.api_keys.get(placeholder).ok_or(TemplateError::MissingKey(placeholder))?;
            tracing::trace!(target: "rpc_template", %placeholder, client_id, "substituting placeholder");
            expanded.push_str(value);
            rest = &token[end + 1..];
        }
        expanded.push_str(rest);
        Ok(expanded)
    }
}

/// Iterates over the placeholder names in `template`, recognized or not.
///
/// Iteration stops at an unterminated `${`.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    let mut rest = template;
    std::iter::from_fn(move || {
        let start = rest.find("${")?;
        let token = &rest[start + 2..];
        let end = token.find('}')?;
        rest = &token[end + 1..];
        Some(&token[..end])
    })
}

/// Returns `true` if `url` still contains a placeholder opening.
pub fn has_placeholder(url: &str) -> bool {
    url.contains("${")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolver() -> EndpointTemplateResolver {
        EndpointTemplateResolver::new(ApiKeys {
            thirdweb: Some("tw-key".to_string()),
            infura: Some("infura-key".to_string()),
            alchemy: None,
        })
    }

    #[rstest]
    #[case::thirdweb(
        "https://137.rpc.thirdweb.com/${THIRDWEB_API_KEY}",
        "https://137.rpc.thirdweb.com/tw-key"
    )]
    #[case::infura("https://mainnet.infura.io/v3/${INFURA_API_KEY}", "https://mainnet.infura.io/v3/infura-key")]
    #[case::twice("https://a/${INFURA_API_KEY}?k=${INFURA_API_KEY}", "https://a/infura-key?k=infura-key")]
    #[case::localhost("http://localhost:8545", "http://localhost:8545")]
    #[case::websocket("wss://forno.celo.org/ws", "wss://forno.celo.org/ws")]
    #[case::lone_dollar("https://rpc.example.org/$path", "https://rpc.example.org/$path")]
    fn test_expand(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(resolver().expand(template, "client").unwrap(), expected);
    }

    #[rstest]
    #[case::missing_key(
        "https://eth-mainnet.g.alchemy.com/v2/${ALCHEMY_API_KEY}",
        TemplateError::MissingKey(Placeholder::AlchemyApiKey)
    )]
    #[case::unrecognized(
        "https://rpc.ankr.com/eth/${ANKR_API_KEY}",
        TemplateError::Unrecognized("ANKR_API_KEY".to_string())
    )]
    #[case::empty_name("https://rpc.example.org/${}", TemplateError::Unrecognized(String::new()))]
    #[case::unterminated(
        "https://rpc.example.org/${INFURA_API_KEY",
        TemplateError::Unterminated("https://rpc.example.org/${INFURA_API_KEY".to_string())
    )]
    fn test_expand_non_viable(#[case] template: &str, #[case] expected: TemplateError) {
        assert_eq!(resolver().expand(template, "client").unwrap_err(), expected);
    }

    #[test]
    fn test_client_id_is_never_substituted() {
        let resolver = EndpointTemplateResolver::default();
        assert_eq!(
            resolver.expand("https://1.rpc.thirdweb.com/${THIRDWEB_API_KEY}", "my-client-id"),
            Err(TemplateError::MissingKey(Placeholder::ThirdwebApiKey))
        );
    }

    #[test]
    fn test_placeholders() {
        let names: Vec<_> =
            placeholders("https://a/${INFURA_API_KEY}/${FOO}/${ALCHEMY_API_KEY").collect();
        assert_eq!(names, vec!["INFURA_API_KEY", "FOO"]);
        assert_eq!(placeholders("http://localhost:8545").count(), 0);
    }

    #[test]
    fn test_placeholder_names_round_trip() {
        for placeholder in Placeholder::ALL {
            assert_eq!(Placeholder::from_name(placeholder.name()), Some(placeholder));
        }
        assert_eq!(Placeholder::InfuraApiKey.to_string(), "${INFURA_API_KEY}");
    }
}
