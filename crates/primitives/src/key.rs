//! Chain identifiers accepted by lookups.

use alloc::string::{String, ToString};
use core::{convert::Infallible, fmt::Display, str::FromStr};

/// Identifies a chain either by numeric id or by slug.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ChainKey {
    /// A numeric chain id.
    Id(u64),
    /// A chain slug.
    Slug(String),
}

impl ChainKey {
    /// Returns the chain id, if this key is numeric.
    pub const fn as_id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Slug(_) => None,
        }
    }
}

impl From<u64> for ChainKey {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChainKey {
    fn from(value: &str) -> Self {
        Self::Slug(value.to_string())
    }
}

impl From<String> for ChainKey {
    fn from(value: String) -> Self {
        Self::Slug(value)
    }
}

/// Parses user input: a string made only of ASCII digits that fits a `u64` is a chain id,
/// anything else is taken verbatim as a slug.
impl FromStr for ChainKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse() {
                return Ok(Self::Id(id));
            }
        }
        Ok(Self::Slug(s.to_string()))
    }
}

impl Display for ChainKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::id("137", ChainKey::Id(137))]
    #[case::slug("polygon", ChainKey::Slug("polygon".to_string()))]
    #[case::signed("+137", ChainKey::Slug("+137".to_string()))]
    #[case::hex("0x89", ChainKey::Slug("0x89".to_string()))]
    #[case::overflow("184467440737095516150", ChainKey::Slug("184467440737095516150".to_string()))]
    #[case::empty("", ChainKey::Slug(String::new()))]
    fn test_parse(#[case] input: &str, #[case] expected: ChainKey) {
        assert_eq!(input.parse::<ChainKey>().unwrap(), expected);
    }

    #[test]
    fn test_display_round_trips_input() {
        assert_eq!(ChainKey::Id(1337).to_string(), "1337");
        assert_eq!(ChainKey::from("base-sepolia-testnet").to_string(), "base-sepolia-testnet");
    }
}
