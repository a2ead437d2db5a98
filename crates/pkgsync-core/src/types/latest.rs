//! Rule for picking a package's latest version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the "latest" version is chosen from a package's version list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatestVersionPolicy {
    /// Trust the registry ordering: the first listed version is the latest
    #[default]
    First,
    /// Pick the version with the newest `created_at` timestamp
    Newest,
}

impl fmt::Display for LatestVersionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestVersionPolicy::First => f.write_str("first"),
            LatestVersionPolicy::Newest => f.write_str("newest"),
        }
    }
}

impl FromStr for LatestVersionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(LatestVersionPolicy::First),
            "newest" => Ok(LatestVersionPolicy::Newest),
            other => Err(format!("expected 'first' or 'newest', got '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("first".parse(), Ok(LatestVersionPolicy::First));
        assert_eq!(" Newest ".parse(), Ok(LatestVersionPolicy::Newest));
        assert!("oldest".parse::<LatestVersionPolicy>().is_err());
        assert_eq!(LatestVersionPolicy::default(), LatestVersionPolicy::First);
    }
}
