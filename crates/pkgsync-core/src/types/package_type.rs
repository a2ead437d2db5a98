//! Registry package ecosystems.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Package ecosystem accepted by the registry's `package_type` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Npm,
    Maven,
    Rubygems,
    Docker,
    Nuget,
    Container,
}

impl PackageType {
    /// Every package type, in the order a full sync visits them
    pub const ALL: [PackageType; 6] = [
        PackageType::Npm,
        PackageType::Maven,
        PackageType::Rubygems,
        PackageType::Docker,
        PackageType::Nuget,
        PackageType::Container,
    ];

    /// Wire name used in query strings and catalog properties
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Npm => "npm",
            PackageType::Maven => "maven",
            PackageType::Rubygems => "rubygems",
            PackageType::Docker => "docker",
            PackageType::Nuget => "nuget",
            PackageType::Container => "container",
        }
    }

    /// Parse a comma separated list such as `npm, container`
    pub fn parse_list(value: &str) -> Result<Vec<PackageType>, ParsePackageTypeError> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string names no known package type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePackageTypeError(pub String);

impl fmt::Display for ParsePackageTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown package type '{}' (expected one of npm, maven, rubygems, docker, nuget, container)",
            self.0
        )
    }
}

impl std::error::Error for ParsePackageTypeError {}

impl FromStr for PackageType {
    type Err = ParsePackageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePackageTypeError(s.to_string()))
    }
}
