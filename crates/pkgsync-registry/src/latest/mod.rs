//! Latest-version selection

use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset};
use pkgsync_core::LatestVersionPolicy;

use crate::api::PackageVersion;

/// Pick the latest version from a registry version list.
///
/// `First` takes index 0 as listed by the registry. `Newest` compares
/// RFC 3339 `created_at` values; unparsable timestamps rank below every
/// parsable one and ties go to the earlier listed entry.
pub fn select_latest(versions: Vec<PackageVersion>, policy: LatestVersionPolicy) -> Option<PackageVersion> {
    match policy {
        LatestVersionPolicy::First => versions.into_iter().next(),
        LatestVersionPolicy::Newest => versions
            .into_iter()
            .enumerate()
            .max_by_key(|(index, version)| (parse_timestamp(&version.created_at), Reverse(*index)))
            .map(|(_, version)| version),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str, created_at: &str) -> PackageVersion {
        PackageVersion {
            name: name.to_string(),
            html_url: format!("https://example.com/{}", name),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_first_uses_registry_order() {
        let versions = vec![
            version("1.0.0", "2024-01-01T00:00:00Z"),
            version("2.0.0", "2024-06-01T00:00:00Z"),
        ];
        let latest = select_latest(versions, LatestVersionPolicy::First).unwrap();
        assert_eq!(latest.name, "1.0.0");
    }

    #[test]
    fn test_newest_by_timestamp() {
        let versions = vec![
            version("1.0.0", "2024-01-01T00:00:00Z"),
            version("2.0.0", "2024-06-01T10:00:00+02:00"),
            version("1.5.0", "2024-03-01T00:00:00Z"),
        ];
        let latest = select_latest(versions, LatestVersionPolicy::Newest).unwrap();
        assert_eq!(latest.name, "2.0.0");
    }

    #[test]
    fn test_newest_ranks_unparsable_last_and_keeps_order_on_ties() {
        let versions = vec![
            version("garbage", "yesterday"),
            version("a", "2024-01-01T00:00:00Z"),
            version("b", "2024-01-01T00:00:00Z"),
        ];
        let latest = select_latest(versions, LatestVersionPolicy::Newest).unwrap();
        assert_eq!(latest.name, "a");

        let only_garbage = vec![version("x", "?"), version("y", "?")];
        let latest = select_latest(only_garbage, LatestVersionPolicy::Newest).unwrap();
        assert_eq!(latest.name, "x");
    }

    #[test]
    fn test_empty_list() {
        assert!(select_latest(Vec::new(), LatestVersionPolicy::First).is_none());
        assert!(select_latest(Vec::new(), LatestVersionPolicy::Newest).is_none());
    }
}
