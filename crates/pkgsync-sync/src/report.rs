//! Per-run outcome accounting

use pkgsync_core::PackageType;

/// Why a package was not upserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The versions endpoint answered with a non-success status
    VersionsRejected(u16),
    /// The package has no versions
    NoVersions,
}

/// What happened to one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageOutcome {
    Upserted,
    Skipped(SkipReason),
    /// The catalog rejected the upsert
    Rejected(u16),
}

/// How a package type's listing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOutcome {
    /// A short page ended the listing
    Completed,
    /// A page was rejected; packages on later pages were never seen
    Aborted { page: u32, status: u16 },
}

/// Results for one package type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReport {
    pub package_type: PackageType,
    pub listing: ListingOutcome,
    /// Pages retrieved successfully
    pub pages: u32,
    /// Entity identifier and outcome, in processing order
    pub packages: Vec<(String, PackageOutcome)>,
}

impl TypeReport {
    pub fn new(package_type: PackageType) -> Self {
        Self {
            package_type,
            listing: ListingOutcome::Completed,
            pages: 0,
            packages: Vec::new(),
        }
    }

    pub fn record(&mut self, identifier: String, outcome: PackageOutcome) {
        self.packages.push((identifier, outcome));
    }

    pub fn upserted(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Upserted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Skipped(_)))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Rejected(_)))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.listing, ListingOutcome::Aborted { .. })
    }

    fn count(&self, pred: impl Fn(&PackageOutcome) -> bool) -> usize {
        self.packages.iter().filter(|(_, outcome)| pred(outcome)).count()
    }
}

/// Results of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub package_types: Vec<TypeReport>,
}

impl SyncReport {
    pub fn upserted(&self) -> usize {
        self.package_types.iter().map(TypeReport::upserted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.package_types.iter().map(TypeReport::skipped).sum()
    }

    pub fn rejected(&self) -> usize {
        self.package_types.iter().map(TypeReport::rejected).sum()
    }

    /// Package types whose listing stopped on a rejected page
    pub fn aborted_types(&self) -> Vec<PackageType> {
        self.package_types
            .iter()
            .filter(|t| t.is_aborted())
            .map(|t| t.package_type)
            .collect()
    }

    /// Identifiers that were upserted, in order
    pub fn upserted_identifiers(&self) -> Vec<&str> {
        self.package_types
            .iter()
            .flat_map(|t| t.packages.iter())
            .filter(|(_, outcome)| matches!(outcome, PackageOutcome::Upserted))
            .map(|(identifier, _)| identifier.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut npm = TypeReport::new(PackageType::Npm);
        npm.record("1".to_string(), PackageOutcome::Upserted);
        npm.record("2".to_string(), PackageOutcome::Skipped(SkipReason::NoVersions));
        npm.record("3".to_string(), PackageOutcome::Rejected(500));
        npm.record("4".to_string(), PackageOutcome::Upserted);

        let mut maven = TypeReport::new(PackageType::Maven);
        maven.listing = ListingOutcome::Aborted { page: 1, status: 502 };

        let report = SyncReport {
            package_types: vec![npm, maven],
        };

        assert_eq!(report.upserted(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.aborted_types(), vec![PackageType::Maven]);
        assert_eq!(report.upserted_identifiers(), vec!["1", "4"]);
    }
}
