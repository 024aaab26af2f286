//! Candidate filtering stages for version resolution
//!
//! Stages run in a fixed order over an immutable snapshot of the listing;
//! each stage consumes its candidate set and returns a new one.

use crate::dependency::Dependency;
use crate::version::advisory::SecurityAdvisory;
use crate::version::error::ResolveError;
use crate::version::scheme::VersionScheme;

/// Whether resolution should consider prerelease versions
///
/// True when the current version is itself a prerelease, or when any
/// requirement constraint part (comma-split, trimmed) contains an
/// alphabetic character. The alphabetic check is a deliberately loose
/// signal for prerelease-qualified constraints like `1.0.0-beta`.
pub fn wants_prerelease<S: VersionScheme>(
    scheme: &S,
    dependency: &Dependency,
) -> Result<bool, ResolveError> {
    if let Some(current) = dependency.version.as_deref() {
        if scheme.is_prerelease(&scheme.parse_version(current)?) {
            return Ok(true);
        }
    }

    Ok(dependency
        .requirements
        .iter()
        .filter_map(|r| r.requirement.as_deref())
        .any(|constraint| {
            constraint
                .split(',')
                .map(str::trim)
                .any(|part| part.chars().any(char::is_alphabetic))
        }))
}

/// Drops prereleases unless the dependency wants them
pub fn filter_prerelease<S: VersionScheme>(
    scheme: &S,
    candidates: Vec<S::Version>,
    wants_prerelease: bool,
) -> Vec<S::Version> {
    if wants_prerelease {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|v| !scheme.is_prerelease(v))
        .collect()
}

/// Drops versions covered by any ignore requirement
pub fn filter_ignored<S: VersionScheme>(
    scheme: &S,
    candidates: Vec<S::Version>,
    ignored: &[S::Requirement],
) -> Vec<S::Version> {
    candidates
        .into_iter()
        .filter(|v| !ignored.iter().any(|req| scheme.matches(req, v)))
        .collect()
}

/// Drops versions any advisory marks vulnerable
pub fn filter_vulnerable<S: VersionScheme>(
    scheme: &S,
    candidates: Vec<S::Version>,
    advisories: &[SecurityAdvisory<S>],
) -> Vec<S::Version> {
    candidates
        .into_iter()
        .filter(|v| !advisories.iter().any(|a| a.vulnerable(scheme, v)))
        .collect()
}

/// Keeps only versions strictly greater than the bound
pub fn filter_lower_bound<S: VersionScheme>(
    candidates: Vec<S::Version>,
    bound: &S::Version,
) -> Vec<S::Version> {
    candidates.into_iter().filter(|v| v > bound).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::DependencyRequirement;
    use crate::version::scheme::CargoScheme;
    use rstest::rstest;
    use semver::Version;

    fn versions(raw: &[&str]) -> Vec<Version> {
        raw.iter()
            .map(|v| CargoScheme.parse_version(v).unwrap())
            .collect()
    }

    fn dependency(version: Option<&str>, constraints: &[&str]) -> Dependency {
        Dependency::new(
            "demo",
            version.map(|v| v.to_string()),
            constraints
                .iter()
                .map(|c| DependencyRequirement {
                    requirement: Some(c.to_string()),
                    source: None,
                })
                .collect(),
        )
    }

    #[rstest]
    #[case(Some("1.0.0"), &["^1.0.0"], false)]
    #[case(Some("1.0.0-beta.1"), &["^1.0.0"], true)] // current is prerelease
    #[case(Some("1.0.0"), &["1.0.0-alpha"], true)] // alphabetic constraint part
    #[case(None, &[">= 1.0, < 2.0"], false)]
    #[case(None, &[">= 1.0, < 2.0-rc1"], true)]
    #[case(None, &[], false)]
    fn wants_prerelease_applies_heuristic(
        #[case] current: Option<&str>,
        #[case] constraints: &[&str],
        #[case] expected: bool,
    ) {
        let dependency = dependency(current, constraints);

        assert_eq!(
            wants_prerelease(&CargoScheme, &dependency).unwrap(),
            expected
        );
    }

    #[test]
    fn wants_prerelease_rejects_malformed_current_version() {
        let dependency = dependency(Some("not-a-version"), &[]);

        let result = wants_prerelease(&CargoScheme, &dependency);

        assert!(matches!(result, Err(ResolveError::InvalidVersion(_))));
    }

    #[test]
    fn filter_prerelease_drops_prereleases_when_unwanted() {
        let candidates = versions(&["1.0.0", "1.1.0-beta.1", "1.1.0"]);

        let filtered = filter_prerelease(&CargoScheme, candidates, false);

        assert_eq!(filtered, versions(&["1.0.0", "1.1.0"]));
    }

    #[test]
    fn filter_prerelease_keeps_everything_when_wanted() {
        let candidates = versions(&["1.0.0", "1.1.0-beta.1"]);

        let filtered = filter_prerelease(&CargoScheme, candidates.clone(), true);

        assert_eq!(filtered, candidates);
    }

    #[test]
    fn filter_ignored_drops_covered_versions() {
        let candidates = versions(&["1.0.0", "1.1.0", "2.0.0"]);
        let ignored = vec![CargoScheme.parse_requirement(">= 1.1.0, < 2.0.0").unwrap()];

        let filtered = filter_ignored(&CargoScheme, candidates, &ignored);

        assert_eq!(filtered, versions(&["1.0.0", "2.0.0"]));
    }

    #[test]
    fn filter_vulnerable_drops_versions_any_advisory_flags() {
        let candidates = versions(&["1.0.1", "1.1.0", "1.2.0"]);
        let advisories =
            vec![SecurityAdvisory::new(&CargoScheme, &[">= 1.0.1, < 1.2.0"]).unwrap()];

        let filtered = filter_vulnerable(&CargoScheme, candidates, &advisories);

        assert_eq!(filtered, versions(&["1.2.0"]));
    }

    #[test]
    fn filter_lower_bound_is_strict() {
        let candidates = versions(&["1.0.0", "1.0.1", "1.1.0"]);
        let bound = CargoScheme.parse_version("1.0.1").unwrap();

        let filtered = filter_lower_bound::<CargoScheme>(candidates, &bound);

        assert_eq!(filtered, versions(&["1.1.0"]));
    }
}
