//! Version scheme abstraction for different package managers

use std::fmt::Display;

use semver::{Version, VersionReq};

use crate::version::error::ResolveError;

/// Kind of package manager a version scheme serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// Cargo (crates.io and compatible registries)
    Cargo,
}

impl PackageManager {
    /// Returns the string representation of the package manager kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Cargo => "cargo",
        }
    }
}

/// Trait for package-manager-specific version grammar
///
/// The resolution pipeline never parses version strings itself; parsing,
/// ordering and range matching are delegated to the scheme selected for
/// the package manager kind. Requirements are parsed from constraint
/// strings whose comma-separated parts form one combined range.
pub trait VersionScheme: Send + Sync {
    /// Totally ordered version type
    type Version: Clone + Ord + Display;
    /// Parsed requirement matched against versions
    type Requirement: Clone;

    /// Returns the package manager kind this scheme handles
    fn package_manager(&self) -> PackageManager;

    /// Parse a version string
    fn parse_version(&self, raw: &str) -> Result<Self::Version, ResolveError>;

    /// Parse a constraint string into one requirement
    fn parse_requirement(&self, raw: &str) -> Result<Self::Requirement, ResolveError>;

    /// Whether the version is flagged prerelease by the scheme
    fn is_prerelease(&self, version: &Self::Version) -> bool;

    /// Whether the version satisfies the requirement
    fn matches(&self, requirement: &Self::Requirement, version: &Self::Version) -> bool;
}

/// Semver-backed scheme for cargo registries
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoScheme;

impl VersionScheme for CargoScheme {
    type Version = Version;
    type Requirement = VersionReq;

    fn package_manager(&self) -> PackageManager {
        PackageManager::Cargo
    }

    fn parse_version(&self, raw: &str) -> Result<Version, ResolveError> {
        Version::parse(raw).map_err(|_| ResolveError::InvalidVersion(raw.to_string()))
    }

    fn parse_requirement(&self, raw: &str) -> Result<VersionReq, ResolveError> {
        VersionReq::parse(raw).map_err(|_| ResolveError::InvalidRequirement(raw.to_string()))
    }

    fn is_prerelease(&self, version: &Version) -> bool {
        !version.pre.is_empty()
    }

    fn matches(&self, requirement: &VersionReq, version: &Version) -> bool {
        requirement.matches(version)
    }
}
