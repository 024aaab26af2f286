//! Security advisory model

use crate::version::error::ResolveError;
use crate::version::scheme::VersionScheme;

/// A security advisory affecting one dependency
///
/// Carries the set of vulnerable ranges; a version is vulnerable when any
/// of them covers it.
#[derive(Debug, Clone)]
pub struct SecurityAdvisory<S: VersionScheme> {
    vulnerable_ranges: Vec<S::Requirement>,
}

impl<S: VersionScheme> SecurityAdvisory<S> {
    /// Parse raw range strings through the scheme
    pub fn new(scheme: &S, ranges: &[&str]) -> Result<Self, ResolveError> {
        let vulnerable_ranges = ranges
            .iter()
            .map(|raw| scheme.parse_requirement(raw))
            .collect::<Result<_, _>>()?;
        Ok(Self { vulnerable_ranges })
    }

    /// Build from already-parsed requirements
    pub fn from_requirements(vulnerable_ranges: Vec<S::Requirement>) -> Self {
        Self { vulnerable_ranges }
    }

    /// Whether any vulnerable range covers the version
    pub fn vulnerable(&self, scheme: &S, version: &S::Version) -> bool {
        self.vulnerable_ranges
            .iter()
            .any(|range| scheme.matches(range, version))
    }
}
