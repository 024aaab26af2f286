//! Input model for a dependency under resolution
//!
//! These types are produced by a dependency-file parser and consumed
//! read-only by the resolution pipeline.

/// One dependency as it appears in a dependency file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name as published in the registry
    pub name: String,
    /// Currently locked or declared version, if any
    pub version: Option<String>,
    /// Requirement records, in dependency-file order
    pub requirements: Vec<DependencyRequirement>,
}

/// A single requirement record attached to a dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequirement {
    /// Constraint string, e.g. `">= 1.0, < 2.0"`
    pub requirement: Option<String>,
    /// Registry this requirement resolves against
    pub source: Option<SourceDescriptor>,
}

/// Declared source of a requirement
///
/// The two variants correspond to the two supported listing protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// Sparse registry addressed by an index base URL and a registry name
    ///
    /// Either field may be absent when the dependency file is
    /// misconfigured; the fetch fails fast in that case.
    Sparse {
        index_url: Option<String>,
        registry: Option<String>,
    },
    /// crates.io-style API, optionally with a custom download base
    Default { dl_base: Option<String> },
}

impl Dependency {
    pub fn new(
        name: impl Into<String>,
        version: Option<String>,
        requirements: Vec<DependencyRequirement>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            requirements,
        }
    }

    /// The authoritative source for this dependency
    ///
    /// First non-null source among the requirements; `None` when no
    /// requirement declares one.
    pub fn source(&self) -> Option<&SourceDescriptor> {
        self.requirements.iter().find_map(|r| r.source.as_ref())
    }
}
