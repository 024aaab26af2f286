//! Version resolution pipeline for a single dependency

use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::config::TransportConfig;
use crate::dependency::Dependency;
use crate::version::advisory::SecurityAdvisory;
use crate::version::error::ResolveError;
use crate::version::filter;
use crate::version::registry::RegistryClient;
use crate::version::scheme::{CargoScheme, VersionScheme};

/// Resolves the acceptable update targets for one dependency
///
/// One instance serves one dependency. The registry listing is fetched at
/// most once and reused by both public operations; all state is owned by
/// the instance and never shared. Callers resolving many dependencies
/// concurrently create one resolver per dependency.
pub struct VersionResolver<S: VersionScheme = CargoScheme> {
    scheme: S,
    dependency: Dependency,
    ignored_versions: Vec<String>,
    security_advisories: Vec<SecurityAdvisory<S>>,
    client: RegistryClient,
    listing: OnceCell<Vec<S::Version>>,
}

impl VersionResolver<CargoScheme> {
    /// Creates a resolver for a cargo dependency with default transport
    pub fn new(
        dependency: Dependency,
        ignored_versions: Vec<String>,
        security_advisories: Vec<SecurityAdvisory<CargoScheme>>,
    ) -> Self {
        Self::with_scheme(
            CargoScheme,
            dependency,
            ignored_versions,
            security_advisories,
            &TransportConfig::default(),
        )
    }
}

impl<S: VersionScheme> VersionResolver<S> {
    /// Creates a resolver with an explicit scheme and transport config
    pub fn with_scheme(
        scheme: S,
        dependency: Dependency,
        ignored_versions: Vec<String>,
        security_advisories: Vec<SecurityAdvisory<S>>,
        config: &TransportConfig,
    ) -> Self {
        Self {
            scheme,
            dependency,
            ignored_versions,
            security_advisories,
            client: RegistryClient::new(config),
            listing: OnceCell::new(),
        }
    }

    /// Latest acceptable version, or `None` when nothing survives
    /// filtering
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails (see
    /// [`RegistryError`](crate::version::error::RegistryError)) or when
    /// the current version or an ignore constraint cannot be parsed.
    pub fn latest_version(&self) -> Result<Option<S::Version>, ResolveError> {
        let candidates = self.acceptable_candidates()?;
        Ok(candidates.into_iter().max())
    }

    /// Lowest version that fixes all known advisories, or `None`
    ///
    /// Runs the same acceptability stages as [`latest_version`], then
    /// drops vulnerable versions and everything not strictly above the
    /// current version, and selects the minimum.
    ///
    /// [`latest_version`]: VersionResolver::latest_version
    pub fn lowest_security_fix_version(&self) -> Result<Option<S::Version>, ResolveError> {
        let candidates = self.acceptable_candidates()?;

        let mut candidates =
            filter::filter_vulnerable(&self.scheme, candidates, &self.security_advisories);
        if let Some(current) = self.dependency.version.as_deref() {
            let current = self.scheme.parse_version(current)?;
            candidates = filter::filter_lower_bound::<S>(candidates, &current);
        }

        Ok(candidates.into_iter().min())
    }

    /// Yank-free listing reduced by the prerelease and ignore stages
    fn acceptable_candidates(&self) -> Result<Vec<S::Version>, ResolveError> {
        let listing = self.versions()?;

        let wants_prerelease = filter::wants_prerelease(&self.scheme, &self.dependency)?;
        let candidates = filter::filter_prerelease(&self.scheme, listing.to_vec(), wants_prerelease);

        let ignored = self
            .ignored_versions
            .iter()
            .map(|raw| self.scheme.parse_requirement(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let candidates = filter::filter_ignored(&self.scheme, candidates, &ignored);

        debug!(
            "{} of {} listed versions acceptable for {}",
            candidates.len(),
            listing.len(),
            self.dependency.name
        );
        Ok(candidates)
    }

    /// Normalized listing, fetched on first use and cached for the
    /// lifetime of this resolver
    ///
    /// Yanked entries are dropped here; a listed version the scheme
    /// cannot parse is skipped, not fatal.
    fn versions(&self) -> Result<&[S::Version], ResolveError> {
        self.listing
            .get_or_try_init(|| {
                let listed = self.client.fetch_versions(&self.dependency)?;
                let versions = listed
                    .into_iter()
                    .filter(|entry| !entry.yanked)
                    .filter_map(|entry| match self.scheme.parse_version(&entry.version) {
                        Ok(version) => Some(version),
                        Err(_) => {
                            warn!(
                                "Skipping unparseable listed version {} for {}",
                                entry.version, self.dependency.name
                            );
                            None
                        }
                    })
                    .collect();
                Ok(versions)
            })
            .map(Vec::as_slice)
    }
}
