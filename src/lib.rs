//! Version resolution pipeline for single-dependency updates
//!
//! Given one dependency and its declared registry source, this crate
//! answers two questions: what is the latest acceptable version, and what
//! is the lowest version that fixes all known security advisories. The
//! listing is fetched once per resolver over whichever wire protocol the
//! source declares, then reduced through a fixed filter pipeline.
//!
//! ```no_run
//! use version_resolver::{Dependency, DependencyRequirement, SourceDescriptor, VersionResolver};
//!
//! let dependency = Dependency::new(
//!     "serde",
//!     Some("1.0.0".to_string()),
//!     vec![DependencyRequirement {
//!         requirement: Some("^1.0".to_string()),
//!         source: Some(SourceDescriptor::Default { dl_base: None }),
//!     }],
//! );
//!
//! let resolver = VersionResolver::new(dependency, vec![], vec![]);
//! if let Some(latest) = resolver.latest_version().unwrap() {
//!     println!("latest: {}", latest);
//! }
//! ```

pub mod config;
pub mod dependency;
pub mod version;

pub use config::{RetryPolicy, TransportConfig};
pub use dependency::{Dependency, DependencyRequirement, SourceDescriptor};
pub use version::advisory::SecurityAdvisory;
pub use version::error::{RegistryError, ResolveError};
pub use version::resolver::VersionResolver;
pub use version::scheme::{CargoScheme, PackageManager, VersionScheme};
