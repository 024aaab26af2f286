//! Registry listing fetch for the two supported wire protocols
//!
//! A dependency's authoritative source picks the protocol once:
//! - Sparse: `GET {index}/{prefix}/{name}`, newline-delimited JSON with
//!   `vers`/`yanked` fields, authenticated via a per-registry token from
//!   the environment.
//! - Default: `GET {dl_base}/{name}`, one JSON object with a `versions`
//!   array of `num`/`yanked` entries.

use std::env;
use std::thread;

use serde::Deserialize;
use tracing::warn;

use crate::config::{CRATES_IO_DL_BASE, RetryPolicy, TransportConfig, USER_AGENT};
use crate::dependency::{Dependency, SourceDescriptor};
use crate::version::error::RegistryError;

/// One listing record, normalized across protocols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedVersion {
    pub version: String,
    pub yanked: bool,
}

/// Client for fetching published version listings
pub struct RegistryClient {
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

impl RegistryClient {
    pub fn new(config: &TransportConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(config.timeout)
                .build()
                .expect("Failed to create HTTP client"),
            retry: config.retry.clone(),
        }
    }

    /// Fetches the full published listing for a dependency
    ///
    /// Yanked entries are preserved here; the resolver drops them during
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is misconfigured, the per-registry
    /// token is missing, the package is unknown to the registry, the
    /// response cannot be parsed, or the request times out twice.
    pub fn fetch_versions(
        &self,
        dependency: &Dependency,
    ) -> Result<Vec<ListedVersion>, RegistryError> {
        match dependency.source() {
            Some(SourceDescriptor::Sparse {
                index_url,
                registry,
            }) => self.fetch_sparse(dependency, index_url.as_deref(), registry.as_deref()),
            Some(SourceDescriptor::Default { dl_base }) => {
                self.fetch_default(dependency, dl_base.as_deref())
            }
            None => self.fetch_default(dependency, None),
        }
    }

    fn fetch_default(
        &self,
        dependency: &Dependency,
        dl_base: Option<&str>,
    ) -> Result<Vec<ListedVersion>, RegistryError> {
        let base = dl_base.unwrap_or(CRATES_IO_DL_BASE);
        let url = format!("{}/{}", base.trim_end_matches('/'), dependency.name);

        let body = self.get_with_retry(&url, None, &dependency.name)?;
        parse_default_listing(&body)
    }

    fn fetch_sparse(
        &self,
        dependency: &Dependency,
        index_url: Option<&str>,
        registry: Option<&str>,
    ) -> Result<Vec<ListedVersion>, RegistryError> {
        // Both fields and the token are checked before any network call.
        let index_url = index_url.ok_or(RegistryError::MissingSourceField("index URL"))?;
        let registry = registry.ok_or(RegistryError::MissingSourceField("registry name"))?;

        let token_var = token_env_var(registry);
        let token = env::var(&token_var).map_err(|_| RegistryError::MissingToken(token_var))?;

        let url = format!(
            "{}/{}",
            index_url.trim_end_matches('/'),
            sparse_index_path(&dependency.name)
        );

        let body = self.get_with_retry(&url, Some(&token), &dependency.name)?;
        Ok(parse_sparse_listing(&body))
    }

    /// Issues an idempotent GET, retrying once on a transient timeout
    fn get_with_retry(
        &self,
        url: &str,
        auth: Option<&str>,
        package_name: &str,
    ) -> Result<String, RegistryError> {
        match self.get(url, auth, package_name) {
            Err(RegistryError::Network(e)) if e.is_timeout() => {
                let delay = self.retry.sample_backoff();
                warn!("Request to {} timed out, retrying in {:?}", url, delay);
                thread::sleep(delay);
                self.get(url, auth, package_name)
            }
            result => result,
        }
    }

    fn get(
        &self,
        url: &str,
        auth: Option<&str>,
        package_name: &str,
    ) -> Result<String, RegistryError> {
        let mut request = self.client.get(url);
        if let Some(token) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request.send()?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }
        if !status.is_success() {
            warn!("Registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        Ok(response.text()?)
    }
}

/// Converts a package name to its sparse index path
///
/// - 1 char: "1/{name}"
/// - 2 chars: "2/{name}"
/// - 3 chars: "3/{first_char}/{name}"
/// - 4+ chars: "{first_2}/{next_2}/{name}"
fn sparse_index_path(name: &str) -> String {
    let name = name.to_lowercase();
    match name.len() {
        1 => format!("1/{}", name),
        2 => format!("2/{}", name),
        3 => format!("3/{}/{}", &name[0..1], name),
        _ => format!("{}/{}/{}", &name[0..2], &name[2..4], name),
    }
}

/// Environment variable holding the token for a named registry
///
/// The registry name is uppercased with every non-alphanumeric character
/// replaced by an underscore: `my-reg` -> `CARGO_REGISTRIES_MY_REG_TOKEN`.
fn token_env_var(registry: &str) -> String {
    let sanitized: String = registry
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("CARGO_REGISTRIES_{}_TOKEN", sanitized)
}

/// Response from the default crates API
#[derive(Deserialize)]
struct DefaultListing {
    #[serde(default)]
    versions: Vec<DefaultVersion>,
}

#[derive(Deserialize)]
struct DefaultVersion {
    num: String,
    #[serde(default)]
    yanked: bool,
}

fn parse_default_listing(body: &str) -> Result<Vec<ListedVersion>, RegistryError> {
    let listing: DefaultListing = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse registry response: {}", e);
        RegistryError::InvalidResponse(e.to_string())
    })?;

    Ok(listing
        .versions
        .into_iter()
        .map(|v| ListedVersion {
            version: v.num,
            yanked: v.yanked,
        })
        .collect())
}

/// Entry in the sparse index (one line of newline-delimited JSON)
#[derive(Deserialize)]
struct SparseEntry {
    vers: String,
    #[serde(default)]
    yanked: bool,
}

fn parse_sparse_listing(body: &str) -> Vec<ListedVersion> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<SparseEntry>(line) {
            Ok(entry) => Some(ListedVersion {
                version: entry.vers,
                yanked: entry.yanked,
            }),
            Err(e) => {
                warn!("Skipping malformed index line: {}", e);
                None
            }
        })
        .collect()
}
