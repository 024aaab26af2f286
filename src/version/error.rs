use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Registry source is missing its {0}")]
    MissingSourceField(&'static str),

    #[error("Environment variable {0} is not set")]
    MissingToken(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),
}
