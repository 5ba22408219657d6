use thiserror::Error;

/// Failure of a single HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

/// A component fragment could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load component {name}: {source}")]
pub struct LoadError {
    pub name: String,
    #[source]
    pub source: FetchError,
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self.source {
            FetchError::Status(code) => Some(code),
            FetchError::Network(_) => None,
        }
    }
}

/// No project with the requested id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project id '{id}'")]
pub struct LookupError {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("project catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("project '{id}': {reason}")]
    Invalid { id: String, reason: String },
    #[error("duplicate project id '{0}'")]
    Duplicate(String),
}

#[derive(Debug, Error)]
#[error("invalid site configuration: {0}")]
pub struct ConfigError(#[from] pub serde_json::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("모든 필드를 입력해주세요.")]
    MissingField,
    #[error("유효한 이메일 주소를 입력해주세요.")]
    InvalidEmail,
}
