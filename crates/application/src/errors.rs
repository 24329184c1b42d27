//! Application Layer Errors
//!
//! `ConnectorError` is what a connector reports. The facade hands it back
//! exactly as received. `ApplicationError` covers wiring the facade up.

use thiserror::Error;

/// Failures reported by a connector implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// Transport to the backend failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Backend refused the caller's credentials or session
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Search backend rejected the query object
    #[error("Malformed query: {message}")]
    MalformedQuery { message: String },

    /// Requested resource does not exist
    #[error("Resource not found: {resource} with ID '{id}'")]
    NotFound { resource: String, id: String },

    /// Connector does not provide this capability
    #[error("Operation not supported by connector: {operation}")]
    Unsupported { operation: String },

    /// Anything else the backend reported, code preserved
    #[error("Backend error [{code}]: {message}")]
    Backend { code: String, message: String },
}

impl ConnectorError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn malformed_query<S: Into<String>>(message: S) -> Self {
        Self::MalformedQuery {
            message: message.into(),
        }
    }

    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn backend<C: Into<String>, S: Into<String>>(code: C, message: S) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether a caller may reasonably try again
    ///
    /// The facade itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Get error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Unauthorized { .. } => "unauthorized",
            Self::MalformedQuery { .. } => "malformed_query",
            Self::NotFound { .. } => "not_found",
            Self::Unsupported { .. } => "unsupported",
            Self::Backend { .. } => "backend",
        }
    }
}

/// Result of a single connector call
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Errors raised while assembling application components
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Facade built without its one dependency
    #[error("Store facade requires a connector")]
    MissingConnector,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Connector failure surfaced through application code
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl ApplicationError {
    /// Create configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingConnector => "missing_connector",
            Self::Configuration { .. } => "configuration",
            Self::Connector(e) => e.category(),
        }
    }
}
