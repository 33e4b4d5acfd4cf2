//! Error types raised while dispatching messages.
//!
//! [`EndpointError`] is what interceptors, endpoints and mappings raise; every
//! variant carries a stable [`EndpointError::kind`] string that exception
//! resolvers can key on. [`DispatchError`] is what a failed dispatch reports
//! to the transport.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised by interceptors, endpoints, mappings and adapters.
#[derive(Debug, Clone, Error)]
pub enum EndpointError {
    /// The request could not be processed as received.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// An endpoint failed while handling the request.
    #[error("endpoint '{endpoint}' failed: {message}")]
    EndpointFailed {
        /// Name of the failing endpoint.
        endpoint: String,
        /// Description of the failure.
        message: String,
        /// Underlying cause, when one is available.
        #[source]
        source: Option<Arc<dyn StdError + Send + Sync>>,
    },

    /// An interceptor aborted the dispatch.
    #[error("interceptor '{interceptor}' failed: {message}")]
    InterceptorFailed {
        /// Name of the failing interceptor.
        interceptor: String,
        /// Description of the failure.
        message: String,
    },

    /// An endpoint mapping could not complete its lookup.
    #[error("endpoint mapping failed: {message}")]
    MappingFailed {
        /// Description of the failure.
        message: String,
    },

    /// The message type does not suit the component handling it.
    #[error("unsupported message: {message}")]
    UnsupportedMessage {
        /// Description of the mismatch.
        message: String,
    },

    /// An adapter was asked to invoke an endpoint shape it cannot handle.
    #[error("endpoint '{endpoint}' is not supported by this adapter")]
    UnsupportedEndpoint {
        /// Name of the endpoint.
        endpoint: String,
    },

    /// No registered adapter supports the resolved endpoint.
    #[error("no adapter for endpoint '{endpoint}': is the endpoint shape registered?")]
    NoAdapter {
        /// Name of the endpoint.
        endpoint: String,
    },

    /// Application-defined failure carrying its own kind.
    #[error("{message}")]
    Application {
        /// Stable identifier used by fault mapping.
        kind: String,
        /// Description of the failure.
        message: String,
    },
}

impl EndpointError {
    /// Creates an [`EndpointError::InvalidRequest`].
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an [`EndpointError::EndpointFailed`] without an underlying cause.
    #[must_use]
    pub fn endpoint_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EndpointFailed {
            endpoint: endpoint.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an [`EndpointError::EndpointFailed`] wrapping `source`.
    #[must_use]
    pub fn endpoint_source<E>(endpoint: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::EndpointFailed {
            endpoint: endpoint.into(),
            message: source.to_string(),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates an [`EndpointError::InterceptorFailed`].
    #[must_use]
    pub fn interceptor_failed(interceptor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InterceptorFailed {
            interceptor: interceptor.into(),
            message: message.into(),
        }
    }

    /// Creates an [`EndpointError::MappingFailed`].
    #[must_use]
    pub fn mapping_failed(message: impl Into<String>) -> Self {
        Self::MappingFailed {
            message: message.into(),
        }
    }

    /// Creates an [`EndpointError::UnsupportedMessage`].
    #[must_use]
    pub fn unsupported_message(message: impl Into<String>) -> Self {
        Self::UnsupportedMessage {
            message: message.into(),
        }
    }

    /// Creates an [`EndpointError::UnsupportedEndpoint`].
    #[must_use]
    pub fn unsupported_endpoint(endpoint: impl Into<String>) -> Self {
        Self::UnsupportedEndpoint {
            endpoint: endpoint.into(),
        }
    }

    /// Creates an [`EndpointError::NoAdapter`].
    #[must_use]
    pub fn no_adapter(endpoint: impl Into<String>) -> Self {
        Self::NoAdapter {
            endpoint: endpoint.into(),
        }
    }

    /// Creates an [`EndpointError::Application`].
    #[must_use]
    pub fn application(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Application {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Stable identifier for the error category.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::EndpointFailed { .. } => "endpoint_failed",
            Self::InterceptorFailed { .. } => "interceptor_failed",
            Self::MappingFailed { .. } => "mapping_failed",
            Self::UnsupportedMessage { .. } => "unsupported_message",
            Self::UnsupportedEndpoint { .. } => "unsupported_endpoint",
            Self::NoAdapter { .. } => "no_adapter",
            Self::Application { kind, .. } => kind,
        }
    }
}

/// Reasons a dispatch did not complete normally.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No endpoint mapping produced a chain for the request.
    #[error("no endpoint mapping found for request with payload root {request}")]
    NoEndpointFound {
        /// Description of the unmatched request.
        request: String,
    },

    /// An error from the chain that no resolver handled.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}
