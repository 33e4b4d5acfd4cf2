//! Namespace-qualified XML names.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// An XML qualified name: namespace URI, local part and an optional prefix.
///
/// The prefix is presentation only; equality and hashing consider the
/// namespace URI and the local part.
#[derive(Debug, Clone, Eq)]
pub struct QName {
    namespace_uri: String,
    local_part: String,
    prefix: Option<String>,
}

impl QName {
    /// Creates a qualified name without a prefix.
    #[must_use]
    pub fn new(namespace_uri: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_part: local_part.into(),
            prefix: None,
        }
    }

    /// Creates a qualified name with the prefix used when serialising.
    #[must_use]
    pub fn with_prefix(
        namespace_uri: impl Into<String>,
        local_part: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_part: local_part.into(),
            prefix: Some(prefix.into()),
        }
    }

    /// Namespace URI; empty when the name is unqualified.
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    /// Local part of the name.
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Serialisation prefix, if one was given.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace_uri == other.namespace_uri && self.local_part == other.local_part
    }
}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace_uri.hash(state);
        self.local_part.hash(state);
    }
}

impl fmt::Display for QName {
    /// Renders Clark notation: `{namespace}local`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            formatter.write_str(&self.local_part)
        } else {
            write!(formatter, "{{{}}}{}", self.namespace_uri, self.local_part)
        }
    }
}

impl FromStr for QName {
    type Err = QNameParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (namespace_uri, local_part) = match input.strip_prefix('{') {
            Some(rest) => rest
                .split_once('}')
                .ok_or_else(|| QNameParseError::UnterminatedNamespace(input.to_owned()))?,
            None => ("", input),
        };
        if local_part.is_empty() {
            return Err(QNameParseError::EmptyLocalPart(input.to_owned()));
        }
        Ok(Self::new(namespace_uri, local_part))
    }
}

/// Errors encountered while parsing a [`QName`] from Clark notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QNameParseError {
    /// The opening `{` has no matching `}`.
    #[error("unterminated namespace in qualified name '{0}'")]
    UnterminatedNamespace(String),
    /// Nothing follows the namespace.
    #[error("empty local part in qualified name '{0}'")]
    EmptyLocalPart(String),
}
