use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unic_langid::parser::ParserError;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError, langid};

/// Language tag attached to human-readable fault text.
///
/// Parsing and canonicalisation are delegated to [`LanguageIdentifier`], so
/// `pt_br` and `pt-BR` name the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(LanguageIdentifier);

impl Locale {
    /// English, the locale of the default fault strings.
    pub const ENGLISH: Self = Self(langid!("en"));

    /// Returns the primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    /// Returns the underlying language identifier.
    #[must_use]
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, formatter)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(identifier: LanguageIdentifier) -> Self {
        Self(identifier)
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        LanguageIdentifier::from_bytes(input.trim().as_bytes())
            .map(Self)
            .map_err(|error| LocaleParseError::from_identifier_error(input, &error))
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

/// Errors encountered while parsing a [`Locale`] from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocaleParseError {
    /// The primary language subtag is missing or malformed.
    #[error("invalid language in locale tag '{0}'")]
    InvalidLanguage(String),
    /// A subtag after the language is not a script, region or variant.
    #[error("invalid subtag in locale tag '{0}'")]
    InvalidSubtag(String),
}

impl LocaleParseError {
    fn from_identifier_error(tag: &str, error: &LanguageIdentifierError) -> Self {
        match error {
            LanguageIdentifierError::ParserError(ParserError::InvalidLanguage) => {
                Self::InvalidLanguage(tag.to_owned())
            }
            _ => Self::InvalidSubtag(tag.to_owned()),
        }
    }
}
