//! Shared configuration for Courier message dispatchers.
//!
//! [`Config`] derives [`OrthoConfig`], which merges built-in defaults, a
//! TOML file, `COURIER_*` environment variables and command-line flags, in
//! that order of precedence. The file is found through `--config-path`,
//! `COURIER_CONFIG_PATH`, or the usual `.courier.toml` discovery locations.
//! The resulting [`Config`] drives telemetry (log filter and format) and the
//! SOAP `MustUnderstand` fault text.
//!
//! ```toml
//! log_filter = "courier=debug"
//! log_format = "compact"
//! must_understand_fault_string = "Header blocks not understood"
//! must_understand_fault_locale = "en-GB"
//! ```

mod defaults;
mod locale;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use self::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MUST_UNDERSTAND_FAULT_STRING, default_log_filter,
    default_log_filter_string, default_log_format, default_must_understand_fault_locale,
    default_must_understand_fault_string,
};
pub use self::locale::{Locale, LocaleParseError};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Top-level dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "COURIER")]
pub struct Config {
    /// `tracing-subscriber` filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log events.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Fault string (SOAP 1.1) or reason text (SOAP 1.2) used when a request
    /// carries mandatory headers nobody understands.
    #[ortho_config(default = default_must_understand_fault_string())]
    pub must_understand_fault_string: String,
    /// Language of [`Self::must_understand_fault_string`].
    #[ortho_config(default = default_must_understand_fault_locale())]
    pub must_understand_fault_locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            must_understand_fault_string: default_must_understand_fault_string(),
            must_understand_fault_locale: default_must_understand_fault_locale(),
        }
    }
}

impl Config {
    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the `MustUnderstand` fault reason.
    #[must_use]
    pub fn must_understand_fault_string(&self) -> &str {
        &self.must_understand_fault_string
    }

    /// Returns the locale of the `MustUnderstand` fault reason.
    #[must_use]
    pub const fn must_understand_fault_locale(&self) -> &Locale {
        &self.must_understand_fault_locale
    }
}
