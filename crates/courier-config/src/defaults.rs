use crate::locale::Locale;

/// Default log filter expression used by dispatcher hosts.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default message used when creating a SOAP `MustUnderstand` fault.
pub const DEFAULT_MUST_UNDERSTAND_FAULT_STRING: &str =
    "One or more mandatory SOAP header blocks not understood";

/// Default log filter expression used by dispatcher hosts.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Owned default `MustUnderstand` fault string.
#[must_use]
pub fn default_must_understand_fault_string() -> String {
    DEFAULT_MUST_UNDERSTAND_FAULT_STRING.to_owned()
}

/// Locale of the default `MustUnderstand` fault string.
#[must_use]
pub const fn default_must_understand_fault_locale() -> Locale {
    Locale::ENGLISH
}
