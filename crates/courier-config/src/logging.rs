use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format of dispatch events written by the telemetry subscriber.
///
/// TOML files and `COURIER_LOG_FORMAT` use the lowercase names; the
/// `--log-format` flag accepts any letter case.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event.
    #[default]
    Json,
    /// One human-readable line per event.
    Compact,
}

/// Error returned when text names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
