//! Translation driver settings loaded via OrthoConfig.

use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::snapshot::MappingSeed;

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Raised when `log_format` names neither `text` nor `json`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format '{0}'; expected 'text' or 'json'")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownLogFormat(raw.to_owned())),
        }
    }
}

/// Settings for `processflow-translate`, read from `PROCESSFLOW_*`
/// environment variables or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROCESSFLOW")]
pub struct TranslateSettings {
    /// Pretty-print the output JSON; defaults to compact output.
    pub pretty: Option<bool>,
    /// Seed the identity map from the snapshot's users before translating;
    /// defaults to `true`.
    pub seed_from_users: Option<bool>,
    /// `text` or `json`; defaults to `text`.
    pub log_format: Option<String>,
}

impl TranslateSettings {
    /// Whether output JSON is pretty-printed, falling back to compact.
    #[must_use]
    pub const fn pretty(&self) -> bool {
        matches!(self.pretty, Some(true))
    }

    /// Return the configured log format, falling back to text.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLogFormat`] when the value is not recognised.
    pub fn log_format(&self) -> Result<LogFormat, UnknownLogFormat> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::Text), LogFormat::from_str)
    }

    /// How the identity map is prepared before translation.
    #[must_use]
    pub const fn mapping_seed(&self) -> MappingSeed {
        if matches!(self.seed_from_users, Some(true) | None) {
            MappingSeed::FromUsers
        } else {
            MappingSeed::Keep
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> TranslateSettings {
        TranslateSettings::load_from_iter([OsString::from("processflow-translate")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PROCESSFLOW_PRETTY", None::<String>),
            ("PROCESSFLOW_SEED_FROM_USERS", None::<String>),
            ("PROCESSFLOW_LOG_FORMAT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.pretty.is_none());
        assert!(!settings.pretty());
        assert_eq!(settings.mapping_seed(), MappingSeed::FromUsers);
        assert_eq!(settings.log_format(), Ok(LogFormat::Text));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PROCESSFLOW_PRETTY", Some("true".to_owned())),
            ("PROCESSFLOW_SEED_FROM_USERS", Some("false".to_owned())),
            ("PROCESSFLOW_LOG_FORMAT", Some("json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.pretty());
        assert_eq!(settings.mapping_seed(), MappingSeed::Keep);
        assert_eq!(settings.log_format(), Ok(LogFormat::Json));
    }

    #[rstest]
    fn seeding_can_be_enabled_explicitly() {
        let _guard = lock_env([
            ("PROCESSFLOW_PRETTY", Some("false".to_owned())),
            ("PROCESSFLOW_SEED_FROM_USERS", Some("true".to_owned())),
            ("PROCESSFLOW_LOG_FORMAT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.pretty());
        assert_eq!(settings.mapping_seed(), MappingSeed::FromUsers);
    }

    #[rstest]
    #[case("text", LogFormat::Text)]
    #[case(" JSON ", LogFormat::Json)]
    fn log_format_parses_case_insensitively(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(UnknownLogFormat("yaml".to_owned()))
        );
    }
}
