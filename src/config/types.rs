use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Verbosity level controlling tracing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (info level)
    Normal,
    /// Verbose output (debug level)
    Verbose,
    /// Maximum output (trace level)
    Trace,
}

impl From<(bool, u8)> for Verbosity {
    /// Convert from (quiet_flag, verbose_count) to Verbosity.
    ///
    /// - quiet=true -> Quiet (regardless of verbose count)
    /// - verbose=0  -> Normal
    /// - verbose=1  -> Verbose
    /// - verbose=2+ -> Trace
    fn from((quiet, verbose_count): (bool, u8)) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            match verbose_count {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

impl Verbosity {
    /// Return the tracing filter string for this verbosity level.
    pub fn as_tracing_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

/// Default connection call timeout in seconds.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

/// Colours used by modal dialogs. Values are ratatui colour names
/// (`"yellow"`, `"dark gray"`) or hex strings (`"#1e1e2e"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogStyle {
    pub button_bg: String,
    pub button_fg: String,
    pub button_focus_bg: String,
    pub button_focus_fg: String,
    pub label_fg: String,
    pub field_fg: String,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            button_bg: "dark gray".into(),
            button_fg: "black".into(),
            button_focus_bg: "yellow".into(),
            button_focus_fg: "black".into(),
            label_fg: "cyan".into(),
            field_fg: "white".into(),
        }
    }
}

/// Application configuration, as read from `config.toml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Suppresses every mutating key binding.
    pub read_only: bool,
    /// Timeout shared by all calls of one batch.
    pub call_timeout_secs: u64,
    pub dialog: DialogStyle,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            dialog: DialogStyle::default(),
        }
    }
}

impl BrowseConfig {
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Connection call timeout. A zero value falls back to the default.
    pub fn call_timeout(&self) -> Duration {
        if self.call_timeout_secs == 0 {
            Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.call_timeout_secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from((true, 2)), Verbosity::Quiet);
        assert_eq!(Verbosity::from((false, 0)), Verbosity::Normal);
        assert_eq!(Verbosity::from((false, 1)), Verbosity::Verbose);
        assert_eq!(Verbosity::from((false, 5)), Verbosity::Trace);
    }

    #[test]
    fn verbosity_filters() {
        assert_eq!(Verbosity::Quiet.as_tracing_filter(), "error");
        assert_eq!(Verbosity::Trace.as_tracing_filter(), "trace");
    }

    #[test]
    fn call_timeout_zero_falls_back_to_default() {
        let config = BrowseConfig {
            call_timeout_secs: 0,
            ..BrowseConfig::default()
        };
        assert_eq!(config.call_timeout(), Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: BrowseConfig = toml::from_str(
            r#"
            read_only = true

            [dialog]
            button_focus_bg = "magenta"
            "#,
        )
        .unwrap();
        assert!(config.is_read_only());
        assert_eq!(config.call_timeout_secs, DEFAULT_CALL_TIMEOUT_SECS);
        assert_eq!(config.dialog.button_focus_bg, "magenta");
        assert_eq!(config.dialog.label_fg, "cyan");
    }
}
