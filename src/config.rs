//! Command-line configuration parsed from environment variables.
//!
//! Every setting can come from an `XKBDATA_` environment variable and then be
//! overridden by a command-line flag:
//!
//! - `XKBDATA_LOG_LEVEL`: trace, debug, info, warn or error
//! - `XKBDATA_FORMAT`: output format, see [`crate::processor::available_formats`]
//! - `XKBDATA_START`: start rule, one of keymap, statement or expression

use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::parser::StartRule;
use crate::processor::ProcessingSpec;

pub const DEFAULT_FORMAT: &str = "ast-treeviz";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn`, which is where lexical diagnostics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::Invalid(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LogLevel,
    /// Output format string such as `ast-treeviz`
    pub format: String,
    pub start: StartRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            format: DEFAULT_FORMAT.to_string(),
            start: StartRule::default(),
        }
    }
}

fn parse_format(value: &str) -> Result<String, ConfigError> {
    ProcessingSpec::from_string(value)
        .map(|spec| spec.to_string())
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}

fn parse_start(value: &str) -> Result<StartRule, ConfigError> {
    value
        .parse()
        .map_err(|e: crate::parser::UnknownStartRule| ConfigError::Invalid(e.to_string()))
}

impl Config {
    /// Load configuration from the `XKBDATA_` environment variables, falling
    /// back to defaults for missing values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup("XKBDATA_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };
        let format = match lookup("XKBDATA_FORMAT") {
            Some(val) => parse_format(&val)?,
            None => defaults.format,
        };
        let start = match lookup("XKBDATA_START") {
            Some(val) => parse_start(&val)?,
            None => defaults.start,
        };

        Ok(Self {
            log_level,
            format,
            start,
        })
    }

    /// Apply command-line overrides on top of environment-based values.
    pub fn apply_overrides(
        mut self,
        log_level: Option<&str>,
        format: Option<&str>,
        start: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = log_level {
            self.log_level = level.parse()?;
        }
        if let Some(format) = format {
            self.format = parse_format(format)?;
        }
        if let Some(start) = start {
            self.start = parse_start(start)?;
        }
        Ok(self)
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn processing_spec(&self) -> Result<ProcessingSpec, ConfigError> {
        ProcessingSpec::from_string(&self.format).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
