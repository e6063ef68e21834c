//! Structured logging setup.
//!
//! Reads `OPTIFACE_TRACE` (filter directive, default `off`),
//! `OPTIFACE_LOG_FORMAT` (`pretty` or `json`) and `OPTIFACE_LOG_FILE`
//! (optional second sink, appended to).

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const TRACE_ENV: &str = "OPTIFACE_TRACE";
pub const FORMAT_ENV: &str = "OPTIFACE_LOG_FORMAT";
pub const FILE_ENV: &str = "OPTIFACE_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile { path: PathBuf, message: String },
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::LogFile { .. } => "LOG_FILE",
            LoggingError::Init(_) => "LOG_INIT",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), msg)
            }
            LoggingError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid {FORMAT_ENV} '{}' (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            LoggingError::LogFile { path, message } => write!(
                f,
                "[{}] Failed to open log file {}: {}",
                self.code(),
                path.display(),
                message
            ),
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Resolve settings from the process environment; `level` overrides
    /// `OPTIFACE_TRACE`.
    pub fn from_env(level: Option<&str>) -> Result<Self, LoggingError> {
        Self::from_lookup(level, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        level: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LoggingError> {
        let level = level
            .map(str::to_string)
            .or_else(|| lookup(TRACE_ENV))
            .unwrap_or_else(|| "off".to_string());
        let format = match lookup(FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };
        let file = lookup(FILE_ENV).map(PathBuf::from);
        Ok(Self {
            level,
            format,
            file,
        })
    }

    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.level.eq_ignore_ascii_case("off") {
            Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
        } else {
            EnvFilter::try_new(&self.level)
                .map_err(|err| LoggingError::InvalidFilter(err.to_string()))
        }
    }
}

fn open_log_file(path: &Path) -> Result<Mutex<std::fs::File>, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Install a global subscriber.
///
/// Returns `Ok(true)` when logging was initialized and `Ok(false)` when a
/// subscriber is already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let settings = LoggingSettings::from_env(level)?;
    let filter = settings.filter()?;

    match settings.format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &settings.file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &settings.file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_defaults_are_off_and_pretty() {
        let settings = LoggingSettings::from_lookup(None, lookup(&[])).unwrap();
        assert_eq!(settings.level, "off");
        assert_eq!(settings.format, LogFormat::Pretty);
        assert!(settings.file.is_none());
        assert!(settings.filter().is_ok());
    }

    #[test]
    fn test_explicit_level_overrides_env() {
        let vars = [(TRACE_ENV, "warn"), (FORMAT_ENV, "JSON")];
        let settings = LoggingSettings::from_lookup(Some("debug"), lookup(&vars)).unwrap();
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let vars = [(FORMAT_ENV, "xml")];
        let err = LoggingSettings::from_lookup(None, lookup(&vars)).unwrap_err();
        assert_eq!(err.code(), "LOG_INVALID_FORMAT");
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_log_file_is_read() {
        let vars = [(FILE_ENV, "/tmp/optiface.log")];
        let settings = LoggingSettings::from_lookup(None, lookup(&vars)).unwrap();
        assert_eq!(settings.file, Some(PathBuf::from("/tmp/optiface.log")));
    }
}
