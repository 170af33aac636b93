//! Configuration for the Quill tools: a TOML file with a `[logging]` section and a
//! `[catalog]` section that declares extra classes on top of the minimal runtime.

use std::path::Path;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod catalog;

pub use crate::catalog::{CatalogConfig, ClassConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuillConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl QuillConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::load_from_str(&text)?;
        tracing::debug!(
            target: "quill.config",
            path = %path.display(),
            classes = config.catalog.classes.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, tracing is set up but nothing is printed.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Filter directives for the configured level.
    ///
    /// A bare level (`debug`, `warning`, ...) applies to the `quill.*` targets, and other crates
    /// stay at `warn` or quieter. Anything else is taken as raw `EnvFilter` directives.
    pub fn directives(&self) -> String {
        let level = self.level.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        match parse_level(level) {
            Some(level) => format!("{},quill={level}", level.min(LevelFilter::WARN)),
            None => level.to_owned(),
        }
    }

    /// The effective filter. `RUST_LOG` directives are appended after the configured ones, so
    /// they win for any target both mention. Malformed directives are dropped.
    pub fn env_filter(&self) -> EnvFilter {
        let mut directives = self.directives();
        if let Ok(env) = std::env::var("RUST_LOG") {
            if !env.trim().is_empty() {
                directives.push(',');
                directives.push_str(env.trim());
            }
        }
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directives)
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_lowercase().as_str() {
        "warning" => Some(LevelFilter::WARN),
        "none" => Some(LevelFilter::OFF),
        other => other.parse().ok(),
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse toml config: {0}")]
    Toml(String),

    #[error("invalid catalog class `{class}`: {reason}")]
    Catalog { class: String, reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message and drop the source snippet.
        ConfigError::Toml(err.message().to_owned())
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber. Only the first call has an effect.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let layer: Box<dyn Layer<_> + Send + Sync> = match (config.stderr, config.json) {
            (false, _) => tracing_subscriber::layer::Identity::new().boxed(),
            (true, true) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed(),
            (true, false) => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed(),
        };

        if tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .is_ok()
        {
            tracing::debug!(target: "quill.config", level = %config.level, "tracing initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_owned(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn bare_levels_scope_the_quill_targets() {
        assert_eq!(level("DEBUG").directives(), "warn,quill=debug");
        assert_eq!(level(" Warning ").directives(), "warn,quill=warn");
        assert_eq!(level("error").directives(), "error,quill=error");
        assert_eq!(level("none").directives(), "off,quill=off");
        assert_eq!(level("").directives(), "warn");
    }

    #[test]
    fn directive_strings_pass_through() {
        assert_eq!(
            level("quill.cast=trace,info").directives(),
            "quill.cast=trace,info"
        );
    }

    #[test]
    fn init_tracing_is_idempotent() {
        let config = LoggingConfig {
            stderr: false,
            ..LoggingConfig::default()
        };
        init_tracing(&config);
        init_tracing(&config);
    }
}
