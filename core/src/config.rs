//! Configuration loading
//!
//! Settings are layered, last wins:
//! 1. built-in defaults
//! 2. a TOML file (`--config`, `DSTACK_CONFIG_PATH`, or `dstack.toml` if present)
//! 3. `DSTACK_<SECTION>__<KEY>` environment variables, after `.env` is loaded
//! 4. command-line overrides

use std::path::PathBuf;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::interpreter::executor::trace::DEFAULT_RULE_WIDTH;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "DSTACK_CONFIG_PATH";

/// Picked up from the working directory when no file is named
pub const DEFAULT_CONFIG_FILE: &str = "dstack.toml";

const ENV_PREFIX: &str = "DSTACK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub trace: TraceConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpreterConfig {
    /// Trace every step
    pub debug: bool,
    /// Fixed seed for the Random instruction; the clock is used otherwise
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceConfig {
    /// Width of the dashed rule after each trace block
    pub rule_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Collects command-line overrides before loading
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    debug: bool,
    seed: Option<u64>,
}

impl ConfigBuilder {
    /// Config file to read instead of the default search
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Force debug mode on (a `-d` flag can only enable it)
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let explicit = self
            .config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let file = match &explicit {
            Some(path) => File::from(path.clone())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = config::Config::builder()
            .set_default("interpreter.debug", false)?
            .set_default("trace.rule_width", DEFAULT_RULE_WIDTH as i64)?
            .set_default("log.filter", "warn")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;

        if self.debug {
            config.interpreter.debug = true;
        }
        if self.seed.is_some() {
            config.interpreter.seed = self.seed;
        }

        Ok(config)
    }
}

/// Held by tests that read or change `DSTACK_*` variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
