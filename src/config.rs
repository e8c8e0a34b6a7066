//! Layered settings.
//!
//! Defaults, then an optional TOML file, then `GPSSNMP_*` environment
//! variables. Command-line flags are applied on top by the binary.
//!
//! ```toml
//! server = "gps.lan"
//! port = 2947
//! timeout = "10s"
//! wait = "5s"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::poll::PollOptions;
use crate::source::{FixSource, DEFAULT_GPSD_PORT, DEFAULT_SERVER};

/// Prefix for environment overrides, e.g. `GPSSNMP_SERVER`.
pub const ENV_PREFIX: &str = "GPSSNMP";

#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    server: String,
    port: u16,
    timeout: String,
    wait: String,
}

/// Resolved settings, before command-line overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub source: FixSource,
    pub poll: PollOptions,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = PollOptions::default();
        let mut builder = Config::builder()
            .set_default("server", DEFAULT_SERVER)?
            .set_default("port", i64::from(DEFAULT_GPSD_PORT))?
            .set_default("timeout", format!("{}s", defaults.deadline.as_secs()))?
            .set_default("wait", format!("{}s", defaults.wait_slice.as_secs()))?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let raw: RawSettings = builder
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to load configuration")?;

        Ok(Self {
            source: FixSource {
                server: raw.server,
                port: raw.port,
                device: None,
            },
            poll: PollOptions {
                deadline: parse_setting("timeout", &raw.timeout)?,
                wait_slice: parse_setting("wait", &raw.wait)?,
            },
        })
    }
}

fn parse_setting(key: &str, value: &str) -> Result<Duration> {
    parse_duration(value).with_context(|| format!("Invalid {} setting", key))
}
