// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration and logging setup.
//!
//! The bridge is loaded into a host process it does not control, so the only
//! configuration channel is the environment:
//!
//! | Variable           | Meaning                               | Default |
//! |--------------------|---------------------------------------|---------|
//! | `JDVRLIB_LOG`      | `tracing` filter directive            | `info`  |
//! | `JDVRLIB_LOG_ANSI` | colored output (`1`/`true`/`yes`/`on`) | off     |

use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

pub const LOG_ENV: &str = "JDVRLIB_LOG";
pub const LOG_ANSI_ENV: &str = "JDVRLIB_LOG_ANSI";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub ansi: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            ansi: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_filter = lookup(LOG_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);
        let ansi = lookup(LOG_ANSI_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(defaults.ansi);
        Self { log_filter, ansi }
    }

    /// Builds the filter; invalid directives are skipped rather than fatal.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .parse_lossy(&self.log_filter)
    }

    /// Installs the global `tracing` subscriber.
    ///
    /// Returns `false` if the host already installed one, which is left in
    /// place.
    pub fn init_logging(&self) -> bool {
        tracing_subscriber::fmt()
            .compact()
            .with_thread_ids(true)
            .with_target(false)
            .with_ansi(self.ansi)
            .with_env_filter(self.env_filter())
            .finish()
            .try_init()
            .is_ok()
    }
}
