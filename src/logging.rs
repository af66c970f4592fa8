// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tracing output for the metadata utilities.
//!
//! [`crate::Database::connect`] calls [`init_logging`] with the
//! `h2gis.log_level` and `h2gis.log_file` options held in its
//! [`crate::UtilitiesConfig`]. Connections handed out through
//! [`crate::DataSource::connection`] go through the same path. The filter
//! only covers the `h2gis_utilities` target, so driver and application
//! logs keep their own levels.
//!
//! Without `h2gis.log_level` the filter comes from `RUST_LOG`, and falls
//! back to `h2gis_utilities=warn`:
//!
//! ```bash
//! RUST_LOG=h2gis_utilities=debug ./my_app
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging settings collected from `h2gis.log_*` options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogConfig {
    /// Log level: "OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE".
    pub level: Option<String>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<String>,
}

impl LogConfig {
    /// Filter directive for this configuration, `None` when logging is off.
    pub(crate) fn filter_directive(&self) -> Option<String> {
        match self.level {
            Some(ref level) if level.eq_ignore_ascii_case("off") => None,
            Some(ref level) => Some(format!("h2gis_utilities={}", level.to_lowercase())),
            None => Some(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "h2gis_utilities=warn".to_string()),
            ),
        }
    }

    /// Writer for the configured destination, and whether it takes ANSI
    /// colours. `None` if the log file cannot be opened.
    fn writer(&self) -> Option<(BoxMakeWriter, bool)> {
        let Some(ref path) = self.file else {
            return Some((BoxMakeWriter::new(std::io::stderr), true));
        };
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => Some((BoxMakeWriter::new(file), false)),
            Err(e) => {
                eprintln!("h2gis-utilities: failed to open log file {}: {}", path, e);
                None
            }
        }
    }
}

/// Install the `h2gis_utilities` subscriber for `config`.
///
/// Only the first connection opened in the process applies its logging
/// options. Later calls, including ones from other [`crate::Database`]
/// values with different options, change nothing. If the application has
/// already set a global subscriber, that one stays.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        let Some(directive) = config.filter_directive() else {
            return;
        };
        let Some((writer, ansi)) = config.writer() else {
            return;
        };
        tracing_subscriber::registry()
            .with(EnvFilter::new(directive))
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_timer(SystemTime),
            )
            .try_init()
            .ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.level.is_none());
        assert!(config.file.is_none());
    }

    #[test]
    fn test_filter_directive_from_level() {
        let config = LogConfig {
            level: Some("DEBUG".to_string()),
            file: None,
        };
        assert_eq!(
            config.filter_directive().as_deref(),
            Some("h2gis_utilities=debug")
        );
    }

    #[test]
    fn test_filter_directive_off() {
        let config = LogConfig {
            level: Some("Off".to_string()),
            file: Some("/tmp/h2gis.log".to_string()),
        };
        assert!(config.filter_directive().is_none());
    }

    #[test]
    fn test_writer_destination() {
        let (_, ansi) = LogConfig::default().writer().unwrap();
        assert!(ansi);

        let path = std::env::temp_dir().join("h2gis_utilities_writer_test.log");
        let config = LogConfig {
            level: None,
            file: Some(path.to_string_lossy().into_owned()),
        };
        let (_, ansi) = config.writer().unwrap();
        assert!(!ansi);
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);

        let config = LogConfig {
            level: None,
            file: Some("/nonexistent-dir/h2gis.log".to_string()),
        };
        assert!(config.writer().is_none());
    }
}
