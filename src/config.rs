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

//! String-keyed configuration for the utilities.
//!
//! | Key                 | Value                                   |
//! |---------------------|-----------------------------------------|
//! | `h2gis.dialect`     | `h2`, `postgresql` or `auto` (default)  |
//! | `h2gis.driver_name` | Driver name used by `auto` detection    |
//! | `h2gis.log_level`   | Log level, or `off`                     |
//! | `h2gis.log_file`    | Log to this file instead of stderr      |

use crate::dialect::Dialect;
use crate::error::{H2gisErrorHelper, Result};
use crate::logging::LogConfig;
use adbc_core::options::OptionValue;

pub const OPTION_DIALECT: &str = "h2gis.dialect";
pub const OPTION_DRIVER_NAME: &str = "h2gis.driver_name";
pub const OPTION_LOG_LEVEL: &str = "h2gis.log_level";
pub const OPTION_LOG_FILE: &str = "h2gis.log_file";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilitiesConfig {
    /// Forced dialect; `None` detects it from the driver name.
    pub dialect: Option<Dialect>,
    pub driver_name: Option<String>,
    pub log: LogConfig,
}

impl UtilitiesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialect to use: the forced one, else detected from the driver
    /// name, else PostgreSQL.
    pub fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or_else(|| {
            self.driver_name
                .as_deref()
                .map(Dialect::detect)
                .unwrap_or_default()
        })
    }

    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<()> {
        let text = match value {
            OptionValue::String(ref s) => s.trim().to_string(),
            _ => {
                return Err(match key {
                    OPTION_DIALECT | OPTION_DRIVER_NAME | OPTION_LOG_LEVEL | OPTION_LOG_FILE => {
                        H2gisErrorHelper::set_invalid_option(key, &value)
                    }
                    _ => H2gisErrorHelper::set_unknown_option(key),
                })
            }
        };

        match key {
            OPTION_DIALECT => {
                self.dialect = if text.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    Some(
                        text.parse()
                            .map_err(|_| H2gisErrorHelper::set_invalid_option(key, &value))?,
                    )
                };
            }
            OPTION_DRIVER_NAME => self.driver_name = Some(text),
            OPTION_LOG_LEVEL => self.log.level = Some(text),
            OPTION_LOG_FILE => self.log.file = Some(text),
            _ => return Err(H2gisErrorHelper::set_unknown_option(key)),
        }
        Ok(())
    }

    pub fn get_option_string(&self, key: &str) -> Result<String> {
        let value = match key {
            OPTION_DIALECT => Some(
                self.dialect
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "auto".to_string()),
            ),
            OPTION_DRIVER_NAME => self.driver_name.clone(),
            OPTION_LOG_LEVEL => self.log.level.clone(),
            OPTION_LOG_FILE => self.log.file.clone(),
            _ => None,
        };
        value.ok_or_else(|| H2gisErrorHelper::get_unknown_option(key))
    }
}
