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

//! H2GIS database utilities for Rust
//!
//! Metadata helpers for H2/H2GIS and PostgreSQL/PostGIS databases, plus
//! spatial decorators for connections and data sources.
//!
//! ## Overview
//!
//! - [`DbConnection`] - The connection seam; implemented over ADBC by
//!   [`AdbcConnection`]
//! - [`TableLocation`] - `[[catalog.]schema.]table` parsing and quoting
//! - [`metadata::service`] - Field lookups, row counts, primary keys, table
//!   classification and listing
//! - [`SpatialConnection`] / [`SpatialDataSource`] - Spatial decorators
//! - [`ProgressMonitor`] - Cancellation hook for running queries
//!
//! ## Example
//!
//! ```ignore
//! use adbc_core::options::{AdbcVersion, OptionDatabase, OptionValue};
//! use adbc_core::{Driver as _, Optionable};
//! use adbc_driver_manager::ManagedDriver;
//! use h2gis_utilities::{metadata::service, Database, DbConnection, TableLocation};
//!
//! let mut driver = ManagedDriver::load_dynamic_from_name("adbc_driver_postgresql", None, AdbcVersion::V110)?;
//! let mut database = Database::new(driver.new_database()?);
//! database.set_option(OptionDatabase::Uri, OptionValue::String("postgresql://localhost/gis".into()))?;
//! database.set_option(OptionDatabase::Other("h2gis.dialect".into()), OptionValue::String("postgresql".into()))?;
//!
//! let mut connection = database.connect()?;
//! let roads = TableLocation::parse_with("public.roads", connection.dialect())?;
//! let key = service::integer_primary_key(&mut connection, &roads)?;
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Description |
//! |--------|-------------|
//! | `h2gis.dialect` | `h2`, `postgresql` or `auto` |
//! | `h2gis.driver_name` | Driver name used for `auto` detection |
//! | `h2gis.log_level` | Log level for this crate |
//! | `h2gis.log_file` | Log file path (stderr when unset) |
//!
//! Any other option is passed to the wrapped ADBC database.

pub mod adbc;
pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod location;
pub mod logging;
pub mod metadata;
pub mod progress;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use adbc::{AdbcConnection, Database};
pub use config::UtilitiesConfig;
pub use connection::{Cancellable, DataSource, DbConnection, ResultSet};
pub use dialect::Dialect;
pub use error::{Error, ErrorKind, H2gisErrorHelper, Result};
pub use location::{quote_identifier, quote_identifier_for, TableLocation};
pub use progress::{attach_cancel, ListenerId, ProgressMonitor};
pub use wrapper::{
    wrap_connection, wrap_spatial_data_source, SpatialConnection, SpatialDataSource,
    SpatialResultSet,
};
