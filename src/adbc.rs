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

//! ADBC adapter.
//!
//! [`Database`] wraps any `adbc_core::Database` (a driver loaded through the
//! driver manager, typically) and adds the `h2gis.*` options. Its
//! connections are [`AdbcConnection`]s, which run the metadata utilities
//! over the driver's statements.

use crate::config::UtilitiesConfig;
use crate::connection::{DataSource, DbConnection, ResultSet};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::logging::init_logging;
use adbc_core::options::{OptionDatabase, OptionValue};
use adbc_core::{Optionable, Statement as _};
use arrow_array::{ArrayRef, RecordBatch, StringArray};
use std::sync::Arc;
use tracing::debug;

const UTILITIES_OPTION_PREFIX: &str = "h2gis.";

/// Runs SQL through a fresh ADBC statement per call.
///
/// Query parameters are bound as a single row of Utf8 values, one column
/// per placeholder.
pub struct AdbcConnection<C> {
    inner: C,
    dialect: Dialect,
}

impl<C: adbc_core::Connection> AdbcConnection<C> {
    pub fn new(inner: C, dialect: Dialect) -> Self {
        Self { inner, dialect }
    }

    /// The driver connection, for calls the utilities do not cover.
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn prepare(&mut self, sql: &str, params: &[&str]) -> Result<C::StatementType> {
        let mut statement = self.inner.new_statement()?;
        statement.set_sql_query(sql)?;
        if !params.is_empty() {
            statement.bind(parameter_batch(params)?)?;
        }
        Ok(statement)
    }
}

impl<C: adbc_core::Connection> DbConnection for AdbcConnection<C> {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<ResultSet> {
        let mut statement = self.prepare(sql, params)?;
        let reader = statement.execute()?;
        ResultSet::from_reader(reader)
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        let mut statement = self.prepare(sql, &[])?;
        let affected = statement.execute_update()?;
        debug!("Statement affected {:?} rows", affected);
        Ok(())
    }
}

/// One-row batch holding the query parameters, in placeholder order.
fn parameter_batch(params: &[&str]) -> Result<RecordBatch> {
    let columns = params.iter().enumerate().map(|(i, value)| {
        (
            format!("p{}", i + 1),
            Arc::new(StringArray::from(vec![*value])) as ArrayRef,
        )
    });
    Ok(RecordBatch::try_from_iter(columns)?)
}

fn utilities_option_name(key: &OptionDatabase) -> Option<&str> {
    match key {
        OptionDatabase::Other(s) if s.starts_with(UTILITIES_OPTION_PREFIX) => Some(s.as_str()),
        _ => None,
    }
}

/// An ADBC database with the utilities configuration on top.
///
/// Options under `h2gis.` configure the utilities; every other option goes
/// to the driver.
#[derive(Debug)]
pub struct Database<D> {
    inner: D,
    config: UtilitiesConfig,
}

impl<D: adbc_core::Database> Database<D> {
    pub fn new(inner: D) -> Self {
        Self::with_config(inner, UtilitiesConfig::default())
    }

    pub fn with_config(inner: D, config: UtilitiesConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &UtilitiesConfig {
        &self.config
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Open a connection using the configured dialect.
    pub fn connect(&self) -> Result<AdbcConnection<D::ConnectionType>> {
        init_logging(&self.config.log);
        let dialect = self.config.dialect();
        debug!("Opening {} connection", dialect);
        let inner = self.inner.new_connection()?;
        Ok(AdbcConnection::new(inner, dialect))
    }
}

impl<D: adbc_core::Database> Optionable for Database<D> {
    type Option = OptionDatabase;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> adbc_core::error::Result<()> {
        match utilities_option_name(&key) {
            Some(name) => self
                .config
                .set_option(name, value)
                .map_err(|e| e.to_adbc()),
            None => self.inner.set_option(key, value),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> adbc_core::error::Result<String> {
        match utilities_option_name(&key) {
            Some(name) => self.config.get_option_string(name).map_err(|e| e.to_adbc()),
            None => self.inner.get_option_string(key),
        }
    }

    fn get_option_bytes(&self, key: Self::Option) -> adbc_core::error::Result<Vec<u8>> {
        self.inner.get_option_bytes(key)
    }

    fn get_option_int(&self, key: Self::Option) -> adbc_core::error::Result<i64> {
        self.inner.get_option_int(key)
    }

    fn get_option_double(&self, key: Self::Option) -> adbc_core::error::Result<f64> {
        self.inner.get_option_double(key)
    }
}

impl<D> DataSource for Database<D>
where
    D: adbc_core::Database + Send + Sync,
    D::ConnectionType: 'static,
{
    fn connection(&self) -> Result<Box<dyn DbConnection>> {
        Ok(Box::new(self.connect()?))
    }
}
