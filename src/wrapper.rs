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

//! Spatial decorators over connections and data sources.
//!
//! A [`SpatialConnection`] behaves exactly like the connection it wraps and
//! adds [`SpatialConnection::query_spatial`], whose results expose their
//! geometry columns. Wrapping is idempotent: [`wrap_connection`] and
//! [`wrap_spatial_data_source`] hand back inputs that are already spatial.

use crate::connection::{Cancellable, DataSource, DbConnection, ResultSet};
use crate::dialect::Dialect;
use crate::error::{H2gisErrorHelper, Result};
use crate::metadata::types::{ColumnInfo, PrimaryKeyInfo, TableInfo};
use arrow_array::cast::AsArray;
use arrow_schema::{DataType, Field};
use serde::Deserialize;
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

const EXTENSION_NAME_KEY: &str = "ARROW:extension:name";
const EXTENSION_METADATA_KEY: &str = "ARROW:extension:metadata";
const WKB_EXTENSIONS: [&str; 2] = ["geoarrow.wkb", "ogc.wkb"];
const OPAQUE_EXTENSION: &str = "arrow.opaque";

/// Payload of the `arrow.opaque` extension.
#[derive(Debug, Deserialize)]
struct OpaqueMetadata {
    #[serde(default)]
    type_name: Option<String>,
}

/// True if the field holds WKB geometries.
///
/// Recognizes the GeoArrow WKB extension and driver-opaque columns whose
/// database type name is `geometry`. Only the top-level `type_name` of the
/// opaque metadata is considered.
pub fn is_geometry_field(field: &Field) -> bool {
    let metadata = field.metadata();
    match metadata.get(EXTENSION_NAME_KEY).map(String::as_str) {
        Some(name) if WKB_EXTENSIONS.contains(&name) => true,
        Some(OPAQUE_EXTENSION) => metadata
            .get(EXTENSION_METADATA_KEY)
            .and_then(|json| match serde_json::from_str::<OpaqueMetadata>(json) {
                Ok(opaque) => opaque.type_name,
                Err(e) => {
                    debug!("Ignoring malformed metadata on field {}: {}", field.name(), e);
                    None
                }
            })
            .is_some_and(|type_name| type_name.eq_ignore_ascii_case("geometry")),
        _ => false,
    }
}

/// A result set that knows its geometry columns.
#[derive(Debug, Clone)]
pub struct SpatialResultSet {
    result: ResultSet,
}

impl SpatialResultSet {
    pub fn new(result: ResultSet) -> Self {
        Self { result }
    }

    pub fn into_inner(self) -> ResultSet {
        self.result
    }

    /// Names of the geometry columns, in order.
    pub fn geometry_fields(&self) -> Vec<String> {
        self.result
            .schema()
            .fields()
            .iter()
            .filter(|field| is_geometry_field(field))
            .map(|field| field.name().clone())
            .collect()
    }

    /// 1-based index of the first geometry column.
    pub fn first_geometry_field_index(&self) -> Option<usize> {
        self.result
            .schema()
            .fields()
            .iter()
            .position(|field| is_geometry_field(field))
            .map(|index| index + 1)
    }

    /// WKB bytes at 0-based `row` and 1-based `column`. NULL is `None`.
    pub fn geometry(&self, row: usize, column: usize) -> Result<Option<Vec<u8>>> {
        let field = column
            .checked_sub(1)
            .and_then(|index| self.result.schema().fields().get(index))
            .ok_or_else(|| {
                H2gisErrorHelper::invalid_argument()
                    .message(format!("Column index {} out of range", column))
            })?;
        if !is_geometry_field(field) {
            return Err(H2gisErrorHelper::invalid_argument()
                .message(format!("Column {} is not a geometry column", field.name())));
        }

        let mut offset = row;
        for batch in self.result.batches() {
            if offset >= batch.num_rows() {
                offset -= batch.num_rows();
                continue;
            }
            let array = batch.column(column - 1);
            if array.is_null(offset) {
                return Ok(None);
            }
            let bytes = match array.data_type() {
                DataType::Binary => array.as_binary::<i32>().value(offset).to_vec(),
                DataType::LargeBinary => array.as_binary::<i64>().value(offset).to_vec(),
                dt => {
                    return Err(H2gisErrorHelper::invalid_state()
                        .message(format!("Geometry column stored as {:?}", dt)))
                }
            };
            return Ok(Some(bytes));
        }
        Err(H2gisErrorHelper::invalid_argument().message(format!("Row {} out of range", row)))
    }
}

impl Deref for SpatialResultSet {
    type Target = ResultSet;

    fn deref(&self) -> &ResultSet {
        &self.result
    }
}

/// Connection decorator producing [`SpatialResultSet`]s.
pub struct SpatialConnection {
    inner: Box<dyn DbConnection>,
}

impl SpatialConnection {
    pub fn new(inner: Box<dyn DbConnection>) -> Self {
        Self { inner }
    }

    /// Run a query and expose the geometry columns of its result.
    pub fn query_spatial(&mut self, sql: &str, params: &[&str]) -> Result<SpatialResultSet> {
        Ok(SpatialResultSet::new(self.inner.query(sql, params)?))
    }

    pub fn inner(&self) -> &dyn DbConnection {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn DbConnection> {
        self.inner
    }
}

impl DbConnection for SpatialConnection {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<ResultSet> {
        self.inner.query(sql, params)
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.inner.execute(sql)
    }

    fn canceller(&self) -> Option<Arc<dyn Cancellable>> {
        self.inner.canceller()
    }

    fn tables(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableInfo>> {
        self.inner
            .tables(catalog, schema_pattern, table_pattern, types)
    }

    fn columns(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        column: Option<&str>,
    ) -> Result<Vec<ColumnInfo>> {
        self.inner.columns(catalog, schema, table, column)
    }

    fn primary_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<PrimaryKeyInfo>> {
        self.inner.primary_keys(catalog, schema, table)
    }

    fn is_spatial(&self) -> bool {
        true
    }

    fn as_spatial_mut(&mut self) -> Option<&mut SpatialConnection> {
        Some(self)
    }
}

/// Data source decorator whose connections are [`SpatialConnection`]s.
pub struct SpatialDataSource {
    inner: Arc<dyn DataSource>,
}

impl SpatialDataSource {
    pub fn new(inner: Arc<dyn DataSource>) -> Self {
        Self { inner }
    }
}

impl DataSource for SpatialDataSource {
    fn connection(&self) -> Result<Box<dyn DbConnection>> {
        Ok(wrap_connection(self.inner.connection()?))
    }

    fn is_spatial(&self) -> bool {
        true
    }
}

/// Return `connection` as a spatial connection, wrapping it only if needed.
pub fn wrap_connection(connection: Box<dyn DbConnection>) -> Box<dyn DbConnection> {
    if connection.is_spatial() {
        connection
    } else {
        debug!("Wrapping {} connection as spatial", connection.dialect());
        Box::new(SpatialConnection::new(connection))
    }
}

/// Return `data_source` as a spatial data source, wrapping it only if needed.
pub fn wrap_spatial_data_source(data_source: Arc<dyn DataSource>) -> Arc<dyn DataSource> {
    if data_source.is_spatial() {
        data_source
    } else {
        Arc::new(SpatialDataSource::new(data_source))
    }
}
