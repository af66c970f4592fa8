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

//! Connectivity interface the metadata utilities run against.
//!
//! [`DbConnection`] is the seam between this crate and a database driver.
//! Implementors only need to run SQL; the catalog lookups (`tables`,
//! `columns`, `primary_keys`) default to INFORMATION_SCHEMA queries and can
//! be overridden by drivers with native metadata calls. The ADBC adapter in
//! [`crate::adbc`] is the production implementation.

use crate::dialect::Dialect;
use crate::error::{H2gisErrorHelper, Result};
use crate::metadata::parse::{
    get_optional_int_value, get_optional_string_value, parse_columns, parse_primary_keys,
    parse_tables,
};
use crate::metadata::sql::InformationSchemaQuery;
use crate::metadata::types::{ColumnInfo, PrimaryKeyInfo, TableInfo};
use crate::wrapper::SpatialConnection;
use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::SchemaRef;
use std::sync::Arc;
use tracing::debug;

/// Fully materialized result of a query: its schema plus every batch.
///
/// Column positions in the public API are 1-based.
#[derive(Debug, Clone)]
pub struct ResultSet {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl ResultSet {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// A result with columns but no rows, as returned by a `LIMIT 0` probe.
    pub fn empty(schema: SchemaRef) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Drain a reader into a result set.
    pub fn from_reader(reader: impl RecordBatchReader) -> Result<Self> {
        let schema = reader.schema();
        let mut batches = Vec::new();
        for batch in reader {
            batches.push(batch?);
        }
        Ok(Self::new(schema, batches))
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn column_count(&self) -> usize {
        self.schema.fields().len()
    }

    /// Name of the column at 1-based `index`.
    pub fn column_name(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.schema
            .fields()
            .get(index - 1)
            .map(|field| field.name().as_str())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// 1-based index of the first column named `name`, ignoring case.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.schema
            .fields()
            .iter()
            .position(|field| field.name().eq_ignore_ascii_case(name))
            .map(|index| index + 1)
    }

    pub fn row_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.num_rows()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Value at 0-based `row` and 1-based `column`, rendered as a string.
    pub fn string_value(&self, row: usize, column: usize) -> Result<Option<String>> {
        let (batch, row, col_idx) = self.locate(row, column)?;
        get_optional_string_value(batch, col_idx, row)
    }

    /// Integer value at 0-based `row` and 1-based `column`.
    pub fn int_value(&self, row: usize, column: usize) -> Result<Option<i64>> {
        let (batch, row, col_idx) = self.locate(row, column)?;
        get_optional_int_value(batch, col_idx, row)
    }

    fn locate(&self, row: usize, column: usize) -> Result<(&RecordBatch, usize, usize)> {
        if column == 0 || column > self.column_count() {
            return Err(H2gisErrorHelper::invalid_argument()
                .message(format!("Column index {} out of range", column)));
        }
        let mut offset = row;
        for batch in &self.batches {
            if offset < batch.num_rows() {
                return Ok((batch, offset, column - 1));
            }
            offset -= batch.num_rows();
        }
        Err(H2gisErrorHelper::invalid_argument().message(format!("Row {} out of range", row)))
    }
}

/// Something that can abort a running query from another thread.
pub trait Cancellable: Send + Sync {
    fn cancel(&self) -> Result<()>;
}

/// A live database connection, owned by the caller.
pub trait DbConnection {
    /// Engine behind this connection.
    fn dialect(&self) -> Dialect;

    /// Run a query. `params` are bound, in order, to the placeholders
    /// produced by [`Dialect::placeholder`].
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<ResultSet>;

    /// Run a statement that returns no rows.
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Handle that aborts the query currently running on this connection.
    fn canceller(&self) -> Option<Arc<dyn Cancellable>> {
        None
    }

    /// List tables, filtered by catalog and LIKE patterns on schema and
    /// table name. An empty `types` slice keeps every table type.
    fn tables(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableInfo>> {
        let query = InformationSchemaQuery::new(self.dialect())
            .with_catalog(catalog)
            .with_schema(schema_pattern)
            .with_table(table_pattern)
            .with_table_types(types)
            .build_list_tables();
        debug!("Executing metadata query: {}", query.sql);
        let result = self.query(&query.sql, &query.param_refs())?;
        parse_tables(&result)
    }

    /// Columns of a table, in ordinal order, optionally narrowed to one
    /// column name. Names match exactly as stored.
    fn columns(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        column: Option<&str>,
    ) -> Result<Vec<ColumnInfo>> {
        let query = InformationSchemaQuery::new(self.dialect())
            .with_catalog(catalog)
            .with_schema(schema)
            .with_table(Some(table))
            .with_column(column)
            .build_list_columns();
        debug!("Executing metadata query: {}", query.sql);
        let result = self.query(&query.sql, &query.param_refs())?;
        parse_columns(&result)
    }

    /// Primary key columns of a table, in key order.
    fn primary_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<PrimaryKeyInfo>> {
        let query = InformationSchemaQuery::new(self.dialect())
            .with_catalog(catalog)
            .with_schema(schema)
            .with_table(Some(table))
            .build_list_primary_keys();
        debug!("Executing metadata query: {}", query.sql);
        let result = self.query(&query.sql, &query.param_refs())?;
        parse_primary_keys(&result)
    }

    /// True if this connection already hands out spatial result sets.
    fn is_spatial(&self) -> bool {
        false
    }

    /// Access the spatial decorator when this connection is one.
    fn as_spatial_mut(&mut self) -> Option<&mut SpatialConnection> {
        None
    }
}

impl<C: DbConnection + ?Sized> DbConnection for Box<C> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<ResultSet> {
        (**self).query(sql, params)
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        (**self).execute(sql)
    }

    fn canceller(&self) -> Option<Arc<dyn Cancellable>> {
        (**self).canceller()
    }

    fn tables(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: Option<&str>,
        types: &[&str],
    ) -> Result<Vec<TableInfo>> {
        (**self).tables(catalog, schema_pattern, table_pattern, types)
    }

    fn columns(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        column: Option<&str>,
    ) -> Result<Vec<ColumnInfo>> {
        (**self).columns(catalog, schema, table, column)
    }

    fn primary_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<PrimaryKeyInfo>> {
        (**self).primary_keys(catalog, schema, table)
    }

    fn is_spatial(&self) -> bool {
        (**self).is_spatial()
    }

    fn as_spatial_mut(&mut self) -> Option<&mut SpatialConnection> {
        (**self).as_spatial_mut()
    }
}

/// Factory of connections, shared between threads.
pub trait DataSource: Send + Sync {
    /// Open a new connection.
    fn connection(&self) -> Result<Box<dyn DbConnection>>;

    /// True if connections from this source are already spatial.
    fn is_spatial(&self) -> bool {
        false
    }
}
