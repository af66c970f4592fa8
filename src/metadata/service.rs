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

//! Metadata helpers over a [`DbConnection`].
//!
//! Each function issues one or two short read-only queries, scans the result
//! and returns a plain value. String table references are resolved with the
//! connection's dialect, so unquoted names follow the engine's case rules and
//! quoted names are used verbatim.
//!
//! ## Example
//!
//! ```ignore
//! use h2gis_utilities::metadata::service;
//!
//! let location = TableLocation::parse_with("public.roads", connection.dialect())?;
//! if service::table_exists(&mut connection, &location) {
//!     let columns = service::column_names(&mut connection, &location)?;
//!     let key = service::integer_primary_key_name_and_index(&mut connection, &location)?;
//! }
//! ```

use crate::connection::{DbConnection, ResultSet};
use crate::error::{H2gisErrorHelper, Result};
use crate::location::TableLocation;
use crate::metadata::parse::{get_optional_int_value, get_optional_string_value, get_string_value, optional_column_index};
use crate::metadata::sql::{
    build_create_empty_table, build_distinct_values, build_probe, build_row_count,
    InformationSchemaQuery,
};
use crate::metadata::type_mapping::is_integer_key_type;
use crate::metadata::types::ColumnPosition;
use arrow_array::RecordBatch;
use tracing::debug;

/// Resolve a free-form table reference with the connection's case rules.
fn resolve(connection: &dyn DbConnection, table_reference: &str) -> Result<TableLocation> {
    TableLocation::parse_with(table_reference, connection.dialect())
}

/// Run the `LIMIT 0` probe of a table and return its (empty) result.
fn probe(connection: &mut dyn DbConnection, location: &TableLocation) -> Result<ResultSet> {
    let sql = build_probe(&location.to_sql(connection.dialect()));
    debug!("Executing probe query: {}", sql);
    connection.query(&sql, &[])
}

/// True if the table has a field named `field_name`, ignoring case.
///
/// Any failure, including a missing table, yields `false`.
pub fn has_field(connection: &mut dyn DbConnection, table_reference: &str, field_name: &str) -> bool {
    let result = resolve(connection, table_reference).and_then(|location| probe(connection, &location));
    match result {
        Ok(result) => field_index(&result, field_name).is_some(),
        Err(e) => {
            debug!("Field lookup on {} failed: {}", table_reference, e);
            false
        }
    }
}

/// 1-based index of the field named `field_name` in a result, ignoring case.
pub fn field_index(result: &ResultSet, field_name: &str) -> Option<usize> {
    result.find_column(field_name)
}

/// Name of the column at 1-based `column_index` in a result.
pub fn column_name_at(result: &ResultSet, column_index: usize) -> Option<String> {
    result.column_name(column_index).map(str::to_string)
}

/// Name of the table column at 1-based `column_index`, `None` when the
/// position is out of range.
pub fn column_name(
    connection: &mut dyn DbConnection,
    location: &TableLocation,
    column_index: usize,
) -> Result<Option<String>> {
    let result = probe(connection, location)?;
    Ok(column_name_at(&result, column_index))
}

/// Every column name of a table, in order.
pub fn column_names(connection: &mut dyn DbConnection, location: &TableLocation) -> Result<Vec<String>> {
    let result = probe(connection, location)?;
    Ok(result_column_names(&result))
}

/// Every column name of a result, in order.
pub fn result_column_names(result: &ResultSet) -> Vec<String> {
    result.column_names()
}

/// Every column name of a table with its 1-based position.
pub fn column_names_and_indexes(
    connection: &mut dyn DbConnection,
    location: &TableLocation,
) -> Result<Vec<ColumnPosition>> {
    let result = probe(connection, location)?;
    Ok(result
        .column_names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| ColumnPosition::new(name, i + 1))
        .collect())
}

/// Number of rows in a table.
pub fn row_count(connection: &mut dyn DbConnection, location: &TableLocation) -> Result<i64> {
    let sql = build_row_count(&location.to_sql(connection.dialect()));
    debug!("Executing row count query: {}", sql);
    let result = connection.query(&sql, &[])?;
    match first_row(&result) {
        Some((batch, row)) => Ok(get_optional_int_value(batch, 0, row)?.unwrap_or(0)),
        None => Ok(0),
    }
}

/// Number of rows in the table named by a free-form reference.
pub fn row_count_of(connection: &mut dyn DbConnection, table_reference: &str) -> Result<i64> {
    let location = resolve(connection, table_reference)?;
    row_count(connection, &location)
}

/// True if INFORMATION_SCHEMA.TABLES reports the table as temporary.
///
/// Fails if the table does not exist.
pub fn is_temporary_table(connection: &mut dyn DbConnection, table_reference: &str) -> Result<bool> {
    let dialect = connection.dialect();
    let (location, result) = tables_view(connection, table_reference)?;
    let (batch, row) = first_row(&result).ok_or_else(|| missing_table(&location))?;

    let type_idx = optional_column_index(batch, dialect.temporary_type_field())
        .or_else(|| optional_column_index(batch, "TABLE_TYPE"))
        .ok_or_else(|| {
            H2gisErrorHelper::invalid_state()
                .message("INFORMATION_SCHEMA.TABLES has no table type field")
        })?;
    let table_type = get_string_value(batch, type_idx, row)?;
    Ok(table_type.to_uppercase().contains("TEMPORARY"))
}

/// True if INFORMATION_SCHEMA.TABLES reports the table as a linked table.
///
/// Fails if the table does not exist.
pub fn is_linked_table(connection: &mut dyn DbConnection, table_reference: &str) -> Result<bool> {
    let (location, result) = tables_view(connection, table_reference)?;
    let (batch, row) = first_row(&result).ok_or_else(|| missing_table(&location))?;

    let table_type = match optional_column_index(batch, "TABLE_TYPE") {
        Some(idx) => get_string_value(batch, idx, row)?,
        None => String::new(),
    };
    Ok(table_type.to_uppercase().contains("TABLE LINK"))
}

fn tables_view(
    connection: &mut dyn DbConnection,
    table_reference: &str,
) -> Result<(TableLocation, ResultSet)> {
    let location = TableLocation::parse(table_reference)?;
    let query = InformationSchemaQuery::new(connection.dialect())
        .with_catalog(location.catalog())
        .with_schema(location.schema())
        .with_table(Some(location.table_name()))
        .build_tables_view();
    debug!("Executing metadata query: {}", query.sql);
    let result = connection.query(&query.sql, &query.param_refs())?;
    Ok((location, result))
}

/// True if the connection talks to an H2 database.
pub fn is_h2_database(connection: &dyn DbConnection) -> bool {
    connection.dialect().is_h2()
}

/// 1-based position of the table's integer primary key column.
///
/// `None` when the table has no primary key, a primary key over more than
/// one column, or a key column outside the integer family. Fails if the
/// table does not exist.
pub fn integer_primary_key(
    connection: &mut dyn DbConnection,
    location: &TableLocation,
) -> Result<Option<usize>> {
    Ok(integer_primary_key_name_and_index(connection, location)?.map(|key| key.index))
}

/// Name and 1-based position of the table's integer primary key column.
///
/// Same rules as [`integer_primary_key`]. When the location has no schema
/// only keys of the engine's default schema are considered.
pub fn integer_primary_key_name_and_index(
    connection: &mut dyn DbConnection,
    location: &TableLocation,
) -> Result<Option<ColumnPosition>> {
    if !table_exists(connection, location) {
        return Err(H2gisErrorHelper::not_found().message(format!("Table {} not found.", location)));
    }
    let default_schema = connection.dialect().default_schema();
    let in_scope = |schema_name: &str| {
        location.schema().is_some() || schema_name.eq_ignore_ascii_case(default_schema)
    };

    let keys = connection.primary_keys(location.catalog(), location.schema(), location.table_name())?;
    let key_columns: Vec<String> = keys
        .into_iter()
        .filter(|key| in_scope(&key.schema_name))
        .map(|key| key.column_name)
        .collect();
    let [key_column] = key_columns.as_slice() else {
        debug!(
            "Table {} has {} primary key columns, expected one",
            location,
            key_columns.len()
        );
        return Ok(None);
    };

    let columns = connection.columns(
        location.catalog(),
        location.schema(),
        location.table_name(),
        Some(key_column),
    )?;
    Ok(columns
        .into_iter()
        .filter(|column| in_scope(&column.schema_name))
        .find(|column| is_integer_key_type(column.data_type))
        .and_then(|column| usize::try_from(column.ordinal_position).ok())
        .map(|index| ColumnPosition::new(key_column.clone(), index)))
}

/// True if the table can be queried. Any failure yields `false`.
pub fn table_exists(connection: &mut dyn DbConnection, location: &TableLocation) -> bool {
    match probe(connection, location) {
        Ok(_) => true,
        Err(e) => {
            debug!("Table {} is not reachable: {}", location, e);
            false
        }
    }
}

/// Names of the tables matching the filters, rendered for use in SQL on
/// this connection.
///
/// `catalog` must match exactly; the schema and table patterns use LIKE
/// syntax. An empty `types` slice keeps every table type.
pub fn table_names(
    connection: &mut dyn DbConnection,
    catalog: Option<&str>,
    schema_pattern: Option<&str>,
    table_pattern: Option<&str>,
    types: &[&str],
) -> Result<Vec<String>> {
    let dialect = connection.dialect();
    let tables = connection.tables(catalog, schema_pattern, table_pattern, types)?;
    debug!("Found {} tables", tables.len());
    Ok(tables
        .iter()
        .map(|info| TableLocation::from(info).to_sql(dialect))
        .collect())
}

/// Distinct values of a field, rendered as strings. NULL is `None`.
pub fn unique_field_values(
    connection: &mut dyn DbConnection,
    table_reference: &str,
    field_name: &str,
) -> Result<Vec<Option<String>>> {
    let location = resolve(connection, table_reference)?;
    let sql = build_distinct_values(&location.to_sql(connection.dialect()), field_name);
    debug!("Executing distinct values query: {}", sql);
    let result = connection.query(&sql, &[])?;

    let mut values = Vec::with_capacity(result.row_count());
    for batch in result.batches() {
        for row in 0..batch.num_rows() {
            values.push(get_optional_string_value(batch, 0, row)?);
        }
    }
    Ok(values)
}

/// Create a table with no columns.
pub fn create_empty_table(connection: &mut dyn DbConnection, table_reference: &str) -> Result<()> {
    let location = resolve(connection, table_reference)?;
    let sql = build_create_empty_table(&location.to_sql(connection.dialect()));
    debug!("Executing DDL: {}", sql);
    connection.execute(&sql)
}

fn first_row(result: &ResultSet) -> Option<(&RecordBatch, usize)> {
    result
        .batches()
        .iter()
        .find(|batch| batch.num_rows() > 0)
        .map(|batch| (batch, 0))
}

fn missing_table(location: &TableLocation) -> crate::error::Error {
    H2gisErrorHelper::not_found().message(format!("The table {} does not exist", location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::error::ErrorKind;
    use crate::testing::{string_batch, FakeConnection};
    use arrow_array::{ArrayRef, Int32Array, Int64Array, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use std::sync::Arc;

    fn roads_probe() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("GID", DataType::Int32, false),
            Field::new("THE_GEOM", DataType::Binary, true),
            Field::new("NAME", DataType::Utf8, true),
        ]));
        RecordBatch::new_empty(schema)
    }

    fn h2_roads() -> FakeConnection {
        FakeConnection::new(Dialect::H2).with_response("FROM ROADS LIMIT 0", roads_probe())
    }

    fn key_batch(rows: Vec<(&str, &str)>) -> RecordBatch {
        string_batch(
            &["TABLE_SCHEMA", "TABLE_NAME", "COLUMN_NAME"],
            rows.into_iter()
                .map(|(schema, column)| vec![Some(schema), Some("ROADS"), Some(column)])
                .collect(),
        )
    }

    fn column_batch(rows: Vec<(&str, &str, i32, &str)>) -> RecordBatch {
        RecordBatch::try_from_iter(vec![
            (
                "TABLE_SCHEMA",
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r.0).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
            (
                "TABLE_NAME",
                Arc::new(StringArray::from(vec!["ROADS"; rows.len()])) as ArrayRef,
            ),
            (
                "COLUMN_NAME",
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r.1).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
            (
                "ORDINAL_POSITION",
                Arc::new(Int32Array::from(
                    rows.iter().map(|r| r.2).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
            (
                "DATA_TYPE",
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r.3).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_has_field_ignores_case() {
        let mut conn = h2_roads();
        assert!(has_field(&mut conn, "roads", "the_geom"));
        assert!(has_field(&mut conn, "ROADS", "Name"));
        assert!(!has_field(&mut conn, "roads", "speed"));
    }

    #[test]
    fn test_has_field_missing_table_is_false() {
        let mut conn = h2_roads();
        assert!(!has_field(&mut conn, "rivers", "gid"));
        assert!(!has_field(&mut conn, "a.b.c.d", "gid"));
    }

    #[test]
    fn test_field_index_and_column_name_at() {
        let result = ResultSet::empty(roads_probe().schema());
        assert_eq!(field_index(&result, "name"), Some(3));
        assert_eq!(field_index(&result, "speed"), None);
        assert_eq!(column_name_at(&result, 2), Some("THE_GEOM".to_string()));
        assert_eq!(column_name_at(&result, 9), None);
    }

    #[test]
    fn test_column_names_and_indexes() {
        let mut conn = h2_roads();
        let location = TableLocation::table("ROADS");
        assert_eq!(
            column_names(&mut conn, &location).unwrap(),
            vec!["GID", "THE_GEOM", "NAME"]
        );
        assert_eq!(
            column_names_and_indexes(&mut conn, &location).unwrap(),
            vec![
                ColumnPosition::new("GID", 1),
                ColumnPosition::new("THE_GEOM", 2),
                ColumnPosition::new("NAME", 3),
            ]
        );
        assert_eq!(
            column_name(&mut conn, &location, 2).unwrap(),
            Some("THE_GEOM".to_string())
        );
        assert_eq!(column_name(&mut conn, &location, 4).unwrap(), None);
    }

    #[test]
    fn test_column_names_missing_table_errors() {
        let mut conn = h2_roads();
        assert!(column_names(&mut conn, &TableLocation::table("RIVERS")).is_err());
    }

    #[test]
    fn test_row_count() {
        let count = RecordBatch::try_from_iter(vec![(
            "rowcount",
            Arc::new(Int64Array::from(vec![12])) as ArrayRef,
        )])
        .unwrap();
        let mut conn = FakeConnection::new(Dialect::PostgreSql).with_response("count(*)", count);
        assert_eq!(row_count_of(&mut conn, "Public.Roads").unwrap(), 12);
        let (sql, _) = conn.last_query().unwrap();
        assert_eq!(sql, "select count(*) rowcount from public.roads");
    }

    #[test]
    fn test_row_count_missing_table_errors() {
        let mut conn = FakeConnection::new(Dialect::PostgreSql);
        assert!(row_count(&mut conn, &TableLocation::table("roads")).is_err());
    }

    #[test]
    fn test_is_temporary_table_h2_storage_type() {
        let view = string_batch(
            &["TABLE_NAME", "TABLE_TYPE", "STORAGE_TYPE"],
            vec![vec![Some("TMP"), Some("TABLE"), Some("GLOBAL TEMPORARY")]],
        );
        let mut conn =
            FakeConnection::new(Dialect::H2).with_response("INFORMATION_SCHEMA.TABLES", view);
        assert!(is_temporary_table(&mut conn, "tmp").unwrap());
        let (_, params) = conn.last_query().unwrap();
        assert_eq!(params, vec!["TMP".to_string()]);
    }

    #[test]
    fn test_is_temporary_table_falls_back_to_table_type() {
        let view = string_batch(
            &["table_name", "table_type"],
            vec![vec![Some("tmp"), Some("LOCAL TEMPORARY")]],
        );
        let mut conn =
            FakeConnection::new(Dialect::H2).with_response("INFORMATION_SCHEMA.TABLES", view);
        assert!(is_temporary_table(&mut conn, "tmp").unwrap());

        let view = string_batch(
            &["table_name", "table_type"],
            vec![vec![Some("roads"), Some("BASE TABLE")]],
        );
        let mut conn = FakeConnection::new(Dialect::PostgreSql)
            .with_response("INFORMATION_SCHEMA.TABLES", view);
        assert!(!is_temporary_table(&mut conn, "public.roads").unwrap());
    }

    #[test]
    fn test_is_temporary_table_missing_table_errors() {
        let view = string_batch(&["table_name", "table_type"], vec![]);
        let mut conn = FakeConnection::new(Dialect::PostgreSql)
            .with_response("INFORMATION_SCHEMA.TABLES", view);
        let err = is_temporary_table(&mut conn, "nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_is_linked_table() {
        let view = string_batch(
            &["TABLE_NAME", "TABLE_TYPE"],
            vec![vec![Some("REMOTE"), Some("TABLE LINK")]],
        );
        let mut conn =
            FakeConnection::new(Dialect::H2).with_response("INFORMATION_SCHEMA.TABLES", view);
        assert!(is_linked_table(&mut conn, "PUBLIC.REMOTE").unwrap());
        let (sql, params) = conn.last_query().unwrap();
        assert!(sql.contains("UPPER(table_schema) = ?"));
        assert_eq!(params, vec!["PUBLIC".to_string(), "REMOTE".to_string()]);

        let empty = string_batch(&["TABLE_NAME", "TABLE_TYPE"], vec![]);
        let mut conn =
            FakeConnection::new(Dialect::H2).with_response("INFORMATION_SCHEMA.TABLES", empty);
        assert!(is_linked_table(&mut conn, "REMOTE").is_err());
    }

    #[test]
    fn test_is_h2_database() {
        assert!(is_h2_database(&FakeConnection::new(Dialect::H2)));
        assert!(!is_h2_database(&FakeConnection::new(Dialect::PostgreSql)));
    }

    #[test]
    fn test_integer_primary_key_single_column() {
        let mut conn = h2_roads()
            .with_response("KEY_COLUMN_USAGE", key_batch(vec![("PUBLIC", "GID")]))
            .with_response(
                "INFORMATION_SCHEMA.COLUMNS",
                column_batch(vec![("PUBLIC", "GID", 1, "INTEGER")]),
            );
        let location = TableLocation::table("ROADS");
        assert_eq!(
            integer_primary_key_name_and_index(&mut conn, &location).unwrap(),
            Some(ColumnPosition::new("GID", 1))
        );
        assert_eq!(integer_primary_key(&mut conn, &location).unwrap(), Some(1));
    }

    #[test]
    fn test_integer_primary_key_from_type_codes() {
        let columns = RecordBatch::try_from_iter(vec![
            (
                "TABLE_SCHEMA",
                Arc::new(StringArray::from(vec!["PUBLIC"])) as ArrayRef,
            ),
            (
                "TABLE_NAME",
                Arc::new(StringArray::from(vec!["ROADS"])) as ArrayRef,
            ),
            (
                "COLUMN_NAME",
                Arc::new(StringArray::from(vec!["GID"])) as ArrayRef,
            ),
            ("ORDINAL_POSITION", Arc::new(Int32Array::from(vec![1])) as ArrayRef),
            ("DATA_TYPE", Arc::new(Int32Array::from(vec![4])) as ArrayRef),
            (
                "TYPE_NAME",
                Arc::new(StringArray::from(vec!["INTEGER"])) as ArrayRef,
            ),
            (
                "IS_NULLABLE",
                Arc::new(StringArray::from(vec!["NO"])) as ArrayRef,
            ),
        ])
        .unwrap();
        let mut conn = h2_roads()
            .with_response("KEY_COLUMN_USAGE", key_batch(vec![("PUBLIC", "GID")]))
            .with_response("INFORMATION_SCHEMA.COLUMNS", columns);
        let location = TableLocation::table("ROADS");
        assert_eq!(integer_primary_key(&mut conn, &location).unwrap(), Some(1));
    }

    #[test]
    fn test_integer_primary_key_two_columns_is_none() {
        let mut conn = h2_roads().with_response(
            "KEY_COLUMN_USAGE",
            key_batch(vec![("PUBLIC", "GID"), ("PUBLIC", "NAME")]),
        );
        let location = TableLocation::table("ROADS");
        assert_eq!(
            integer_primary_key_name_and_index(&mut conn, &location).unwrap(),
            None
        );
        assert_eq!(integer_primary_key(&mut conn, &location).unwrap(), None);
    }

    #[test]
    fn test_integer_primary_key_non_integer_is_none() {
        let mut conn = h2_roads()
            .with_response("KEY_COLUMN_USAGE", key_batch(vec![("PUBLIC", "NAME")]))
            .with_response(
                "INFORMATION_SCHEMA.COLUMNS",
                column_batch(vec![("PUBLIC", "NAME", 3, "CHARACTER VARYING")]),
            );
        let location = TableLocation::table("ROADS");
        assert_eq!(integer_primary_key(&mut conn, &location).unwrap(), None);
    }

    #[test]
    fn test_integer_primary_key_ignores_other_schemas_without_schema() {
        // Same table name in another schema must not make the key composite.
        let mut conn = h2_roads()
            .with_response(
                "KEY_COLUMN_USAGE",
                key_batch(vec![("PUBLIC", "GID"), ("ARCHIVE", "OLD_ID")]),
            )
            .with_response(
                "INFORMATION_SCHEMA.COLUMNS",
                column_batch(vec![
                    ("ARCHIVE", "GID", 4, "INTEGER"),
                    ("PUBLIC", "GID", 1, "BIGINT"),
                ]),
            );
        let location = TableLocation::table("ROADS");
        assert_eq!(
            integer_primary_key_name_and_index(&mut conn, &location).unwrap(),
            Some(ColumnPosition::new("GID", 1))
        );
    }

    #[test]
    fn test_integer_primary_key_missing_table_errors() {
        let mut conn = FakeConnection::new(Dialect::H2);
        let err = integer_primary_key(&mut conn, &TableLocation::table("NOPE")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_table_exists() {
        let mut conn = h2_roads();
        assert!(table_exists(&mut conn, &TableLocation::table("ROADS")));
        assert!(!table_exists(&mut conn, &TableLocation::table("RIVERS")));
    }

    #[test]
    fn test_table_exists_swallows_driver_failure() {
        let mut conn = FakeConnection::new(Dialect::PostgreSql)
            .with_failure("LIMIT 0", "permission denied for table roads");
        assert!(!table_exists(&mut conn, &TableLocation::table("roads")));
        assert!(!has_field(&mut conn, "roads", "gid"));
        assert_eq!(conn.queries().len(), 2);
    }

    #[test]
    fn test_table_names_use_dialect_quoting() {
        let listing = string_batch(
            &["TABLE_CATALOG", "TABLE_SCHEMA", "TABLE_NAME", "TABLE_TYPE"],
            vec![
                vec![Some("GIS"), Some("PUBLIC"), Some("ROADS"), Some("TABLE")],
                vec![Some("GIS"), Some("PUBLIC"), Some("My Roads"), Some("TABLE")],
            ],
        );
        let mut conn =
            FakeConnection::new(Dialect::H2).with_response("INFORMATION_SCHEMA.TABLES", listing);
        let names = table_names(&mut conn, None, Some("PUBLIC"), None, &["TABLE"]).unwrap();
        assert_eq!(names, vec!["GIS.PUBLIC.ROADS", "GIS.PUBLIC.\"My Roads\""]);
    }

    #[test]
    fn test_unique_field_values() {
        let values = string_batch(&["type"], vec![vec![Some("primary")], vec![None]]);
        let mut conn = FakeConnection::new(Dialect::PostgreSql).with_response("DISTINCT", values);
        assert_eq!(
            unique_field_values(&mut conn, "roads", "type").unwrap(),
            vec![Some("primary".to_string()), None]
        );
        let (sql, _) = conn.last_query().unwrap();
        assert_eq!(sql, "SELECT DISTINCT \"type\" FROM roads");
    }

    #[test]
    fn test_create_empty_table() {
        let mut conn = FakeConnection::new(Dialect::H2);
        create_empty_table(&mut conn, "public.empty").unwrap();
        assert_eq!(conn.executed(), ["CREATE TABLE PUBLIC.EMPTY ()".to_string()]);
    }
}
