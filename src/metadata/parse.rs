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

//! Result parsing for metadata queries.
//!
//! Turns INFORMATION_SCHEMA result sets into [`TableInfo`], [`ColumnInfo`]
//! and [`PrimaryKeyInfo`]. Field lookup ignores case: PostgreSQL reports
//! `table_name`, H2 reports `TABLE_NAME`. Integer fields are accepted at
//! any width since the engines disagree on them too.

use crate::connection::ResultSet;
use crate::error::{H2gisErrorHelper, Result};
use crate::metadata::type_mapping::{sql_type_code, OTHER};
use crate::metadata::types::{ColumnInfo, PrimaryKeyInfo, TableInfo};
use arrow_array::cast::AsArray;
use arrow_array::types::{
    Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type, UInt32Type,
    UInt64Type, UInt8Type,
};
use arrow_array::{Array, RecordBatch};
use arrow_schema::DataType;

/// Get the 0-based index of a field by name, ignoring case, or return an error.
pub(crate) fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .fields()
        .iter()
        .position(|field| field.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            H2gisErrorHelper::invalid_state()
                .message(format!("Expected column '{}' in metadata result", name))
        })
}

/// Get the 0-based index of a field by name if present, ignoring case.
pub(crate) fn optional_column_index(batch: &RecordBatch, name: &str) -> Option<usize> {
    column_index(batch, name).ok()
}

/// Get a value as a string. Numbers and booleans are rendered; NULL is `None`.
pub(crate) fn get_optional_string_value(
    batch: &RecordBatch,
    col_idx: usize,
    row: usize,
) -> Result<Option<String>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => array.as_string::<i64>().value(row).to_string(),
        DataType::Boolean => array.as_boolean().value(row).to_string(),
        DataType::Float32 => array.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => array.as_primitive::<Float64Type>().value(row).to_string(),
        dt if dt.is_integer() => match get_optional_int_value(batch, col_idx, row)? {
            Some(v) => v.to_string(),
            None => return Ok(None),
        },
        dt => {
            return Err(H2gisErrorHelper::invalid_state()
                .message(format!("Cannot read {:?} value as a string", dt)))
        }
    };
    Ok(Some(value))
}

/// Get a string value, with NULL read as the empty string.
pub(crate) fn get_string_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<String> {
    Ok(get_optional_string_value(batch, col_idx, row)?.unwrap_or_default())
}

/// Get an integer value of any width. Numeric strings are parsed.
pub(crate) fn get_optional_int_value(
    batch: &RecordBatch,
    col_idx: usize,
    row: usize,
) -> Result<Option<i64>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Int8 => array.as_primitive::<Int8Type>().value(row) as i64,
        DataType::Int16 => array.as_primitive::<Int16Type>().value(row) as i64,
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row) as i64,
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row),
        DataType::UInt8 => array.as_primitive::<UInt8Type>().value(row) as i64,
        DataType::UInt16 => array.as_primitive::<UInt16Type>().value(row) as i64,
        DataType::UInt32 => array.as_primitive::<UInt32Type>().value(row) as i64,
        DataType::UInt64 => {
            let v = array.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_err(|_| {
                H2gisErrorHelper::invalid_state().message(format!("Integer {} out of range", v))
            })?
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = get_string_value(batch, col_idx, row)?;
            text.trim().parse::<i64>().map_err(|_| {
                H2gisErrorHelper::invalid_state()
                    .message(format!("Expected integer value, got '{}'", text))
            })?
        }
        dt => {
            return Err(H2gisErrorHelper::invalid_state()
                .message(format!("Expected integer column, got {:?}", dt)))
        }
    };
    Ok(Some(value))
}

/// Parse an INFORMATION_SCHEMA.TABLES listing.
pub fn parse_tables(result: &ResultSet) -> Result<Vec<TableInfo>> {
    let mut tables = Vec::with_capacity(result.row_count());
    for batch in result.batches() {
        let catalog_idx = optional_column_index(batch, "table_catalog");
        let schema_idx = optional_column_index(batch, "table_schema");
        let name_idx = column_index(batch, "table_name")?;
        let type_idx = optional_column_index(batch, "table_type");

        for row in 0..batch.num_rows() {
            tables.push(TableInfo {
                catalog_name: optional_string(batch, catalog_idx, row)?,
                schema_name: optional_string(batch, schema_idx, row)?,
                table_name: get_string_value(batch, name_idx, row)?,
                table_type: optional_string(batch, type_idx, row)?,
            });
        }
    }
    Ok(tables)
}

/// Parse an INFORMATION_SCHEMA.COLUMNS listing.
pub fn parse_columns(result: &ResultSet) -> Result<Vec<ColumnInfo>> {
    let mut columns = Vec::with_capacity(result.row_count());
    for batch in result.batches() {
        let catalog_idx = optional_column_index(batch, "table_catalog");
        let schema_idx = optional_column_index(batch, "table_schema");
        let table_idx = column_index(batch, "table_name")?;
        let column_idx = column_index(batch, "column_name")?;
        let ordinal_idx = column_index(batch, "ordinal_position")?;
        let type_idx = column_index(batch, "data_type")?;
        let type_name_idx = optional_column_index(batch, "type_name");
        let nullable_idx = optional_column_index(batch, "is_nullable");
        // H2 1.x reports DATA_TYPE as the JDBC code and the name in TYPE_NAME.
        let coded_types = batch.column(type_idx).data_type().is_integer();

        for row in 0..batch.num_rows() {
            let type_name = match type_name_idx {
                Some(idx) => get_string_value(batch, idx, row)?,
                None => get_string_value(batch, type_idx, row)?,
            };
            let data_type = if coded_types {
                get_optional_int_value(batch, type_idx, row)?
                    .and_then(|code| i16::try_from(code).ok())
                    .unwrap_or(OTHER)
            } else {
                sql_type_code(&get_string_value(batch, type_idx, row)?)
            };
            let ordinal_position = get_optional_int_value(batch, ordinal_idx, row)?.unwrap_or(0);
            let nullable = optional_string(batch, nullable_idx, row)?;
            columns.push(ColumnInfo {
                catalog_name: optional_string(batch, catalog_idx, row)?,
                schema_name: optional_string(batch, schema_idx, row)?,
                table_name: get_string_value(batch, table_idx, row)?,
                column_name: get_string_value(batch, column_idx, row)?,
                ordinal_position: i32::try_from(ordinal_position).unwrap_or(0),
                data_type,
                type_name,
                nullable: !nullable.eq_ignore_ascii_case("NO"),
            });
        }
    }
    Ok(columns)
}

/// Parse a primary key listing.
pub fn parse_primary_keys(result: &ResultSet) -> Result<Vec<PrimaryKeyInfo>> {
    let mut keys = Vec::with_capacity(result.row_count());
    for batch in result.batches() {
        let catalog_idx = optional_column_index(batch, "table_catalog");
        let schema_idx = optional_column_index(batch, "table_schema");
        let table_idx = column_index(batch, "table_name")?;
        let column_idx = column_index(batch, "column_name")?;
        let seq_idx = optional_column_index(batch, "key_seq");
        let name_idx = optional_column_index(batch, "constraint_name");

        for row in 0..batch.num_rows() {
            let key_seq = match seq_idx {
                Some(idx) => get_optional_int_value(batch, idx, row)?.unwrap_or(0),
                None => 0,
            };
            let pk_name = match name_idx {
                Some(idx) => get_optional_string_value(batch, idx, row)?,
                None => None,
            };
            keys.push(PrimaryKeyInfo {
                catalog_name: optional_string(batch, catalog_idx, row)?,
                schema_name: optional_string(batch, schema_idx, row)?,
                table_name: get_string_value(batch, table_idx, row)?,
                column_name: get_string_value(batch, column_idx, row)?,
                key_seq: i16::try_from(key_seq).unwrap_or(0),
                pk_name,
            });
        }
    }
    Ok(keys)
}

fn optional_string(batch: &RecordBatch, col_idx: Option<usize>, row: usize) -> Result<String> {
    match col_idx {
        Some(idx) => get_string_value(batch, idx, row),
        None => Ok(String::new()),
    }
}
