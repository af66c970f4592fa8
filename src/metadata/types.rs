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

//! Data structures for metadata query results.
//!
//! These types represent the rows read from the INFORMATION_SCHEMA views
//! (`TABLES`, `COLUMNS`, `KEY_COLUMN_USAGE`) and the column descriptors the
//! utility functions hand back to callers.

/// Table information from INFORMATION_SCHEMA.TABLES.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    /// The name of the catalog containing this table.
    pub catalog_name: String,
    /// The name of the schema containing this table.
    pub schema_name: String,
    /// The name of the table.
    pub table_name: String,
    /// The type of the table (e.g., "BASE TABLE", "VIEW", "TABLE LINK").
    pub table_type: String,
}

/// Column information from INFORMATION_SCHEMA.COLUMNS.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    /// The name of the catalog containing this column's table.
    pub catalog_name: String,
    /// The name of the schema containing this column's table.
    pub schema_name: String,
    /// The name of the table containing this column.
    pub table_name: String,
    /// The name of the column.
    pub column_name: String,
    /// The 1-based position of the column in the table.
    pub ordinal_position: i32,
    /// The engine-specific type name (e.g., "integer", "BIGINT", "geometry").
    pub type_name: String,
    /// The JDBC type code derived from `type_name`.
    pub data_type: i16,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// Primary key column from INFORMATION_SCHEMA.KEY_COLUMN_USAGE.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKeyInfo {
    /// The name of the catalog containing the table.
    pub catalog_name: String,
    /// The name of the schema containing the table.
    pub schema_name: String,
    /// The name of the table.
    pub table_name: String,
    /// The name of the column that is part of the primary key.
    pub column_name: String,
    /// The sequence number of this column in the primary key (1-based).
    pub key_seq: i16,
    /// The name of the primary key constraint, if any.
    pub pk_name: Option<String>,
}

/// A column name with its 1-based position in a table or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPosition {
    pub name: String,
    pub index: usize,
}

impl ColumnPosition {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}
