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

//! SQL builder for INFORMATION_SCHEMA metadata queries.
//!
//! Builds parameterized queries over `INFORMATION_SCHEMA.TABLES`,
//! `INFORMATION_SCHEMA.COLUMNS` and the key constraint views. Every filter
//! value is bound as a parameter; placeholders follow the target dialect.

use crate::dialect::Dialect;
use crate::location::quote_identifier;

/// A query string with the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl BoundQuery {
    /// Parameters as string slices, for [`crate::DbConnection::query`].
    pub fn param_refs(&self) -> Vec<&str> {
        self.params.iter().map(String::as_str).collect()
    }
}

/// Builds INFORMATION_SCHEMA queries with optional catalog, schema, table,
/// column and table type filters.
///
/// # Examples
///
/// ```ignore
/// let query = InformationSchemaQuery::new(Dialect::PostgreSql)
///     .with_schema(Some("public"))
///     .with_table(Some("roads"))
///     .build_list_columns();
/// assert_eq!(query.params, vec!["public", "roads"]);
/// ```
#[derive(Debug, Clone)]
pub struct InformationSchemaQuery {
    dialect: Dialect,
    catalog: Option<String>,
    schema: Option<String>,
    table: Option<String>,
    column: Option<String>,
    table_types: Vec<String>,
}

impl InformationSchemaQuery {
    /// Create a new builder with no filters set.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            catalog: None,
            schema: None,
            table: None,
            column: None,
            table_types: Vec::new(),
        }
    }

    /// Set the catalog filter. `None` or empty disables it.
    pub fn with_catalog(mut self, catalog: Option<&str>) -> Self {
        self.catalog = non_empty(catalog);
        self
    }

    /// Set the schema filter (a LIKE pattern for listings).
    pub fn with_schema(mut self, schema: Option<&str>) -> Self {
        self.schema = non_empty(schema);
        self
    }

    /// Set the table filter (a LIKE pattern for listings).
    pub fn with_table(mut self, table: Option<&str>) -> Self {
        self.table = non_empty(table);
        self
    }

    /// Set the column name filter.
    pub fn with_column(mut self, column: Option<&str>) -> Self {
        self.column = non_empty(column);
        self
    }

    /// Restrict listings to these table types.
    pub fn with_table_types(mut self, types: &[&str]) -> Self {
        self.table_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Build the lookup of one table's row in INFORMATION_SCHEMA.TABLES.
    ///
    /// Names are compared in upper case so the lookup works whatever case
    /// the engine stores identifiers in. Selects every field because the
    /// set of fields differs between engines.
    pub fn build_tables_view(&self) -> BoundQuery {
        let mut filter = Filter::new(self.dialect);
        if let Some(ref catalog) = self.catalog {
            filter.push("UPPER(table_catalog) =", catalog.to_uppercase());
        }
        if let Some(ref schema) = self.schema {
            filter.push("UPPER(table_schema) =", schema.to_uppercase());
        }
        if let Some(ref table) = self.table {
            filter.push("UPPER(table_name) =", table.to_uppercase());
        }
        filter.finish("SELECT * FROM INFORMATION_SCHEMA.TABLES", "")
    }

    /// Build the table listing, with LIKE patterns on schema and table.
    pub fn build_list_tables(&self) -> BoundQuery {
        let mut filter = Filter::new(self.dialect);
        if let Some(ref catalog) = self.catalog {
            filter.push("table_catalog =", catalog.clone());
        }
        if let Some(ref schema) = self.schema {
            filter.push("table_schema LIKE", schema.clone());
        }
        if let Some(ref table) = self.table {
            filter.push("table_name LIKE", table.clone());
        }
        if !self.table_types.is_empty() {
            filter.push_in("table_type", &self.table_types);
        }
        filter.finish(
            "SELECT table_catalog, table_schema, table_name, table_type \
             FROM INFORMATION_SCHEMA.TABLES",
            " ORDER BY table_type, table_catalog, table_schema, table_name",
        )
    }

    /// Build the column listing of one table, in ordinal order.
    ///
    /// On H2 every field is selected: 1.x reports `data_type` as a JDBC code
    /// with the name in `type_name`, which 2.x no longer has.
    pub fn build_list_columns(&self) -> BoundQuery {
        let mut filter = Filter::new(self.dialect);
        if let Some(ref catalog) = self.catalog {
            filter.push("table_catalog =", catalog.clone());
        }
        if let Some(ref schema) = self.schema {
            filter.push("table_schema =", schema.clone());
        }
        if let Some(ref table) = self.table {
            filter.push("table_name =", table.clone());
        }
        if let Some(ref column) = self.column {
            filter.push("column_name =", column.clone());
        }
        let select = match self.dialect {
            Dialect::H2 => "SELECT * FROM INFORMATION_SCHEMA.COLUMNS",
            Dialect::PostgreSql => {
                "SELECT table_catalog, table_schema, table_name, column_name, \
                 ordinal_position, data_type, is_nullable \
                 FROM INFORMATION_SCHEMA.COLUMNS"
            }
        };
        filter.finish(
            select,
            " ORDER BY table_schema, table_name, ordinal_position",
        )
    }

    /// Build the primary key listing of one table, in key order.
    pub fn build_list_primary_keys(&self) -> BoundQuery {
        let mut filter = Filter::new(self.dialect);
        filter.push_literal("tc.constraint_type = 'PRIMARY KEY'");
        if let Some(ref catalog) = self.catalog {
            filter.push("tc.table_catalog =", catalog.clone());
        }
        if let Some(ref schema) = self.schema {
            filter.push("tc.table_schema =", schema.clone());
        }
        if let Some(ref table) = self.table {
            filter.push("tc.table_name =", table.clone());
        }
        filter.finish(
            "SELECT kcu.table_catalog, kcu.table_schema, kcu.table_name, kcu.column_name, \
             kcu.ordinal_position AS key_seq, tc.constraint_name \
             FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc \
             JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu \
             ON tc.constraint_catalog = kcu.constraint_catalog \
             AND tc.constraint_schema = kcu.constraint_schema \
             AND tc.constraint_name = kcu.constraint_name \
             AND tc.table_name = kcu.table_name",
            " ORDER BY kcu.table_schema, kcu.ordinal_position",
        )
    }
}

/// Probe that returns a table's columns and no rows.
pub fn build_probe(table: &str) -> String {
    format!("SELECT * FROM {} LIMIT 0", table)
}

/// Row count of a table.
pub fn build_row_count(table: &str) -> String {
    format!("select count(*) rowcount from {}", table)
}

/// Distinct values of one column.
pub fn build_distinct_values(table: &str, field: &str) -> String {
    format!("SELECT DISTINCT {} FROM {}", quote_identifier(field), table)
}

/// Creation of a table with no columns.
pub fn build_create_empty_table(table: &str) -> String {
    format!("CREATE TABLE {} ()", table)
}

/// Accumulates `WHERE` conditions and their parameters.
struct Filter {
    dialect: Dialect,
    conditions: Vec<String>,
    params: Vec<String>,
}

impl Filter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            conditions: Vec::new(),
            params: Vec::new(),
        }
    }

    fn next_placeholder(&mut self, value: String) -> String {
        self.params.push(value);
        self.dialect.placeholder(self.params.len())
    }

    fn push(&mut self, lhs: &str, value: String) {
        let placeholder = self.next_placeholder(value);
        self.conditions.push(format!("{} {}", lhs, placeholder));
    }

    fn push_in(&mut self, column: &str, values: &[String]) {
        let placeholders: Vec<String> = values
            .iter()
            .map(|value| self.next_placeholder(value.clone()))
            .collect();
        self.conditions
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
    }

    fn push_literal(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    fn finish(self, select: &str, order_by: &str) -> BoundQuery {
        let mut sql = select.to_string();
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        sql.push_str(order_by);
        BoundQuery {
            sql,
            params: self.params,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_view_table_only() {
        let query = InformationSchemaQuery::new(Dialect::H2)
            .with_table(Some("roads"))
            .build_tables_view();
        assert_eq!(
            query.sql,
            "SELECT * FROM INFORMATION_SCHEMA.TABLES WHERE UPPER(table_name) = ?"
        );
        assert_eq!(query.params, vec!["ROADS"]);
    }

    #[test]
    fn test_tables_view_all_segments_postgresql() {
        let query = InformationSchemaQuery::new(Dialect::PostgreSql)
            .with_catalog(Some("gis"))
            .with_schema(Some("public"))
            .with_table(Some("roads"))
            .build_tables_view();
        assert_eq!(
            query.sql,
            "SELECT * FROM INFORMATION_SCHEMA.TABLES WHERE UPPER(table_catalog) = $1 \
             AND UPPER(table_schema) = $2 AND UPPER(table_name) = $3"
        );
        assert_eq!(query.params, vec!["GIS", "PUBLIC", "ROADS"]);
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let query = InformationSchemaQuery::new(Dialect::H2)
            .with_catalog(Some(""))
            .with_schema(None)
            .with_table(Some("roads"))
            .build_tables_view();
        assert_eq!(query.params, vec!["ROADS"]);
    }

    #[test]
    fn test_list_tables_without_filters() {
        let query = InformationSchemaQuery::new(Dialect::H2).build_list_tables();
        assert_eq!(
            query.sql,
            "SELECT table_catalog, table_schema, table_name, table_type \
             FROM INFORMATION_SCHEMA.TABLES \
             ORDER BY table_type, table_catalog, table_schema, table_name"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_list_tables_with_patterns_and_types() {
        let query = InformationSchemaQuery::new(Dialect::PostgreSql)
            .with_schema(Some("pub%"))
            .with_table(Some("road_"))
            .with_table_types(&["BASE TABLE", "VIEW"])
            .build_list_tables();
        assert!(query.sql.contains(
            "WHERE table_schema LIKE $1 AND table_name LIKE $2 AND table_type IN ($3, $4)"
        ));
        assert_eq!(query.params, vec!["pub%", "road_", "BASE TABLE", "VIEW"]);
    }

    #[test]
    fn test_list_columns() {
        let query = InformationSchemaQuery::new(Dialect::H2)
            .with_schema(Some("PUBLIC"))
            .with_table(Some("ROADS"))
            .with_column(Some("GID"))
            .build_list_columns();
        assert!(query
            .sql
            .starts_with("SELECT * FROM INFORMATION_SCHEMA.COLUMNS"));
        assert!(query
            .sql
            .contains("WHERE table_schema = ? AND table_name = ? AND column_name = ?"));
        assert_eq!(query.param_refs(), vec!["PUBLIC", "ROADS", "GID"]);

        let query = InformationSchemaQuery::new(Dialect::PostgreSql)
            .with_table(Some("roads"))
            .build_list_columns();
        assert!(query.sql.contains("ordinal_position, data_type, is_nullable"));
        assert!(query.sql.contains("WHERE table_name = $1"));
    }

    #[test]
    fn test_list_primary_keys() {
        let query = InformationSchemaQuery::new(Dialect::PostgreSql)
            .with_table(Some("roads"))
            .build_list_primary_keys();
        assert!(query
            .sql
            .contains("WHERE tc.constraint_type = 'PRIMARY KEY' AND tc.table_name = $1"));
        assert!(query.sql.contains("KEY_COLUMN_USAGE"));
        assert_eq!(query.params, vec!["roads"]);
    }

    #[test]
    fn test_simple_statements() {
        assert_eq!(build_probe("public.roads"), "SELECT * FROM public.roads LIMIT 0");
        assert_eq!(
            build_row_count("roads"),
            "select count(*) rowcount from roads"
        );
        assert_eq!(
            build_distinct_values("roads", "Type"),
            "SELECT DISTINCT \"Type\" FROM roads"
        );
        assert_eq!(build_create_empty_table("ROADS"), "CREATE TABLE ROADS ()");
    }
}
