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

//! SQL dialect differences between the two supported engines.
//!
//! H2 stores unquoted identifiers in upper case, PostgreSQL in lower case.
//! The two also disagree on parameter placeholders, on the name of the
//! default schema and on which INFORMATION_SCHEMA.TABLES field reports a
//! temporary table.

use crate::error::{H2gisErrorHelper, Result};
use std::fmt;
use std::str::FromStr;

/// Driver name reported by the H2 JDBC driver.
pub const H2_DRIVER_NAME: &str = "H2 JDBC Driver";

/// Package prefix of the H2 driver classes.
pub const H2_DRIVER_PACKAGE_NAME: &str = "org.h2";

/// Words that must be quoted to be used as identifiers on H2.
const H2_RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "ANY", "ARRAY", "AS", "ASYMMETRIC", "AUTHORIZATION", "BETWEEN", "BOTH", "CASE",
    "CAST", "CHECK", "CONSTRAINT", "CROSS", "CURRENT_CATALOG", "CURRENT_DATE", "CURRENT_PATH",
    "CURRENT_ROLE", "CURRENT_SCHEMA", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "DAY",
    "DEFAULT", "DISTINCT", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN",
    "FROM", "FULL", "GROUP", "GROUPS", "HAVING", "HOUR", "IF", "ILIKE", "IN", "INNER",
    "INTERSECT", "INTERVAL", "IS", "JOIN", "KEY", "LEADING", "LEFT", "LIKE", "LIMIT",
    "LOCALTIME", "LOCALTIMESTAMP", "MINUS", "MINUTE", "MONTH", "NATURAL", "NOT", "NULL",
    "OFFSET", "ON", "OR", "ORDER", "OVER", "PARTITION", "PRIMARY", "QUALIFY", "RANGE", "REGEXP",
    "RIGHT", "ROW", "ROWNUM", "ROWS", "SECOND", "SELECT", "SESSION_USER", "SET", "SOME",
    "SYMMETRIC", "SYSTEM_USER", "TABLE", "TO", "TOP", "TRAILING", "TRUE", "UESCAPE", "UNION",
    "UNIQUE", "UNKNOWN", "USER", "USING", "VALUE", "VALUES", "WHEN", "WHERE", "WINDOW", "WITH",
    "YEAR",
];

/// Words that must be quoted to be used as identifiers on PostgreSQL.
const POSTGRESQL_RESERVED_WORDS: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC",
    "AUTHORIZATION", "BINARY", "BOTH", "CASE", "CAST", "CHECK", "COLLATE", "COLLATION", "COLUMN",
    "CONCURRENTLY", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_CATALOG", "CURRENT_DATE",
    "CURRENT_ROLE", "CURRENT_SCHEMA", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER",
    "DEFAULT", "DEFERRABLE", "DESC", "DISTINCT", "DO", "ELSE", "END", "EXCEPT", "FALSE", "FETCH",
    "FOR", "FOREIGN", "FREEZE", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "ILIKE", "IN",
    "INITIALLY", "INNER", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "LATERAL", "LEADING",
    "LEFT", "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "NATURAL", "NOT", "NOTNULL", "NULL",
    "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER", "OVERLAPS", "PLACING", "PRIMARY",
    "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SESSION_USER", "SIMILAR", "SOME", "SYMMETRIC",
    "TABLE", "TABLESAMPLE", "THEN", "TO", "TRAILING", "TRUE", "UNION", "UNIQUE", "USER",
    "USING", "VARIADIC", "VERBOSE", "WHEN", "WHERE", "WINDOW", "WITH",
];

/// The database engine a connection talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    H2,
    #[default]
    PostgreSql,
}

impl Dialect {
    /// Guess the engine from a driver or vendor name.
    ///
    /// H2 is recognised by its driver package prefix, its JDBC driver name or
    /// a vendor name of `H2`; every other engine is handled as PostgreSQL.
    pub fn detect(driver_name: &str) -> Self {
        let name = driver_name.trim();
        if name.starts_with(H2_DRIVER_PACKAGE_NAME)
            || name == H2_DRIVER_NAME
            || name
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| word.eq_ignore_ascii_case("h2"))
        {
            Dialect::H2
        } else {
            Dialect::PostgreSql
        }
    }

    pub fn is_h2(self) -> bool {
        self == Dialect::H2
    }

    /// Fold an unquoted identifier to the case the engine stores it in.
    pub fn fold_case(self, identifier: &str) -> String {
        match self {
            Dialect::H2 => identifier.to_uppercase(),
            Dialect::PostgreSql => identifier.to_lowercase(),
        }
    }

    /// True if the identifier can be written without quotes and still
    /// resolve to itself: a letter followed by letters, digits and
    /// underscores, all in the engine's storage case.
    pub fn is_plain_identifier(self, identifier: &str) -> bool {
        let mut chars = identifier.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        match self {
            Dialect::H2 => {
                first.is_ascii_uppercase()
                    && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            }
            Dialect::PostgreSql => {
                first.is_ascii_lowercase()
                    && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            }
        }
    }

    /// True if the identifier is a reserved word of this engine.
    pub fn is_reserved(self, identifier: &str) -> bool {
        let upper = identifier.to_ascii_uppercase();
        let words = match self {
            Dialect::H2 => H2_RESERVED_WORDS,
            Dialect::PostgreSql => POSTGRESQL_RESERVED_WORDS,
        };
        words.contains(&upper.as_str())
    }

    /// Placeholder for the 1-based statement parameter `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::H2 => "?".to_string(),
            Dialect::PostgreSql => format!("${}", index),
        }
    }

    /// INFORMATION_SCHEMA.TABLES field holding the temporary flag.
    pub fn temporary_type_field(self) -> &'static str {
        match self {
            Dialect::H2 => "STORAGE_TYPE",
            Dialect::PostgreSql => "TABLE_TYPE",
        }
    }

    /// Schema unqualified tables are created in.
    pub fn default_schema(self) -> &'static str {
        match self {
            Dialect::H2 => "PUBLIC",
            Dialect::PostgreSql => "public",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::H2 => f.write_str("h2"),
            Dialect::PostgreSql => f.write_str("postgresql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h2" | "h2gis" => Ok(Dialect::H2),
            "postgresql" | "postgres" | "postgis" | "pg" => Ok(Dialect::PostgreSql),
            _ => Err(H2gisErrorHelper::invalid_argument().message(format!("Unknown dialect: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Dialect::detect("org.h2.jdbc.JdbcConnection"), Dialect::H2);
        assert_eq!(Dialect::detect(H2_DRIVER_NAME), Dialect::H2);
        assert_eq!(Dialect::detect("H2"), Dialect::H2);
        assert_eq!(Dialect::detect("PostgreSQL"), Dialect::PostgreSql);
        assert_eq!(Dialect::detect("adbc_driver_postgresql"), Dialect::PostgreSql);
        // "h2" must be a whole word, not a substring
        assert_eq!(Dialect::detect("sh2x"), Dialect::PostgreSql);
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(Dialect::H2.fold_case("Roads"), "ROADS");
        assert_eq!(Dialect::PostgreSql.fold_case("Roads"), "roads");
    }

    #[test]
    fn test_is_plain_identifier() {
        assert!(Dialect::H2.is_plain_identifier("ROADS_2"));
        assert!(!Dialect::H2.is_plain_identifier("roads"));
        assert!(!Dialect::H2.is_plain_identifier("2ROADS"));
        assert!(Dialect::PostgreSql.is_plain_identifier("roads_2"));
        assert!(!Dialect::PostgreSql.is_plain_identifier("Roads"));
        assert!(!Dialect::PostgreSql.is_plain_identifier("my table"));
        assert!(!Dialect::PostgreSql.is_plain_identifier(""));
    }

    #[test]
    fn test_is_reserved() {
        assert!(Dialect::H2.is_reserved("order"));
        assert!(Dialect::PostgreSql.is_reserved("USER"));
        assert!(!Dialect::PostgreSql.is_reserved("roads"));
        // ROWNUM is only reserved on H2
        assert!(Dialect::H2.is_reserved("rownum"));
        assert!(!Dialect::PostgreSql.is_reserved("rownum"));
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(Dialect::H2.placeholder(2), "?");
        assert_eq!(Dialect::PostgreSql.placeholder(2), "$2");
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("H2".parse::<Dialect>().unwrap(), Dialect::H2);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert!("oracle".parse::<Dialect>().is_err());
        assert_eq!(Dialect::PostgreSql.to_string(), "postgresql");
    }
}
