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

//! Engine type name → JDBC type code mapping.
//!
//! INFORMATION_SCHEMA.COLUMNS reports types by name, spelled differently by
//! H2 (`INTEGER`, `CHARACTER VARYING`) and PostgreSQL (`integer`, `int4`,
//! `character varying`). Primary key lookup only needs to know whether a
//! column belongs to the integer family, which the codes make explicit.

pub const BIT: i16 = -7;
pub const TINYINT: i16 = -6;
pub const SMALLINT: i16 = 5;
pub const INTEGER: i16 = 4;
pub const BIGINT: i16 = -5;
pub const REAL: i16 = 7;
pub const DOUBLE: i16 = 8;
pub const DECIMAL: i16 = 3;
pub const CHAR: i16 = 1;
pub const VARCHAR: i16 = 12;
pub const VARBINARY: i16 = -3;
pub const DATE: i16 = 91;
pub const TIME: i16 = 92;
pub const TIMESTAMP: i16 = 93;
pub const ROWID: i16 = -8;
pub const OTHER: i16 = 1111;

/// Map an engine type name to a JDBC type code.
pub fn sql_type_code(type_name: &str) -> i16 {
    let type_upper = type_name.to_uppercase();
    let base_type = type_upper.split('(').next().unwrap_or(&type_upper).trim();

    match base_type {
        "BOOLEAN" | "BOOL" | "BIT" => BIT,
        "TINYINT" => TINYINT,
        "SMALLINT" | "INT2" | "SMALLSERIAL" => SMALLINT,
        "INT" | "INTEGER" | "INT4" | "SERIAL" | "SERIAL4" => INTEGER,
        "BIGINT" | "INT8" | "BIGSERIAL" | "SERIAL8" => BIGINT,
        "REAL" | "FLOAT4" => REAL,
        "DOUBLE" | "DOUBLE PRECISION" | "FLOAT" | "FLOAT8" => DOUBLE,
        "DECIMAL" | "NUMERIC" | "DEC" => DECIMAL,
        "CHAR" | "CHARACTER" | "BPCHAR" => CHAR,
        "VARCHAR" | "CHARACTER VARYING" | "TEXT" | "VARCHAR_IGNORECASE" => VARCHAR,
        "BINARY" | "VARBINARY" | "BINARY VARYING" | "BYTEA" => VARBINARY,
        "DATE" => DATE,
        "TIME" | "TIME WITHOUT TIME ZONE" => TIME,
        "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" => TIMESTAMP,
        "ROWID" | "OID" => ROWID,
        _ => OTHER,
    }
}

/// True for the column types usable as an edition key: INTEGER, BIGINT
/// and ROWID.
pub fn is_integer_key_type(code: i16) -> bool {
    matches!(code, INTEGER | BIGINT | ROWID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_code_h2_names() {
        assert_eq!(sql_type_code("INTEGER"), INTEGER);
        assert_eq!(sql_type_code("BIGINT"), BIGINT);
        assert_eq!(sql_type_code("CHARACTER VARYING"), VARCHAR);
        assert_eq!(sql_type_code("DOUBLE PRECISION"), DOUBLE);
        assert_eq!(sql_type_code("GEOMETRY"), OTHER);
    }

    #[test]
    fn test_sql_type_code_postgresql_names() {
        assert_eq!(sql_type_code("integer"), INTEGER);
        assert_eq!(sql_type_code("int8"), BIGINT);
        assert_eq!(sql_type_code("serial"), INTEGER);
        assert_eq!(sql_type_code("character varying(255)"), VARCHAR);
        assert_eq!(sql_type_code("numeric(10,2)"), DECIMAL);
        assert_eq!(sql_type_code("oid"), ROWID);
    }

    #[test]
    fn test_is_integer_key_type() {
        assert!(is_integer_key_type(INTEGER));
        assert!(is_integer_key_type(BIGINT));
        assert!(is_integer_key_type(ROWID));
        assert!(!is_integer_key_type(SMALLINT));
        assert!(!is_integer_key_type(VARCHAR));
        assert!(!is_integer_key_type(OTHER));
    }
}
