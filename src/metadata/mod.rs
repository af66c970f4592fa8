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

//! Database metadata helpers.
//!
//! ## Module Structure
//!
//! - `types`: Data structures for metadata query results
//! - `sql`: SQL builder for INFORMATION_SCHEMA and probe queries
//! - `parse`: Arrow result parsing into the metadata types
//! - `type_mapping`: SQL type names to JDBC type codes
//! - `service`: The metadata helpers themselves

pub mod parse;
pub mod service;
pub mod sql;
pub mod type_mapping;
pub mod types;

// Re-export commonly used types
pub use sql::{BoundQuery, InformationSchemaQuery};
pub use types::{ColumnInfo, ColumnPosition, PrimaryKeyInfo, TableInfo};
