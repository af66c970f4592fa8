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

//! Table identifiers of the form `[[catalog.]schema.]table`.
//!
//! [`TableLocation`] parses free-form table references, keeping quoted
//! segments verbatim, and renders them back into SQL with only the quoting
//! the target engine needs.
//!
//! ```ignore
//! let location = TableLocation::parse_with("public.\"My Roads\"", Dialect::H2)?;
//! assert_eq!(location.schema(), Some("PUBLIC"));
//! assert_eq!(location.table_name(), "My Roads");
//! assert_eq!(location.to_sql(Dialect::H2), "PUBLIC.\"My Roads\"");
//! ```

use crate::dialect::Dialect;
use crate::error::{H2gisErrorHelper, Result};
use crate::metadata::types::TableInfo;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Wrap an identifier in double quotes, doubling embedded quotes.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Quote an identifier only if the engine would not resolve it unquoted:
/// reserved words and anything outside the engine's plain identifier form.
pub fn quote_identifier_for(identifier: &str, dialect: Dialect) -> String {
    if dialect.is_reserved(identifier) || !dialect.is_plain_identifier(identifier) {
        quote_identifier(identifier)
    } else {
        identifier.to_string()
    }
}

/// Identifies a table by catalog, schema and name.
///
/// Catalog and schema are optional. Two locations are equal when every
/// segment matches ignoring case.
#[derive(Debug, Clone)]
pub struct TableLocation {
    catalog: Option<String>,
    schema: Option<String>,
    table: String,
}

impl TableLocation {
    /// Build a location from its segments; empty strings mean "absent".
    pub fn new(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog: non_empty(catalog.into()),
            schema: non_empty(schema.into()),
            table: table.into(),
        }
    }

    /// A location with neither catalog nor schema.
    pub fn table(table: impl Into<String>) -> Self {
        Self::new("", "", table)
    }

    /// Parse `[[catalog.]schema.]table`, keeping unquoted segments as written.
    pub fn parse(reference: &str) -> Result<Self> {
        Self::parse_segments(reference, None)
    }

    /// Parse `[[catalog.]schema.]table`, folding unquoted segments to the
    /// case `dialect` stores identifiers in.
    pub fn parse_with(reference: &str, dialect: Dialect) -> Result<Self> {
        Self::parse_segments(reference, Some(dialect))
    }

    fn parse_segments(reference: &str, dialect: Option<Dialect>) -> Result<Self> {
        let segments = split_segments(reference)?;
        let mut names: Vec<String> = segments
            .into_iter()
            .map(|segment| match (segment.quoted, dialect) {
                (false, Some(dialect)) => dialect.fold_case(&segment.text),
                _ => segment.text,
            })
            .collect();

        let table = names.pop().unwrap_or_default();
        let schema = names.pop().unwrap_or_default();
        let catalog = names.pop().unwrap_or_default();
        Ok(Self::new(catalog, schema, table))
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The catalog, or `default` when absent.
    pub fn catalog_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.catalog.as_deref().unwrap_or(default)
    }

    /// The schema, or `default` when absent.
    pub fn schema_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.schema.as_deref().unwrap_or(default)
    }

    /// Render the location for use in SQL sent to `dialect`.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(ref catalog) = self.catalog {
            parts.push(quote_identifier_for(catalog, dialect));
        }
        if let Some(ref schema) = self.schema {
            parts.push(quote_identifier_for(schema, dialect));
        }
        parts.push(quote_identifier_for(&self.table, dialect));
        parts.join(".")
    }
}

impl From<&TableInfo> for TableLocation {
    fn from(info: &TableInfo) -> Self {
        Self::new(
            info.catalog_name.clone(),
            info.schema_name.clone(),
            info.table_name.clone(),
        )
    }
}

/// Renders with PostgreSQL quoting rules.
impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(Dialect::PostgreSql))
    }
}

impl PartialEq for TableLocation {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(self.catalog.as_deref(), other.catalog.as_deref())
            && eq_ignore_case(self.schema.as_deref(), other.schema.as_deref())
            && self.table.to_lowercase() == other.table.to_lowercase()
    }
}

impl Eq for TableLocation {}

impl Hash for TableLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.catalog.as_ref().map(|c| c.to_lowercase()).hash(state);
        self.schema.as_ref().map(|s| s.to_lowercase()).hash(state);
        self.table.to_lowercase().hash(state);
    }
}

fn eq_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

struct Segment {
    text: String,
    quoted: bool,
}

/// Split a reference on dots outside double quotes, unescaping `""`.
fn split_segments(reference: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current = Segment {
        text: String::new(),
        quoted: false,
    };
    let mut in_quotes = false;
    let mut chars = reference.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.text.push('"');
            }
            '"' => {
                in_quotes = !in_quotes;
                current.quoted = true;
            }
            '.' if !in_quotes => {
                segments.push(finish_segment(current, reference)?);
                current = Segment {
                    text: String::new(),
                    quoted: false,
                };
            }
            c => current.text.push(c),
        }
    }

    if in_quotes {
        return Err(H2gisErrorHelper::invalid_argument()
            .message(format!("Unterminated quoted identifier in '{}'", reference)));
    }
    segments.push(finish_segment(current, reference)?);

    if segments.len() > 3 {
        return Err(H2gisErrorHelper::invalid_argument().message(format!(
            "Table reference '{}' has more than catalog.schema.table segments",
            reference
        )));
    }
    Ok(segments)
}

fn finish_segment(mut segment: Segment, reference: &str) -> Result<Segment> {
    if !segment.quoted {
        segment.text = segment.text.trim().to_string();
    }
    if segment.text.is_empty() {
        return Err(H2gisErrorHelper::invalid_argument()
            .message(format!("Empty identifier in table reference '{}'", reference)));
    }
    Ok(segment)
}
