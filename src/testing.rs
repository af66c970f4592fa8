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

//! In-memory connection used by the unit tests.

use crate::connection::{Cancellable, DbConnection, ResultSet};
use crate::dialect::Dialect;
use crate::error::{H2gisErrorHelper, Result};
use arrow_array::{ArrayRef, RecordBatch, StringArray};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a batch of nullable Utf8 columns from rows.
pub(crate) fn string_batch(names: &[&str], rows: Vec<Vec<Option<&str>>>) -> RecordBatch {
    let columns: Vec<(&str, ArrayRef)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<Option<&str>> = rows.iter().map(|row| row[i]).collect();
            (*name, Arc::new(StringArray::from(values)) as ArrayRef)
        })
        .collect();
    RecordBatch::try_from_iter(columns).unwrap()
}

/// Counts cancel requests.
#[derive(Debug, Default)]
pub(crate) struct CancelCounter {
    pub calls: AtomicUsize,
}

impl Cancellable for CancelCounter {
    fn cancel(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

enum Response {
    Rows(RecordBatch),
    Fail(String),
}

/// Answers queries from canned responses, matched by SQL substring in
/// registration order. Unmatched queries fail like a missing table would.
pub(crate) struct FakeConnection {
    dialect: Dialect,
    responses: Vec<(String, Response)>,
    queries: Vec<(String, Vec<String>)>,
    executed: Vec<String>,
    canceller: Option<Arc<CancelCounter>>,
}

impl FakeConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            responses: Vec::new(),
            queries: Vec::new(),
            executed: Vec::new(),
            canceller: None,
        }
    }

    pub fn with_response(mut self, pattern: &str, batch: RecordBatch) -> Self {
        self.responses
            .push((pattern.to_string(), Response::Rows(batch)));
        self
    }

    pub fn with_failure(mut self, pattern: &str, message: &str) -> Self {
        self.responses
            .push((pattern.to_string(), Response::Fail(message.to_string())));
        self
    }

    pub fn with_canceller(mut self, canceller: Arc<CancelCounter>) -> Self {
        self.canceller = Some(canceller);
        self
    }

    pub fn last_query(&self) -> Option<(String, Vec<String>)> {
        self.queries.last().cloned()
    }

    pub fn queries(&self) -> &[(String, Vec<String>)] {
        &self.queries
    }

    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl DbConnection for FakeConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<ResultSet> {
        self.queries.push((
            sql.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));
        let response = self
            .responses
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
            .map(|(_, response)| response);
        match response {
            Some(Response::Rows(batch)) => Ok(ResultSet::new(batch.schema(), vec![batch.clone()])),
            Some(Response::Fail(message)) => Err(H2gisErrorHelper::io().message(message.clone())),
            None => Err(H2gisErrorHelper::io().message(format!("No such relation for: {}", sql))),
        }
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.executed.push(sql.to_string());
        Ok(())
    }

    fn canceller(&self) -> Option<Arc<dyn Cancellable>> {
        self.canceller
            .clone()
            .map(|counter| counter as Arc<dyn Cancellable>)
    }
}
