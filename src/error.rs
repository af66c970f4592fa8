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

//! Error type shared by every module of the crate.
//!
//! Errors are built through [`H2gisErrorHelper`], which picks the kind and
//! leaves the message to the call site:
//!
//! ```ignore
//! return Err(H2gisErrorHelper::not_found().message(format!("Table {} not found", location)));
//! ```

use adbc_core::error::Status;
use adbc_core::options::OptionValue;
use arrow_schema::ArrowError;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    NotFound,
    NotImplemented,
    Io,
    Cancelled,
}

impl ErrorKind {
    fn status(self) -> Status {
        match self {
            ErrorKind::InvalidArgument => Status::InvalidArguments,
            ErrorKind::InvalidState => Status::InvalidState,
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::NotImplemented => Status::NotImplemented,
            ErrorKind::Io => Status::IO,
            ErrorKind::Cancelled => Status::Cancelled,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::NotFound => "not found",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::Io => "database error",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A failed database or metadata operation.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert into the ADBC error type, for use behind ADBC interfaces.
    pub fn to_adbc(&self) -> adbc_core::error::Error {
        adbc_core::error::Error::with_message_and_status(self.message.clone(), self.kind.status())
    }
}

impl From<ArrowError> for Error {
    fn from(err: ArrowError) -> Self {
        H2gisErrorHelper::io()
            .message(format!("Arrow error: {}", err))
            .with_source(err)
    }
}

impl From<adbc_core::error::Error> for Error {
    fn from(err: adbc_core::error::Error) -> Self {
        let kind = match err.status {
            Status::InvalidArguments => ErrorKind::InvalidArgument,
            Status::InvalidState => ErrorKind::InvalidState,
            Status::NotFound => ErrorKind::NotFound,
            Status::NotImplemented => ErrorKind::NotImplemented,
            Status::Cancelled => ErrorKind::Cancelled,
            _ => ErrorKind::Io,
        };
        ErrorBuilder { kind }.message(err.message)
    }
}

/// Pending error of a known kind, completed with [`ErrorBuilder::message`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorBuilder {
    kind: ErrorKind,
}

impl ErrorBuilder {
    pub fn message(self, message: impl Into<String>) -> Error {
        Error {
            kind: self.kind,
            message: message.into(),
            source: None,
        }
    }
}

/// Constructors for [`Error`], one per [`ErrorKind`].
pub struct H2gisErrorHelper;

impl H2gisErrorHelper {
    pub fn invalid_argument() -> ErrorBuilder {
        ErrorBuilder {
            kind: ErrorKind::InvalidArgument,
        }
    }

    pub fn invalid_state() -> ErrorBuilder {
        ErrorBuilder {
            kind: ErrorKind::InvalidState,
        }
    }

    pub fn not_found() -> ErrorBuilder {
        ErrorBuilder {
            kind: ErrorKind::NotFound,
        }
    }

    pub fn not_implemented() -> ErrorBuilder {
        ErrorBuilder {
            kind: ErrorKind::NotImplemented,
        }
    }

    pub fn io() -> ErrorBuilder {
        ErrorBuilder { kind: ErrorKind::Io }
    }

    pub fn cancelled() -> ErrorBuilder {
        ErrorBuilder {
            kind: ErrorKind::Cancelled,
        }
    }

    /// Error for an option key the crate does not know.
    pub fn set_unknown_option(key: &str) -> Error {
        Self::not_found().message(format!("Unknown option: {}", key))
    }

    /// Error for reading an option key the crate does not know or has not set.
    pub fn get_unknown_option(key: &str) -> Error {
        Self::not_found().message(format!("Option not set: {}", key))
    }

    /// Error for a known option key given a value of the wrong type or format.
    pub fn set_invalid_option(key: &str, value: &OptionValue) -> Error {
        Self::invalid_argument().message(format!("Invalid value for option {}: {:?}", key, value))
    }
}
