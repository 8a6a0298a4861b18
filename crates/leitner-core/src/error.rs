// Copyright 2025 Fernando Borretti
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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::string::FromUtf8Error;

use crate::parser::ParserError;
use crate::types::card_hash::CardHash;

/// The failures a scheduling operation can report.
///
/// All of these are deterministic: retrying with the same input fails the
/// same way.
#[derive(Clone, Debug, PartialEq)]
pub enum SchedulerError {
    /// The card is not present in any bucket.
    NotFound(CardHash),
    /// A difficulty value outside `Wrong`, `Hard`, `Easy`.
    InvalidDifficulty(String),
    /// The caller broke a precondition, e.g. a negative day or overlapping
    /// buckets.
    ContractViolation(String),
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerError::NotFound(hash) => write!(f, "card not found: {hash}"),
            SchedulerError::InvalidDifficulty(value) => {
                write!(f, "invalid difficulty level: {value}")
            }
            SchedulerError::ContractViolation(msg) => write!(f, "contract violation: {msg}"),
        }
    }
}

impl Error for SchedulerError {}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<FromUtf8Error> for ErrorReport {
    fn from(value: FromUtf8Error) -> Self {
        ErrorReport {
            message: format!("UTF-8 conversion error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<ParserError> for ErrorReport {
    fn from(value: ParserError) -> Self {
        ErrorReport {
            message: format!("Parse error: {value}"),
        }
    }
}

impl From<SchedulerError> for ErrorReport {
    fn from(value: SchedulerError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for ErrorReport {
    fn from(value: rusqlite::Error) -> Self {
        ErrorReport {
            message: format!("Database error: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let hash = CardHash::of_content("Paris", "France of capital");
        let err: ErrorReport = SchedulerError::NotFound(hash).into();
        assert_eq!(err.to_string(), format!("error: card not found: {hash}"));
    }

    #[test]
    fn test_invalid_difficulty_message() {
        let err = SchedulerError::InvalidDifficulty("7".to_string());
        assert_eq!(err.to_string(), "invalid difficulty level: 7");
    }
}
