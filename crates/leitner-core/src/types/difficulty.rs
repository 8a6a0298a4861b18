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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulerError;

/// How hard it was to recall a card. Encoded on the wire by its ordinal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AnswerDifficulty {
    Wrong,
    Hard,
    Easy,
}

impl AnswerDifficulty {
    pub const ALL: [AnswerDifficulty; 3] = [
        AnswerDifficulty::Wrong,
        AnswerDifficulty::Hard,
        AnswerDifficulty::Easy,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            AnswerDifficulty::Wrong => 0,
            AnswerDifficulty::Hard => 1,
            AnswerDifficulty::Easy => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AnswerDifficulty::Wrong => "wrong",
            AnswerDifficulty::Hard => "hard",
            AnswerDifficulty::Easy => "easy",
        }
    }
}

impl Display for AnswerDifficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for AnswerDifficulty {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnswerDifficulty::Wrong),
            1 => Ok(AnswerDifficulty::Hard),
            2 => Ok(AnswerDifficulty::Easy),
            _ => Err(SchedulerError::InvalidDifficulty(value.to_string())),
        }
    }
}

impl From<AnswerDifficulty> for u8 {
    fn from(value: AnswerDifficulty) -> u8 {
        value.ordinal()
    }
}

impl FromStr for AnswerDifficulty {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrong" | "w" | "0" => Ok(AnswerDifficulty::Wrong),
            "hard" | "h" | "1" => Ok(AnswerDifficulty::Hard),
            "easy" | "e" | "2" => Ok(AnswerDifficulty::Easy),
            _ => Err(SchedulerError::InvalidDifficulty(s.to_string())),
        }
    }
}

#[cfg(feature = "sqlite")]
mod sql {
    use rusqlite::ToSql;
    use rusqlite::types::FromSql;
    use rusqlite::types::FromSqlError;
    use rusqlite::types::FromSqlResult;
    use rusqlite::types::ToSqlOutput;
    use rusqlite::types::ValueRef;

    use super::AnswerDifficulty;

    impl ToSql for AnswerDifficulty {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(i64::from(self.ordinal())))
        }
    }

    impl FromSql for AnswerDifficulty {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            let n = value.as_i64()?;
            let n = u8::try_from(n).map_err(|_| FromSqlError::OutOfRange(n))?;
            AnswerDifficulty::try_from(n).map_err(|e| FromSqlError::Other(Box::new(e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_ordinals() {
        let expected = [0u8, 1, 2];
        for (difficulty, ordinal) in zip(AnswerDifficulty::ALL, expected) {
            assert_eq!(difficulty.ordinal(), ordinal);
            assert_eq!(AnswerDifficulty::try_from(ordinal), Ok(difficulty));
        }
    }

    #[test]
    fn test_out_of_range_ordinal() {
        assert_eq!(
            AnswerDifficulty::try_from(3),
            Err(SchedulerError::InvalidDifficulty("3".to_string()))
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Easy".parse(), Ok(AnswerDifficulty::Easy));
        assert_eq!("h".parse(), Ok(AnswerDifficulty::Hard));
        assert_eq!(" wrong ".parse(), Ok(AnswerDifficulty::Wrong));
        assert!("good".parse::<AnswerDifficulty>().is_err());
    }

    #[test]
    fn test_serialization_format() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&AnswerDifficulty::Hard)?, "1");
        let d: AnswerDifficulty = serde_json::from_str("2")?;
        assert_eq!(d, AnswerDifficulty::Easy);
        assert!(serde_json::from_str::<AnswerDifficulty>("5").is_err());
        Ok(())
    }
}
