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

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulerError;

/// A practice day index. Day 0 is the first practice day.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    pub const FIRST: Day = Day(0);

    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn into_inner(self) -> u32 {
        self.0
    }

    /// The following day.
    pub fn succ(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Day {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Day).map_err(|_| {
            SchedulerError::ContractViolation(format!("day out of range: {value}"))
        })
    }
}

/// The host's practice-day counter. It only moves when the host advances it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DayClock {
    today: Day,
}

impl DayClock {
    pub fn starting_at(today: Day) -> Self {
        Self { today }
    }

    pub fn today(&self) -> Day {
        self.today
    }

    /// Move to the next day and return it.
    pub fn advance(&mut self) -> Day {
        self.today = self.today.succ();
        self.today
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

    use super::Day;

    impl ToSql for Day {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(i64::from(self.0)))
        }
    }

    impl FromSql for Day {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            let n = value.as_i64()?;
            Day::try_from(n).map_err(|_| FromSqlError::OutOfRange(n))
        }
    }
}
