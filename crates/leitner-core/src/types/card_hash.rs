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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Number of hex digits shown when a hash is abbreviated.
const SHORT_LEN: usize = 8;

/// The content identity of a card: a hash over its front and back.
///
/// Wrapper around the underlying hash function, since blake3 does not
/// implement `Ord` and `PartialOrd`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardHash {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl CardHash {
    /// Hash a card's front and back. The front is length-prefixed so that
    /// `("ab", "c")` and `("a", "bc")` hash differently.
    pub fn of_content(front: &str, back: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(front.len() as u64).to_le_bytes());
        hasher.update(front.as_bytes());
        hasher.update(back.as_bytes());
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    /// The leading hex digits, for display in listings.
    pub fn short(self) -> String {
        self.to_hex()[..SHORT_LEN].to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new(format!("invalid card hash: '{s}'")))?;
        Ok(Self { inner })
    }

    /// Whether the hex form of this hash starts with `prefix`.
    pub fn matches_prefix(self, prefix: &str) -> bool {
        !prefix.is_empty() && self.to_hex().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl PartialOrd for CardHash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardHash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.as_bytes().cmp(other.inner.as_bytes())
    }
}

impl Display for CardHash {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for CardHash {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardHash::from_hex(&value)
    }
}

impl From<CardHash> for String {
    fn from(hash: CardHash) -> String {
        hash.to_hex()
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

    use super::CardHash;

    impl ToSql for CardHash {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(self.to_hex()))
        }
    }

    impl FromSql for CardHash {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            let s = value.as_str()?;
            CardHash::from_hex(s).map_err(|e| FromSqlError::Other(Box::new(e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_identity() {
        let a = CardHash::of_content("Paris", "France of capital");
        let b = CardHash::of_content("Paris", "France of capital");
        assert_eq!(a, b);
        assert_ne!(a, CardHash::of_content("Paris", "capital of France"));
    }

    #[test]
    fn test_front_back_boundary() {
        assert_ne!(CardHash::of_content("ab", "c"), CardHash::of_content("a", "bc"));
    }

    #[test]
    fn test_ordering() -> Fallible<()> {
        let a =
            CardHash::from_hex("0000000000000000000000000000000000000000000000000000000000000000")?;
        let b =
            CardHash::from_hex("0000000000000000000000000000000000000000000000000000000000000001")?;
        assert!(a < b);
        Ok(())
    }

    #[test]
    fn test_prefix() {
        let hash = CardHash::of_content("Q", "A");
        assert_eq!(hash.short().len(), 8);
        assert!(hash.matches_prefix(&hash.short()));
        assert!(hash.matches_prefix(&hash.short().to_uppercase()));
        assert!(!hash.matches_prefix(""));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(CardHash::from_hex("not a hash").is_err());
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let hash = CardHash::of_content("Q", "A");
        let json = serde_json::to_string(&hash)?;
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
        let back: CardHash = serde_json::from_str(&json)?;
        assert_eq!(back, hash);
        Ok(())
    }
}
