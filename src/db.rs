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

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDateTime;
use leitner_core::AnswerDifficulty;
use leitner_core::Bucket;
use leitner_core::BucketMap;
use leitner_core::CardHash;
use leitner_core::Day;
use leitner_core::DayClock;
use leitner_core::PracticeRecord;
use leitner_core::error::Fallible;
use leitner_core::error::fail;
use rusqlite::Connection;
use rusqlite::params;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Persistent bucket assignments, review log and day counter.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Fallible<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cards (
                card_hash TEXT PRIMARY KEY,
                bucket INTEGER NOT NULL,
                added_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS reviews (
                review_id INTEGER PRIMARY KEY AUTOINCREMENT,
                card_hash TEXT NOT NULL REFERENCES cards(card_hash),
                day INTEGER NOT NULL,
                difficulty INTEGER NOT NULL,
                previous_bucket INTEGER NOT NULL,
                new_bucket INTEGER NOT NULL,
                reviewed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS clock (
                id INTEGER PRIMARY KEY CHECK (id = 0),
                day INTEGER NOT NULL
            );

            INSERT OR IGNORE INTO clock (id, day) VALUES (0, 0);
            "#,
        )?;
        Ok(())
    }

    pub fn card_hashes(&self) -> Fallible<BTreeSet<CardHash>> {
        let mut stmt = self.conn.prepare("SELECT card_hash FROM cards")?;
        let hashes = stmt
            .query_map([], |row| row.get::<_, CardHash>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(hashes)
    }

    /// Track new cards, each starting in bucket 0.
    pub fn insert_cards(&mut self, hashes: &[CardHash], added_at: NaiveDateTime) -> Fallible<()> {
        let added_at = format_timestamp(added_at);
        let tx = self.conn.transaction()?;
        for hash in hashes {
            tx.execute(
                "INSERT INTO cards (card_hash, bucket, added_at) VALUES (?1, 0, ?2)",
                params![hash, added_at],
            )?;
        }
        tx.commit()?;
        log::debug!("Inserted {} new cards", hashes.len());
        Ok(())
    }

    pub fn bucket_map(&self) -> Fallible<BucketMap> {
        let mut stmt = self.conn.prepare("SELECT card_hash, bucket FROM cards")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, CardHash>(0)?, row.get::<_, Bucket>(1)?))
        })?;
        let mut buckets: BTreeMap<Bucket, BTreeSet<CardHash>> = BTreeMap::new();
        for row in rows {
            let (hash, bucket) = row?;
            buckets.entry(bucket).or_default().insert(hash);
        }
        Ok(BucketMap::from_buckets(buckets)?)
    }

    pub fn history(&self) -> Fallible<Vec<PracticeRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT card_hash, day, difficulty, previous_bucket, new_bucket
             FROM reviews ORDER BY review_id",
        )?;
        let records = stmt
            .query_map([], |row| {
                Ok(PracticeRecord {
                    card: row.get(0)?,
                    day: row.get(1)?,
                    difficulty: row.get::<_, AnswerDifficulty>(2)?,
                    previous_bucket: row.get(3)?,
                    new_bucket: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Publish a review: move the card and append the record in one
    /// transaction. The move only applies if the card is still in the bucket
    /// the review started from.
    pub fn save_review(
        &mut self,
        record: &PracticeRecord,
        reviewed_at: NaiveDateTime,
    ) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE cards SET bucket = ?1 WHERE card_hash = ?2 AND bucket = ?3",
            params![record.new_bucket, record.card, record.previous_bucket],
        )?;
        if changed != 1 {
            return fail(format!(
                "card {} changed since it was loaded; review not saved",
                record.card.short()
            ));
        }
        tx.execute(
            "INSERT INTO reviews (card_hash, day, difficulty, previous_bucket, new_bucket, reviewed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.card,
                record.day,
                record.difficulty,
                record.previous_bucket,
                record.new_bucket,
                format_timestamp(reviewed_at),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn current_day(&self) -> Fallible<Day> {
        let day = self
            .conn
            .query_row("SELECT day FROM clock WHERE id = 0", [], |row| row.get(0))?;
        Ok(day)
    }

    /// Move the day counter forward by one and return the new day.
    pub fn advance_day(&mut self) -> Fallible<Day> {
        let tx = self.conn.transaction()?;
        let today: Day = tx.query_row("SELECT day FROM clock WHERE id = 0", [], |row| row.get(0))?;
        let mut clock = DayClock::starting_at(today);
        let day = clock.advance();
        tx.execute("UPDATE clock SET day = ?1 WHERE id = 0", params![day])?;
        tx.commit()?;
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_cards_start_in_bucket_zero() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("test.db"))?;
        let hash = CardHash::of_content("Paris", "France of capital");
        db.insert_cards(&[hash], now())?;
        assert!(db.card_hashes()?.contains(&hash));
        assert_eq!(db.bucket_map()?.bucket_of(hash), Some(0));
        Ok(())
    }

    #[test]
    fn test_save_review() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("test.db"))?;
        let hash = CardHash::of_content("Paris", "France of capital");
        db.insert_cards(&[hash], now())?;
        let record = PracticeRecord {
            card: hash,
            day: Day::new(3),
            difficulty: AnswerDifficulty::Easy,
            previous_bucket: 0,
            new_bucket: 1,
        };
        db.save_review(&record, now())?;
        assert_eq!(db.bucket_map()?.bucket_of(hash), Some(1));
        assert_eq!(db.history()?, vec![record]);
        // Replaying the same review no longer matches the stored bucket.
        assert!(db.save_review(&record, now()).is_err());
        assert_eq!(db.history()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_clock() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.db");
        let mut db = Database::new(&path)?;
        assert_eq!(db.current_day()?, Day::FIRST);
        assert_eq!(db.advance_day()?, Day::new(1));
        drop(db);
        let db = Database::new(&path)?;
        assert_eq!(db.current_day()?, Day::new(1));
        Ok(())
    }
}
