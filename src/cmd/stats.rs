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
use std::io::Write;

use clap::ValueEnum;
use leitner_core::ProgressStats;
use leitner_core::error::Fallible;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable summary.
    Text,
    /// JSON, as produced by the progress calculator.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(
    collection: &Collection,
    format: StatsFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    // Reviews of cards no longer in any deck file are left out, matching
    // the card counts.
    let history: Vec<_> = collection
        .db
        .history()?
        .into_iter()
        .filter(|record| collection.deck.get(record.card).is_some())
        .collect();
    let stats: ProgressStats = collection.deck.progress(&history);
    match format {
        StatsFormat::Text => write_text(&stats, out),
        StatsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            Ok(())
        }
    }
}

fn write_text(stats: &ProgressStats, out: &mut impl Write) -> Fallible<()> {
    writeln!(out, "Cards: {}", stats.total_cards)?;
    writeln!(out, "Reviews: {}", stats.total_reviews)?;
    writeln!(out, "Accuracy: {:.1}%", stats.accuracy_rate * 100.0)?;
    match stats.average_difficulty {
        Some(avg) => writeln!(out, "Average difficulty: {avg:.2}")?,
        None => writeln!(out, "Average difficulty: n/a")?,
    }
    writeln!(out, "Buckets:")?;
    for (bucket, count) in &stats.bucket_distribution {
        writeln!(out, "  {bucket}: {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use leitner_core::AnswerDifficulty;
    use leitner_core::CardHash;

    use super::*;
    use crate::helper::create_test_collection;

    fn reviewed_collection() -> Fallible<(tempfile::TempDir, Collection)> {
        let dir = create_test_collection()?;
        let mut collection = Collection::new(Some(dir.path().display().to_string()))?;
        let today = collection.db.current_day()?;
        let paris = CardHash::of_content("Paris", "France of capital");
        for difficulty in [AnswerDifficulty::Easy, AnswerDifficulty::Wrong] {
            let (deck, record) = collection.deck.review(paris, difficulty, today)?;
            collection.db.save_review(&record, Local::now().naive_local())?;
            collection.deck = deck;
        }
        Ok((dir, collection))
    }

    #[test]
    fn test_text() -> Fallible<()> {
        let (_dir, collection) = reviewed_collection()?;
        let mut out = Vec::new();
        print_stats(&collection, StatsFormat::Text, &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Cards: 3\nReviews: 2\nAccuracy: 50.0%\nAverage difficulty: 1.00\nBuckets:\n  0: 3\n"
        );
        Ok(())
    }

    #[test]
    fn test_removed_card_reviews_are_excluded() -> Fallible<()> {
        let (dir, collection) = reviewed_collection()?;
        drop(collection);
        let berlin_only = "[[cards]]\nfront = \"Berlin\"\nback = \"Germany of capital\"\n";
        std::fs::write(dir.path().join("geography.toml"), berlin_only)?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        print_stats(&collection, StatsFormat::Text, &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Cards: 2\nReviews: 0\nAccuracy: 0.0%\nAverage difficulty: n/a\nBuckets:\n  0: 2\n"
        );
        Ok(())
    }

    #[test]
    fn test_json_without_history() -> Fallible<()> {
        let dir = create_test_collection()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        print_stats(&collection, StatsFormat::Json, &mut out)?;
        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(value["accuracyRate"], 0.0);
        assert_eq!(value["bucketDistribution"]["0"], 3);
        assert!(value.get("averageDifficulty").is_none());
        Ok(())
    }
}
