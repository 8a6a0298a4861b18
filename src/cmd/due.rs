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

use std::io::Write;

use leitner_core::Day;
use leitner_core::error::Fallible;

use crate::collection::Collection;

pub fn list_due(collection: &Collection, day: Option<i64>, out: &mut impl Write) -> Fallible<()> {
    let day: Day = match day {
        Some(day) => Day::try_from(day)?,
        None => collection.db.current_day()?,
    };
    let due = collection.deck.due(day);
    if due.is_empty() {
        writeln!(out, "No cards due on day {day}.")?;
        return Ok(());
    }
    writeln!(out, "{} cards due on day {day}:", due.len())?;
    for card in due {
        let bucket = collection.deck.bucket_of(card.hash()).unwrap_or(0);
        writeln!(
            out,
            "{}  bucket {bucket}  {}",
            card.hash().short(),
            card.front()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use leitner_core::AnswerDifficulty;
    use leitner_core::CardHash;

    use super::*;
    use crate::helper::create_test_collection;

    #[test]
    fn test_everything_due_on_first_day() -> Fallible<()> {
        let dir = create_test_collection()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        list_due(&collection, None, &mut out)?;
        let out = String::from_utf8(out)?;
        assert!(out.starts_with("3 cards due on day 0:"));
        assert!(out.contains("Paris"));
        assert!(out.contains("Berlin"));
        assert!(out.contains("1789"));
        Ok(())
    }

    #[test]
    fn test_promoted_card_skips_odd_days() -> Fallible<()> {
        let dir = create_test_collection()?;
        let mut collection = Collection::new(Some(dir.path().display().to_string()))?;
        let paris = CardHash::of_content("Paris", "France of capital");
        let (deck, _) = collection
            .deck
            .review(paris, AnswerDifficulty::Easy, Day::FIRST)?;
        collection.deck = deck;

        let mut out = Vec::new();
        list_due(&collection, Some(1), &mut out)?;
        let out = String::from_utf8(out)?;
        assert!(out.starts_with("2 cards due on day 1:"));
        assert!(!out.contains("Paris"));
        Ok(())
    }

    #[test]
    fn test_negative_day() -> Fallible<()> {
        let dir = create_test_collection()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let err = list_due(&collection, Some(-1), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "error: contract violation: day out of range: -1");
        Ok(())
    }
}
