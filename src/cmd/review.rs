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

use chrono::Local;
use leitner_core::AnswerDifficulty;
use leitner_core::error::Fallible;
use leitner_core::scheduler::next_due_day;

use crate::collection::Collection;

/// Review one card on the collection's current day and persist the result.
pub fn review_card(
    collection: &mut Collection,
    prefix: &str,
    difficulty: AnswerDifficulty,
    out: &mut impl Write,
) -> Fallible<()> {
    let today = collection.db.current_day()?;
    let hash = collection.deck.find_by_prefix(prefix)?.hash();
    let (deck, record) = collection.deck.review(hash, difficulty, today)?;
    collection.db.save_review(&record, Local::now().naive_local())?;
    collection.deck = deck;

    write!(
        out,
        "Card {} moved from bucket {} to bucket {}",
        hash.short(),
        record.previous_bucket,
        record.new_bucket
    )?;
    match next_due_day(record.new_bucket, today.succ()) {
        Some(next) => writeln!(out, "; next due on day {next}.")?,
        None => writeln!(out, ".")?,
    }
    Ok(())
}
