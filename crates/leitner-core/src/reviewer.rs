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

use crate::buckets::BucketMap;
use crate::error::SchedulerError;
use crate::types::Bucket;
use crate::types::card_hash::CardHash;
use crate::types::day::Day;
use crate::types::difficulty::AnswerDifficulty;
use crate::types::record::PracticeRecord;

/// The bucket a card moves to after a review.
pub fn next_bucket(current: Bucket, difficulty: AnswerDifficulty) -> Bucket {
    match difficulty {
        AnswerDifficulty::Wrong => 0,
        AnswerDifficulty::Hard => current.saturating_sub(1),
        AnswerDifficulty::Easy => current.saturating_add(1),
    }
}

/// Apply a review to `map`, returning the new map. `map` itself is left as
/// it was.
pub fn update(
    map: &BucketMap,
    card: CardHash,
    difficulty: AnswerDifficulty,
) -> Result<BucketMap, SchedulerError> {
    let (map, _, _) = transition(map, card, difficulty)?;
    Ok(map)
}

/// Like [`update`], but also returns the log entry describing the review.
pub fn review(
    map: &BucketMap,
    card: CardHash,
    difficulty: AnswerDifficulty,
    day: Day,
) -> Result<(BucketMap, PracticeRecord), SchedulerError> {
    let (map, previous_bucket, new_bucket) = transition(map, card, difficulty)?;
    let record = PracticeRecord {
        card,
        day,
        difficulty,
        previous_bucket,
        new_bucket,
    };
    Ok((map, record))
}

fn transition(
    map: &BucketMap,
    card: CardHash,
    difficulty: AnswerDifficulty,
) -> Result<(BucketMap, Bucket, Bucket), SchedulerError> {
    let from = map
        .bucket_of(card)
        .ok_or(SchedulerError::NotFound(card))?;
    let to = next_bucket(from, difficulty);
    log::debug!("Card {}: {difficulty}, bucket {from} -> {to}", card.short());
    let mut next = map.clone();
    next.relocate(card, from, to);
    Ok((next, from, to))
}
