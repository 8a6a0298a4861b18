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

//! A deck is the card registry together with the bucket map. Cards are kept
//! once, keyed by content hash; buckets only hold hashes.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::buckets::BucketMap;
use crate::error::Fallible;
use crate::error::SchedulerError;
use crate::error::fail;
use crate::progress::ProgressStats;
use crate::progress::compute_progress;
use crate::reviewer::review;
use crate::scheduler::is_due;
use crate::types::Bucket;
use crate::types::card::Card;
use crate::types::card_hash::CardHash;
use crate::types::day::Day;
use crate::types::difficulty::AnswerDifficulty;
use crate::types::record::PracticeRecord;

#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Arc<BTreeMap<CardHash, Card>>,
    buckets: BucketMap,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a deck from known cards and a stored bucket map. Bucket
    /// entries for unknown cards are dropped; known cards missing from the
    /// map start in bucket 0.
    pub fn from_parts(cards: impl IntoIterator<Item = Card>, mut buckets: BucketMap) -> Self {
        let cards: BTreeMap<CardHash, Card> =
            cards.into_iter().map(|card| (card.hash(), card)).collect();
        let stored = buckets.card_count();
        buckets.retain(|hash| cards.contains_key(hash));
        if buckets.card_count() < stored {
            log::warn!(
                "Dropped {} bucket entries for unknown cards",
                stored - buckets.card_count()
            );
        }
        for hash in cards.keys() {
            if !buckets.contains(*hash) {
                buckets.insert_new(*hash, 0);
            }
        }
        Self {
            cards: Arc::new(cards),
            buckets,
        }
    }

    /// Register a new card in bucket 0. Returns false if the card is already
    /// known.
    pub fn add_card(&mut self, card: Card) -> bool {
        let hash = card.hash();
        if self.cards.contains_key(&hash) {
            return false;
        }
        Arc::make_mut(&mut self.cards).insert(hash, card);
        self.buckets.insert_new(hash, 0);
        true
    }

    pub fn get(&self, hash: CardHash) -> Option<&Card> {
        self.cards.get(&hash)
    }

    /// The unique card whose hash starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> Fallible<&Card> {
        let mut matches = self
            .cards
            .iter()
            .filter(|(hash, _)| hash.matches_prefix(prefix))
            .map(|(_, card)| card);
        match (matches.next(), matches.next()) {
            (Some(card), None) => Ok(card),
            (None, _) => fail(format!("card not found: '{prefix}'")),
            (Some(_), Some(_)) => fail(format!("ambiguous card prefix: '{prefix}'")),
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn buckets(&self) -> &BucketMap {
        &self.buckets
    }

    pub fn bucket_of(&self, hash: CardHash) -> Option<Bucket> {
        self.buckets.bucket_of(hash)
    }

    /// The cards due on `day`, in hash order. Walks the sparse map, so the
    /// cost does not depend on how high the buckets go.
    pub fn due(&self, day: Day) -> Vec<&Card> {
        let due: BTreeSet<CardHash> = self
            .buckets
            .iter()
            .filter(|(bucket, _)| is_due(*bucket, day))
            .flat_map(|(_, cards)| cards.iter().copied())
            .collect();
        log::debug!("{} cards due on day {day}", due.len());
        due.into_iter()
            .filter_map(|hash| self.cards.get(&hash))
            .collect()
    }

    /// Review a card, returning the new deck and the log entry. The card
    /// registry is shared with `self`.
    pub fn review(
        &self,
        hash: CardHash,
        difficulty: AnswerDifficulty,
        day: Day,
    ) -> Result<(Deck, PracticeRecord), SchedulerError> {
        let (buckets, record) = review(&self.buckets, hash, difficulty, day)?;
        let deck = Deck {
            cards: Arc::clone(&self.cards),
            buckets,
        };
        Ok((deck, record))
    }

    pub fn progress(&self, history: &[PracticeRecord]) -> ProgressStats {
        compute_progress(&self.buckets, history)
    }
}
