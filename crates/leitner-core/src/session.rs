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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::deck::Deck;
use crate::error::SchedulerError;
use crate::progress::ProgressStats;
use crate::types::card_hash::CardHash;
use crate::types::day::Day;
use crate::types::difficulty::AnswerDifficulty;
use crate::types::record::PracticeRecord;

struct SessionState {
    deck: Arc<Deck>,
    history: Vec<PracticeRecord>,
}

/// A deck shared between threads. Each review reads the current deck,
/// computes the next one and publishes it under a single lock, so reviews
/// are never lost; two reviews of the same card apply in lock order.
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(deck: Deck, history: Vec<PracticeRecord>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                deck: Arc::new(deck),
                history,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // Every swap is a single assignment, so a poisoned lock still holds a
        // consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current deck. Later reviews do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<Deck> {
        Arc::clone(&self.lock().deck)
    }

    pub fn review(
        &self,
        hash: CardHash,
        difficulty: AnswerDifficulty,
        day: Day,
    ) -> Result<PracticeRecord, SchedulerError> {
        let mut state = self.lock();
        let (deck, record) = state.deck.review(hash, difficulty, day)?;
        state.deck = Arc::new(deck);
        state.history.push(record);
        log::debug!("Session now holds {} reviews", state.history.len());
        Ok(record)
    }

    pub fn history(&self) -> Vec<PracticeRecord> {
        self.lock().history.clone()
    }

    pub fn progress(&self) -> ProgressStats {
        let state = self.lock();
        state.deck.progress(&state.history)
    }

    pub fn into_parts(self) -> (Arc<Deck>, Vec<PracticeRecord>) {
        let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        (state.deck, state.history)
    }
}
