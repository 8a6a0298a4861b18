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

//! leitner-core: the scheduling core of a Modified-Leitner flashcard system.
//!
//! Cards live in numbered buckets. A card in bucket `b` is due on every day
//! `d` with `d mod 2^b == 0`. Reviewing a card moves it between buckets:
//! `Wrong` resets it to bucket 0, `Hard` moves it down one bucket, `Easy`
//! moves it up one.
//!
//! Every operation here is a pure function of its arguments. Hosts own the
//! day counter, the persisted bucket map and the review log.

pub mod buckets;
pub mod deck;
pub mod error;
pub mod hint;
pub mod parser;
pub mod progress;
pub mod reviewer;
pub mod scheduler;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use buckets::{BucketMap, to_bucket_sets};
pub use deck::Deck;
pub use error::{ErrorReport, Fallible, SchedulerError, fail};
pub use hint::get_hint;
pub use parser::{parse_deck_content, parse_decks};
pub use progress::{ProgressStats, compute_progress};
pub use reviewer::{review, update};
pub use scheduler::practice;
pub use session::Session;
pub use types::Bucket;
pub use types::card::{Card, CardContent};
pub use types::card_hash::CardHash;
pub use types::day::{Day, DayClock};
pub use types::difficulty::AnswerDifficulty;
pub use types::record::PracticeRecord;
