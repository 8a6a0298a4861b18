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

use serde::Deserialize;
use serde::Serialize;

use crate::buckets::BucketMap;
use crate::types::Bucket;
use crate::types::difficulty::AnswerDifficulty;
use crate::types::record::PracticeRecord;

/// Summary statistics over a bucket map and the review log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Fraction of all recorded reviews that were not `Wrong`. Zero when
    /// there are no reviews.
    pub accuracy_rate: f64,
    /// Card count per bucket. Empty buckets are absent.
    pub bucket_distribution: BTreeMap<Bucket, usize>,
    /// Mean difficulty ordinal over all reviews. Absent when there are no
    /// reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_difficulty: Option<f64>,
    pub total_cards: usize,
    pub total_reviews: usize,
}

/// Aggregate `map` and the full review `history`.
///
/// Every attempt in the history counts towards the accuracy rate, not only
/// the latest attempt per card.
pub fn compute_progress(map: &BucketMap, history: &[PracticeRecord]) -> ProgressStats {
    let bucket_distribution: BTreeMap<Bucket, usize> = map
        .iter()
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(bucket, cards)| (bucket, cards.len()))
        .collect();
    let total_cards: usize = bucket_distribution.values().sum();

    let total_reviews = history.len();
    let (accuracy_rate, average_difficulty) = if history.is_empty() {
        (0.0, None)
    } else {
        let n = total_reviews as f64;
        let correct = history
            .iter()
            .filter(|record| record.difficulty != AnswerDifficulty::Wrong)
            .count();
        let ordinal_sum: u64 = history
            .iter()
            .map(|record| u64::from(record.difficulty.ordinal()))
            .sum();
        (correct as f64 / n, Some(ordinal_sum as f64 / n))
    };

    ProgressStats {
        accuracy_rate,
        bucket_distribution,
        average_difficulty,
        total_cards,
        total_reviews,
    }
}
