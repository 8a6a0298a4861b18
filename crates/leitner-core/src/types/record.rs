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

use serde::Deserialize;
use serde::Serialize;

use crate::types::Bucket;
use crate::types::card_hash::CardHash;
use crate::types::day::Day;
use crate::types::difficulty::AnswerDifficulty;

/// One entry of the append-only review log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    pub card: CardHash,
    pub day: Day,
    pub difficulty: AnswerDifficulty,
    pub previous_bucket: Bucket,
    pub new_bucket: Bucket,
}
