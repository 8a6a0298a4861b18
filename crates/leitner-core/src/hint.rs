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

use crate::types::card::Card;

/// The card's own hint if it has a non-blank one, otherwise a generic prompt
/// built from the front.
pub fn get_hint(card: &Card) -> String {
    match card.hint() {
        Some(hint) if !hint.trim().is_empty() => hint.to_string(),
        _ => format!("Think about the key concepts related to {}", card.front()),
    }
}
