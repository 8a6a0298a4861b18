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

use std::cmp::Ordering;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_hash::CardHash;

/// The raw, serializable content of a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A flashcard. Identity is its content: two cards with the same front and
/// back are the same card, whatever their hint and tags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "CardContent", into = "CardContent")]
pub struct Card {
    content: CardContent,
    hash: CardHash,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::from(CardContent {
            front: front.into(),
            back: back.into(),
            hint: None,
            tags: Vec::new(),
        })
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.content.hint = Some(hint.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.content.tags = tags;
        self
    }

    pub fn front(&self) -> &str {
        &self.content.front
    }

    pub fn back(&self) -> &str {
        &self.content.back
    }

    pub fn hint(&self) -> Option<&str> {
        self.content.hint.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.content.tags
    }

    pub fn hash(&self) -> CardHash {
        self.hash
    }
}

impl From<CardContent> for Card {
    fn from(content: CardContent) -> Self {
        let hash = CardHash::of_content(&content.front, &content.back);
        Self { content, hash }
    }
}

impl From<Card> for CardContent {
    fn from(card: Card) -> Self {
        card.content
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash.cmp(&other.hash)
    }
}
