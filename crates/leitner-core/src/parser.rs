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

//! Deck files are TOML documents with an optional deck `name` and a list of
//! `[[cards]]` tables:
//!
//! ```toml
//! name = "Geography"
//!
//! [[cards]]
//! front = "Paris"
//! back = "France of capital"
//! hint = "Eiffel"
//! tags = ["europe"]
//! ```

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use toml::Spanned;

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::CardContent;

#[derive(Debug, Deserialize)]
struct DeckFile {
    name: Option<String>,
    #[serde(default)]
    cards: Vec<Spanned<CardContent>>,
}

#[derive(Debug)]
pub struct ParserError {
    pub message: String,
    pub source_path: String,
    pub line_num: usize,
}

impl ParserError {
    fn new(message: impl Into<String>, source_path: &str, line_num: usize) -> Self {
        ParserError {
            message: message.into(),
            source_path: source_path.to_string(),
            line_num,
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Location: {}:{}",
            self.message,
            self.source_path,
            self.line_num + 1
        )
    }
}

impl Error for ParserError {}

/// Zero-based line containing byte `offset`.
fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()
        .iter()
        .take(offset)
        .filter(|b| **b == b'\n')
        .count()
}

/// Parse a single deck file's content into cards.
///
/// # Arguments
/// * `source_path` - A reference path for error messages
/// * `text` - The TOML content to parse
pub fn parse_deck_content(source_path: &str, text: &str) -> Result<Vec<Card>, ParserError> {
    let deck: DeckFile = toml::from_str(text).map_err(|e| {
        let line = e.span().map(|span| line_of(text, span.start)).unwrap_or(0);
        ParserError::new(e.message().trim().to_string(), source_path, line)
    })?;

    let mut cards = Vec::with_capacity(deck.cards.len());
    for spanned in deck.cards {
        let line = line_of(text, spanned.span().start);
        let content = spanned.into_inner();
        if content.front.trim().is_empty() {
            return Err(ParserError::new("Card has an empty front.", source_path, line));
        }
        if content.back.trim().is_empty() {
            return Err(ParserError::new("Card has an empty back.", source_path, line));
        }
        cards.push(Card::from(content));
    }

    let name = deck.name.as_deref().unwrap_or(source_path);
    log::debug!("Parsed {} cards from deck '{name}'", cards.len());
    Ok(cards)
}

/// Parse multiple deck files into a combined list of cards.
///
/// # Arguments
/// * `files` - Iterator of (filename, content) pairs
pub fn parse_decks<'a>(files: impl Iterator<Item = (&'a str, &'a str)>) -> Fallible<Vec<Card>> {
    let mut all_cards = Vec::new();
    for (filename, text) in files {
        all_cards.extend(parse_deck_content(filename, text)?);
    }

    // Cards are sorted by their hash to make subsequent code more deterministic.
    all_cards.sort_by_key(|c| c.hash());

    // Remove duplicates.
    let before = all_cards.len();
    all_cards.dedup_by_key(|c| c.hash());
    if all_cards.len() < before {
        log::warn!("Ignored {} duplicate cards", before - all_cards.len());
    }

    Ok(all_cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() -> Result<(), ParserError> {
        let cards = parse_deck_content("test.toml", "")?;
        assert_eq!(cards.len(), 0);
        Ok(())
    }

    #[test]
    fn test_basic_card() -> Result<(), ParserError> {
        let input = r#"
name = "Geography"

[[cards]]
front = "Paris"
back = "France of capital"
hint = "Eiffel"
tags = ["europe", "cities"]
"#;
        let cards = parse_deck_content("test.toml", input)?;
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.front(), "Paris");
        assert_eq!(card.back(), "France of capital");
        assert_eq!(card.hint(), Some("Eiffel"));
        assert_eq!(card.tags(), ["europe".to_string(), "cities".to_string()]);
        Ok(())
    }

    #[test]
    fn test_missing_back() {
        let input = "[[cards]]\nfront = \"Paris\"\n";
        let err = parse_deck_content("test.toml", input).unwrap_err();
        assert_eq!(err.source_path, "test.toml");
        assert!(err.message.contains("back"));
    }

    #[test]
    fn test_blank_front_reports_line() {
        let input = "[[cards]]\nfront = \"a\"\nback = \"b\"\n\n[[cards]]\nfront = \"  \"\nback = \"b\"\n";
        let err = parse_deck_content("test.toml", input).unwrap_err();
        assert_eq!(err.message, "Card has an empty front.");
        assert_eq!(err.line_num, 4);
        assert_eq!(err.to_string(), "Card has an empty front. Location: test.toml:5");
    }

    #[test]
    fn test_spaced_header_reports_line() {
        let input = "[[cards]]\nfront = \"a\"\nback = \"b\"\n\n[[ cards ]]\nfront = \" \"\nback = \"b\"\n";
        let err = parse_deck_content("t.toml", input).unwrap_err();
        assert_eq!(err.line_num, 4);
        assert_eq!(err.to_string(), "Card has an empty front. Location: t.toml:5");
    }

    #[test]
    fn test_header_inside_string_is_ignored() {
        let input = "[[cards]]\nfront = \"a\"\nback = \"\"\"\n[[cards]]\n\"\"\"\n\n[[cards]]\nfront = \"c\"\nback = \"\"\n";
        let err = parse_deck_content("test.toml", input).unwrap_err();
        assert_eq!(err.message, "Card has an empty back.");
        assert_eq!(err.line_num, 6);
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_deck_content("bad.toml", "[[cards]\n").unwrap_err();
        assert_eq!(err.source_path, "bad.toml");
        assert_eq!(err.line_num, 0);
    }

    #[test]
    fn test_parse_decks_deduplicates() -> Fallible<()> {
        let a = "[[cards]]\nfront = \"X\"\nback = \"Y\"\n";
        let b = "[[cards]]\nfront = \"X\"\nback = \"Y\"\nhint = \"other\"\n\n[[cards]]\nfront = \"P\"\nback = \"Q\"\n";
        let cards = parse_decks([("a.toml", a), ("b.toml", b)].into_iter())?;
        assert_eq!(cards.len(), 2);
        Ok(())
    }
}
